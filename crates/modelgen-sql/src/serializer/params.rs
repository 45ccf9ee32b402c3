use super::{Flavor, Formatter, ToSql};

/// A positional parameter, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Formatter<'_> {
    /// Reserve the next positional parameter.
    pub(super) fn placeholder(&mut self) -> Placeholder {
        self.params += 1;
        Placeholder(self.params)
    }
}

impl ToSql for Placeholder {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let prefix = match f.serializer.flavor {
            Flavor::Postgresql => "$",
            Flavor::Sqlite => "?",
        };

        f.dst.push_str(prefix);
        f.dst.push_str(&self.0.to_string());
    }
}
