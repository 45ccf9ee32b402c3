use super::{Formatter, ToSql};

/// A table, column, index or constraint name. Model names are already
/// lowercase snake case, so they are written unquoted.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self.0.as_ref());
    }
}
