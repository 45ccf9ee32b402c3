use super::Statement;

/// A SQLite PRAGMA statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Pragma {
    /// The pragma name (e.g. "foreign_keys").
    pub name: String,

    /// The value to set.
    pub value: String,
}

impl Statement {
    /// Sets `PRAGMA foreign_keys = ON`.
    pub fn pragma_enable_foreign_keys() -> Self {
        Pragma {
            name: "foreign_keys".to_string(),
            value: "ON".to_string(),
        }
        .into()
    }
}

impl From<Pragma> for Statement {
    fn from(value: Pragma) -> Self {
        Self::Pragma(value)
    }
}
