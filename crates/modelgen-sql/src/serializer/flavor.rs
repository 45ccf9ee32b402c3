use super::Serializer;

use modelgen_core::{bail, Model, Result};

use std::{fmt, str::FromStr};

/// The SQL dialect to render for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flavor {
    #[default]
    Sqlite,
    Postgresql,
}

impl Flavor {
    pub fn is_sqlite(self) -> bool {
        matches!(self, Flavor::Sqlite)
    }

    pub fn is_postgresql(self) -> bool {
        matches!(self, Flavor::Postgresql)
    }

    /// The name used on the command line and in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            Flavor::Sqlite => "sqlite3",
            Flavor::Postgresql => "postgres",
        }
    }
}

impl FromStr for Flavor {
    type Err = modelgen_core::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "sqlite" | "sqlite3" => Flavor::Sqlite,
            "postgres" | "postgresql" => Flavor::Postgresql,
            _ => bail!("unsupported database `{s}`; expected `sqlite3` or `postgres`"),
        })
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> Serializer<'a> {
    pub fn sqlite(model: &'a Model) -> Serializer<'a> {
        Serializer::new(model, Flavor::Sqlite)
    }

    pub fn postgresql(model: &'a Model) -> Serializer<'a> {
        Serializer::new(model, Flavor::Postgresql)
    }
}
