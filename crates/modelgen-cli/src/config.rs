use anyhow::{Context, Result};
use modelgen_core::schema::ResolveOptions;
use modelgen_sql::Flavor;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file read from the working directory when `--config` is
/// not given.
pub const DEFAULT_CONFIG_FILE: &str = "Modelgen.toml";

/// Configuration for a generator run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the model document
    pub model: Option<PathBuf>,

    /// Directory the artifacts are written to
    pub output: PathBuf,

    /// SQL flavor of the schema script
    pub db: Database,

    /// Render metric declarations
    pub metrics: bool,

    /// Reject unknown trait names
    pub strict_traits: bool,

    /// Pipe generated Rust through `rustfmt`
    pub rustfmt: bool,
}

/// Target database, as named on the command line and in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
pub enum Database {
    #[default]
    #[serde(rename = "sqlite3", alias = "sqlite")]
    #[value(name = "sqlite3", alias = "sqlite")]
    Sqlite,

    #[serde(rename = "postgres", alias = "postgresql")]
    #[value(name = "postgres", alias = "postgresql")]
    Postgres,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: None,
            output: PathBuf::from("generated"),
            db: Database::default(),
            metrics: false,
            strict_traits: false,
            rustfmt: true,
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Loads the config file if it exists, or returns `self` unchanged
    pub fn load_or(self, path: impl AsRef<Path>) -> Result<Self> {
        if std::fs::exists(&path)? {
            log::debug!("loading config from {}", path.as_ref().display());
            return Self::load(path);
        }
        Ok(self)
    }

    pub fn model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model = Some(path.into());
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn db(mut self, db: Database) -> Self {
        self.db = db;
        self
    }

    pub fn metrics(mut self, metrics: bool) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn strict_traits(mut self, strict_traits: bool) -> Self {
        self.strict_traits = strict_traits;
        self
    }

    pub fn rustfmt(mut self, rustfmt: bool) -> Self {
        self.rustfmt = rustfmt;
        self
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions::default().strict_traits(self.strict_traits)
    }

    pub fn codegen_options(&self) -> modelgen_codegen::Options {
        modelgen_codegen::Options::default()
            .flavor(self.db.flavor())
            .metrics(self.metrics)
    }
}

impl std::str::FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl Database {
    pub fn flavor(self) -> Flavor {
        match self {
            Database::Sqlite => Flavor::Sqlite,
            Database::Postgres => Flavor::Postgresql,
        }
    }
}
