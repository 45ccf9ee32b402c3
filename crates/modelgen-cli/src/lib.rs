mod config;
mod write;

pub use config::*;

use anyhow::{Context, Result};
use clap::Parser;
use modelgen_core::Plan;
use std::path::PathBuf;

/// Modelgen CLI library for building custom command-line tools
#[derive(Debug, Default)]
pub struct ModelgenCli {
    config: Config,
}

impl ModelgenCli {
    /// Create a new ModelgenCli instance. `Modelgen.toml` is read from the
    /// working directory when present.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new ModelgenCli instance with a base configuration, used
    /// when no configuration file is found
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::parse_from(args);
        self.run(cli)
    }

    fn run(&self, cli: Cli) -> Result<()> {
        let config = cli.config()?.unwrap_or_else(|| self.config.clone());
        let config = cli.apply(config);
        generate(&config)
    }
}

/// Resolve the configured model and write every artifact.
///
/// Nothing is written when resolution fails.
pub fn generate(config: &Config) -> Result<()> {
    let Some(model) = &config.model else {
        anyhow::bail!("no model file given; pass --model or set `model` in {DEFAULT_CONFIG_FILE}");
    };

    let plan = Plan::from_file(model, &config.resolve_options())
        .with_context(|| format!("failed to resolve model {}", model.display()))?;
    log::debug!(
        "resolved model; entities={} operations={}",
        plan.model.entities.len(),
        plan.operations.groups().count()
    );

    let output = modelgen_codegen::generate(&plan, &config.codegen_options());
    write::Writer::new(&config.output, config.rustfmt).write(&output)?;

    log::info!(
        "generated {} files in {}",
        output.files.len(),
        config.output.display()
    );
    Ok(())
}

#[derive(Parser, Debug)]
#[command(name = "modelgen")]
#[command(about = "Modelgen - Generate storage, wire and native artifacts from a data model")]
#[command(version)]
struct Cli {
    /// Path to the model document (YAML, or JSON with a `.json` extension)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Output directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Target database
    #[arg(long, value_enum)]
    db: Option<Database>,

    /// Render metric declarations
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    metrics: Option<bool>,

    /// Reject unknown trait names
    #[arg(long)]
    strict_traits: bool,

    /// Skip piping generated Rust through rustfmt
    #[arg(long)]
    no_rustfmt: bool,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> Result<Option<Config>> {
        match &self.config {
            Some(path) => Config::load(path).map(Some),
            None if std::fs::exists(DEFAULT_CONFIG_FILE)? => {
                Config::load(DEFAULT_CONFIG_FILE).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Flags override file values.
    fn apply(self, mut config: Config) -> Config {
        if let Some(model) = self.model {
            config = config.model(model);
        }
        if let Some(output) = self.output {
            config = config.output(output);
        }
        if let Some(db) = self.db {
            config = config.db(db);
        }
        if let Some(metrics) = self.metrics {
            config = config.metrics(metrics);
        }
        if self.strict_traits {
            config = config.strict_traits(true);
        }
        if self.no_rustfmt {
            config = config.rustfmt(false);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("modelgen").chain(args.iter().copied()))
    }

    #[test]
    fn flags_override_file_values() {
        let file: Config = "model = \"a.yaml\"\ndb = \"postgres\"\nmetrics = true\n"
            .parse()
            .unwrap();

        let config = parse(&["--model", "b.yaml", "--db", "sqlite3", "--metrics", "false"]).apply(file);
        assert_eq!(config.model, Some(PathBuf::from("b.yaml")));
        assert_eq!(config.db, Database::Sqlite);
        assert!(!config.metrics);
    }

    #[test]
    fn bare_metrics_flag_enables_metrics() {
        let config = parse(&["--metrics", "--strict-traits", "--no-rustfmt"]).apply(Config::new());
        assert!(config.metrics);
        assert!(config.strict_traits);
        assert!(!config.rustfmt);
        assert_eq!(config.output, PathBuf::from("generated"));
    }

    #[test]
    fn database_aliases() {
        assert_eq!(parse(&["--db", "postgresql"]).db, Some(Database::Postgres));
        assert_eq!(parse(&["--db", "sqlite"]).db, Some(Database::Sqlite));
    }
}
