mod dot;
mod expand;
mod sdl;

pub use expand::{entity_module, mod_file};

use modelgen_core::Plan;
use modelgen_sql::{Flavor, Serializer};

use std::path::PathBuf;

/// Header written at the top of every generated Rust file
pub const GENERATED_HEADER: &str = "// Code generated by modelgen. DO NOT EDIT.\n";

/// Renderer switches.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// SQL flavor of the schema script
    pub flavor: Flavor,

    /// Also render the metric declarations
    pub metrics: bool,
}

/// Every file rendered for a plan, with paths relative to the output
/// directory.
#[derive(Debug, Default)]
pub struct Output {
    pub files: Vec<OutputFile>,
}

#[derive(Debug)]
pub struct OutputFile {
    pub path: PathBuf,
    pub kind: FileKind,
    pub contents: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// Native Rust module
    Rust,
    Sql,
    Graphql,
    Metrics,
    Dot,
}

impl Options {
    pub fn flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn metrics(mut self, metrics: bool) -> Self {
        self.metrics = metrics;
        self
    }
}

impl Output {
    pub fn file(&self, path: &str) -> Option<&OutputFile> {
        self.files.iter().find(|file| file.path.as_os_str() == path)
    }

    fn push(&mut self, path: impl Into<PathBuf>, kind: FileKind, contents: String) {
        let path = path.into();
        log::debug!("rendered {}; bytes={}", path.display(), contents.len());
        self.files.push(OutputFile {
            path,
            kind,
            contents,
        });
    }
}

/// Render every target for a resolved plan.
///
/// All renderers read names and operation sets from the plan; none of them
/// derive their own.
pub fn generate(plan: &Plan, options: &Options) -> Output {
    let model = &plan.model;
    let mut output = Output::default();

    for entity in &model.entities {
        let module = expand::module_name(entity);
        let tokens = entity_module(plan, entity);
        output.push(
            format!("models/{module}.rs"),
            FileKind::Rust,
            format!("{GENERATED_HEADER}\n{tokens}\n"),
        );
    }
    output.push(
        "models/mod.rs",
        FileKind::Rust,
        format!("{GENERATED_HEADER}\n{}\n", mod_file(model)),
    );

    let serializer = Serializer::new(model, options.flavor);
    output.push(
        "schema.sql",
        FileKind::Sql,
        serializer.schema_script(),
    );

    output.push("schema.graphql", FileKind::Graphql, sdl::render(plan));

    if options.metrics {
        output.push("metrics.prom", FileKind::Metrics, plan.metrics.render());
    }

    output.push("model.dot", FileKind::Dot, dot::render(model));

    output
}
