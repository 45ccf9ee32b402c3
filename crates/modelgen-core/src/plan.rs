use crate::{artifact, schema, MetricsRegistry, Model, OperationSets, Result};

use std::{path::Path, sync::Arc};

/// A resolved model with its synthesized operation sets and the metrics they
/// registered. This is what every renderer and the runtime consume.
#[derive(Debug)]
pub struct Plan {
    pub model: Arc<Model>,
    pub operations: OperationSets,
    pub metrics: MetricsRegistry,
}

impl Plan {
    pub fn from_model(model: Model) -> Result<Plan> {
        let mut metrics = MetricsRegistry::new();
        let operations = artifact::synthesize(&model, &mut metrics)?;

        Ok(Plan {
            model: Arc::new(model),
            operations,
            metrics,
        })
    }

    /// Load, resolve and synthesize a model file.
    pub fn from_file(path: impl AsRef<Path>, options: &schema::ResolveOptions) -> Result<Plan> {
        Plan::from_model(schema::from_file(path, options)?)
    }

    /// Load, resolve and synthesize a YAML model held in memory.
    pub fn from_yaml(source: &str, options: &schema::ResolveOptions) -> Result<Plan> {
        Plan::from_model(schema::from_str(source, options)?)
    }
}
