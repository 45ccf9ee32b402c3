mod builder;
pub use builder::Builder;

mod connect;

mod functions;
pub use functions::{BoxFuture, Generator, Hook};
use functions::Functions;

mod persist;
pub use persist::Persistence;

mod resolve;

mod transaction;
use transaction::Transaction;

use modelgen_core::{
    artifact::{ArtifactGroup, ArtifactKind},
    err,
    schema::Entity,
    Connection, Driver, Error, MetricsRegistry, Model, Plan, Result,
};

use std::{future::Future, sync::Arc, time::Instant};
use tokio::sync::Mutex;

/// Shared state between all `Db` clones.
pub(crate) struct Shared {
    plan: Plan,
    functions: Functions,
    driver: Arc<dyn Driver>,

    /// Statements run one at a time; a transaction holds the lock until it
    /// commits or rolls back.
    connection: Mutex<Box<dyn Connection>>,
}

/// A database handle bound to one resolved model. Cloning is cheap and
/// clones share the connection.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn plan(&self) -> &Plan {
        &self.shared.plan
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.shared.plan.model
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.shared.plan.metrics
    }

    pub fn driver(&self) -> &dyn Driver {
        &*self.shared.driver
    }

    /// Drops and recreates every table, index and constraint of the model.
    pub async fn push_schema(&self) -> Result<()> {
        let mut conn = self.shared.connection.lock().await;
        conn.push_schema(self.model()).await
    }

    /// The persistence functions: storage access without hooks, generators
    /// or metrics.
    pub fn persistence(&self) -> Persistence<'_> {
        Persistence { db: self }
    }

    pub(crate) fn entity(&self, name: &str) -> Result<&Entity> {
        self.model()
            .entity_by_name(name)
            .ok_or_else(|| err!("unknown entity `{name}`"))
    }

    pub(crate) fn group(&self, entity: &Entity, kind: ArtifactKind) -> Result<&ArtifactGroup> {
        self.plan()
            .operations
            .for_entity(entity)
            .find(&kind)
            .ok_or_else(|| Error::unsupported_operation(&entity.name, self.describe(kind)))
    }

    fn describe(&self, kind: ArtifactKind) -> String {
        match kind {
            ArtifactKind::Create => "create".to_string(),
            ArtifactKind::Update => "update".to_string(),
            ArtifactKind::Delete => "delete".to_string(),
            ArtifactKind::FindBy { attribute } => {
                format!("find by {}", self.model().attribute(attribute).name)
            }
            ArtifactKind::FindManyBy { relation } => {
                format!("find by {}", self.model().relation(relation).name)
            }
            ArtifactKind::FindAll => "find all".to_string(),
        }
    }

    /// Runs `fut`, observing its latency and counting its failure on the
    /// group's metrics.
    async fn instrument<T>(
        &self,
        group: &ArtifactGroup,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let start = Instant::now();
        let result = fut.await;
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;

        if let Some(histogram) = self.metrics().histogram(&group.metrics.histogram) {
            histogram.observe(elapsed);
        }

        if let Err(err) = &result {
            log::debug!("{} failed; error={err}", group.resolver);
            if let Some(counter) = self.metrics().counter(&group.metrics.counter) {
                counter.inc();
            }
        }

        result
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("driver", &self.shared.driver)
            .field("functions", &self.shared.functions)
            .finish()
    }
}
