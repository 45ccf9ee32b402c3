use super::{connect, BoxFuture, Db, Functions, Generator, Shared};
use crate::{Record, Result, Value};

use modelgen_core::{bail, Driver, Plan};

use std::{future::Future, sync::Arc};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct Builder {
    /// Resolved model and its operation sets
    plan: Option<Plan>,

    functions: Functions,
}

impl Builder {
    pub fn plan(&mut self, plan: Plan) -> &mut Self {
        self.plan = Some(plan);
        self
    }

    /// Register a generator under its canonical name,
    /// `Generate<Entity><Field>On<Operation>`.
    pub fn generator<F, Fut>(&mut self, name: impl Into<String>, generator: F) -> &mut Self
    where
        F: Fn(Db, Record) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let generator: Generator =
            Arc::new(move |db: Db, record: Record| -> BoxFuture<Result<Value>> {
                Box::pin(generator(db, record))
            });
        self.functions.insert_generator(name.into(), generator);
        self
    }

    /// Register a hook under its canonical name, `<Before|After><Operation><Entity>`.
    pub fn hook(
        &mut self,
        name: impl Into<String>,
        hook: impl Fn(&mut Record) -> Result<()> + Send + Sync + 'static,
    ) -> &mut Self {
        self.functions.insert_hook(name.into(), Arc::new(hook));
        self
    }

    /// Build against the driver selected by the URL scheme.
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        let driver = connect::driver(url)?;
        self.build_dyn(Arc::from(driver)).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        self.build_dyn(Arc::new(driver)).await
    }

    async fn build_dyn(&mut self, driver: Arc<dyn Driver>) -> Result<Db> {
        let Some(plan) = self.plan.take() else {
            bail!("no model plan; call `Builder::plan` before building");
        };
        let functions = std::mem::take(&mut self.functions);

        functions.check(&plan)?;

        log::debug!("connecting; url={}", driver.url());
        let connection = driver.connect().await?;

        Ok(Db {
            shared: Arc::new(Shared {
                plan,
                functions,
                driver,
                connection: Mutex::new(connection),
            }),
        })
    }
}
