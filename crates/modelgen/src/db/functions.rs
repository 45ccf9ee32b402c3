use super::Db;
use crate::{Record, Result, Value};

use indexmap::IndexMap;
use modelgen_core::{artifact::Step, Error, Plan};

use std::{fmt, future::Future, pin::Pin, sync::Arc};

/// Future returned by a [`Generator`].
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Computes a generated field from a storage handle and the partially built
/// record. Relation generators return the target's `ID`.
///
/// Generators run before persistence, so the handle is free to read.
pub type Generator = Arc<dyn Fn(Db, Record) -> BoxFuture<Result<Value>> + Send + Sync>;

/// Runs before or after a mutation's persistence call. A delete's before
/// hook gets a copy of the record holding the `ID` being deleted.
pub type Hook = Arc<dyn Fn(&mut Record) -> Result<()> + Send + Sync>;

/// User-supplied generators and hooks, keyed by canonical name
/// (`GenerateUserCreatedAtOnCreate`, `BeforeCreateUser`).
#[derive(Default, Clone)]
pub(crate) struct Functions {
    generators: IndexMap<String, Generator>,
    hooks: IndexMap<String, Hook>,
}

impl Functions {
    pub(crate) fn insert_generator(&mut self, name: String, generator: Generator) {
        self.generators.insert(name, generator);
    }

    pub(crate) fn insert_hook(&mut self, name: String, hook: Hook) {
        self.hooks.insert(name, hook);
    }

    /// Every function named by a pipeline step must be registered.
    pub(crate) fn check(&self, plan: &Plan) -> Result<()> {
        for group in plan.operations.groups() {
            for step in &group.pipeline {
                let registered = match step {
                    Step::Generate { function, .. } => self.generators.contains_key(function),
                    Step::Before { function } | Step::After { function } => {
                        self.hooks.contains_key(function)
                    }
                    Step::Persist => true,
                };

                if !registered {
                    if let Some(function) = step.function() {
                        return Err(Error::missing_function(function));
                    }
                }
            }
        }

        for name in self.generators.keys().chain(self.hooks.keys()) {
            if !plan.operations.groups().any(|group| group.functions().any(|f| f == name.as_str())) {
                log::warn!("registered function `{name}` is not called by any operation");
            }
        }

        Ok(())
    }

    pub(crate) fn generator(&self, name: &str) -> Result<&Generator> {
        self.generators
            .get(name)
            .ok_or_else(|| Error::missing_function(name))
    }

    pub(crate) fn hook(&self, name: &str) -> Result<&Hook> {
        self.hooks.get(name).ok_or_else(|| Error::missing_function(name))
    }
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Functions")
            .field("generators", &self.generators.keys().collect::<Vec<_>>())
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}
