use modelgen_core::{
    artifact::StorageOp,
    async_trait,
    driver::{Connection, Driver, Operation, Response},
    Model, Result,
};
use std::{
    borrow::Cow,
    sync::{Arc, Mutex},
};

pub type OpsLog = Arc<Mutex<Vec<DriverOp>>>;

#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Log of all operations executed through this driver
    ops_log: OpsLog,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> OpsLog {
        self.ops_log.clone()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    fn url(&self) -> Cow<'_, str> {
        self.inner.url()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            ops_log: self.ops_log_handle(),
        }))
    }
}

#[derive(Debug)]
pub struct DriverOp {
    pub operation: Operation,

    /// Whether the underlying connection returned `Ok`
    pub ok: bool,
}

impl DriverOp {
    /// Short form for assertions: `BEGIN`, `INSERT`, `SELECT`, ... with a
    /// trailing `!` when the operation failed.
    pub fn describe(&self) -> String {
        let name = match &self.operation {
            Operation::Transaction(op) => op.as_sql(),
            Operation::Storage(storage) => match &storage.op {
                StorageOp::Insert { .. } => "INSERT",
                StorageOp::Update { .. } => "UPDATE",
                StorageOp::Delete { .. } => "DELETE",
                StorageOp::Select(_) => "SELECT",
            },
        };

        if self.ok {
            name.to_string()
        } else {
            format!("{name}!")
        }
    }
}

/// Records every operation before handing it to the wrapped connection
#[derive(Debug)]
pub struct LoggingConnection {
    inner: Box<dyn Connection>,
    ops_log: OpsLog,
}

#[async_trait]
impl Connection for LoggingConnection {
    async fn exec(&mut self, model: &Arc<Model>, operation: Operation) -> Result<Response> {
        let operation_clone = operation.clone();
        let response = self.inner.exec(model, operation).await;

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(DriverOp {
                operation: operation_clone,
                ok: response.is_ok(),
            });

        response
    }

    async fn push_schema(&mut self, model: &Model) -> Result<()> {
        self.inner.push_schema(model).await
    }
}

/// Describe and clear the log.
pub fn drain(ops_log: &OpsLog) -> Vec<String> {
    ops_log
        .lock()
        .expect("Failed to acquire ops log lock")
        .drain(..)
        .map(|op| op.describe())
        .collect()
}
