mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

use crate::{async_trait, Model, Result};

use std::{borrow::Cow, fmt::Debug, sync::Arc};

#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Connection URL, for logging
    fn url(&self) -> Cow<'_, str>;

    /// Open a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a storage statement or a transaction lifecycle op
    async fn exec(&mut self, model: &Arc<Model>, op: Operation) -> Result<Response>;

    /// Drop and recreate every table, index and constraint of the model.
    async fn push_schema(&mut self, model: &Model) -> Result<()>;
}
