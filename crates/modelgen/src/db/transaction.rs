use modelgen_core::{
    driver::{
        operation::{Storage, Transaction as TransactionOp},
        Connection, Response,
    },
    Model, Result,
};

use std::sync::Arc;
use tokio::sync::MutexGuard;

/// An open transaction on the shared connection. The connection stays
/// locked until the transaction is finished.
pub(super) struct Transaction<'a> {
    conn: MutexGuard<'a, Box<dyn Connection>>,
    model: &'a Arc<Model>,
}

impl<'a> Transaction<'a> {
    pub(super) async fn begin(
        mut conn: MutexGuard<'a, Box<dyn Connection>>,
        model: &'a Arc<Model>,
    ) -> Result<Transaction<'a>> {
        conn.exec(model, TransactionOp::Start.into()).await?;
        Ok(Transaction { conn, model })
    }

    pub(super) async fn exec(&mut self, op: Storage) -> Result<Response> {
        self.conn.exec(self.model, op.into()).await
    }

    /// Commit when `result` is `Ok`, roll back otherwise. A failed commit is
    /// rolled back too. The original error is returned either way.
    pub(super) async fn finish<T>(mut self, result: Result<T>) -> Result<T> {
        let err = match result {
            Ok(value) => match self.conn.exec(self.model, TransactionOp::Commit.into()).await {
                Ok(_) => return Ok(value),
                Err(err) => err,
            },
            Err(err) => err,
        };

        if let Err(rollback) = self
            .conn
            .exec(self.model, TransactionOp::Rollback.into())
            .await
        {
            log::warn!("rollback failed; error={rollback}");
        }

        Err(err)
    }
}
