use crate::{artifact::StorageOp, Value};

#[derive(Debug, Clone)]
pub enum Operation {
    /// Run a storage statement with its bound parameters
    Storage(Storage),

    /// Execute a transaction lifecycle op
    Transaction(Transaction),
}

#[derive(Debug, Clone)]
pub struct Storage {
    pub op: StorageOp,

    /// Parameters, in the order documented on [`StorageOp`]
    pub params: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    Start,
    Commit,
    Rollback,
}

impl Transaction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Transaction::Start => "BEGIN",
            Transaction::Commit => "COMMIT",
            Transaction::Rollback => "ROLLBACK",
        }
    }
}

impl From<Storage> for Operation {
    fn from(value: Storage) -> Self {
        Operation::Storage(value)
    }
}

impl From<Transaction> for Operation {
    fn from(value: Transaction) -> Self {
        Operation::Transaction(value)
    }
}
