mod value;
pub(crate) use value::Value;

use modelgen_core::{
    async_trait,
    driver::{
        operation::{Operation, Storage},
        Driver, Response,
    },
    Error, Model, Result,
};
use modelgen_sql as sql;
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    sync::Arc,
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            modelgen_core::bail!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            );
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    async fn connect(&self) -> Result<Box<dyn modelgen_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl modelgen_core::Connection for Connection {
    async fn exec(&mut self, model: &Arc<Model>, op: Operation) -> Result<Response> {
        match op {
            Operation::Transaction(op) => {
                log::debug!("sqlite: {}", op.as_sql());
                self.connection
                    .execute(op.as_sql(), [])
                    .map_err(Error::driver)?;
                Ok(Response::count(0))
            }
            Operation::Storage(op) => self.exec_storage(model, op),
        }
    }

    async fn push_schema(&mut self, model: &Model) -> Result<()> {
        for stmt in sql::Serializer::sqlite(model).serialize_schema() {
            log::debug!("sqlite: {stmt}");
            self.connection
                .execute_batch(&stmt)
                .map_err(Error::driver)?;
        }

        Ok(())
    }
}

impl Connection {
    fn exec_storage(&mut self, model: &Model, op: Storage) -> Result<Response> {
        if op.params.len() != op.op.param_count() {
            modelgen_core::bail!(
                "statement expects {} parameters, got {}",
                op.op.param_count(),
                op.params.len()
            );
        }

        let sql_str = sql::Serializer::sqlite(model).serialize(&sql::Statement::from(op.op.clone()));
        log::debug!("sqlite: {sql_str}; params={:?}", op.params);

        let mut stmt = self
            .connection
            .prepare_cached(&sql_str)
            .map_err(Error::driver)?;

        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();

        let modelgen_core::artifact::StorageOp::Select(select) = &op.op else {
            let count = stmt
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(Error::driver)?;

            return Ok(Response::count(count as _));
        };

        let columns: Vec<_> = select
            .columns
            .iter()
            .map(|column| model.column(*column))
            .collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let mut items = Vec::with_capacity(columns.len());

            for (index, column) in columns.iter().enumerate() {
                items.push(Value::from_sql(row, index, column)?.into_inner());
            }

            ret.push(items);
        }

        Ok(Response::values(ret))
    }
}
