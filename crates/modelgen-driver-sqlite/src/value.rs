use modelgen_core::{
    schema::{Column, StorageType},
    Error, Result, Value as CoreValue,
};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Converts a SQLite value within a row to a core value, using the
    /// column's storage type to recover booleans stored as integers.
    pub fn from_sql(row: &Row<'_>, index: usize, column: &Column) -> Result<Self> {
        let value: SqlValue = row.get(index).map_err(Error::driver)?;

        let core_value = match (value, column.storage_ty) {
            (SqlValue::Null, _) => CoreValue::Null,
            (SqlValue::Integer(value), StorageType::Boolean) => CoreValue::Bool(value != 0),
            (SqlValue::Integer(value), StorageType::Integer) => {
                let value = i32::try_from(value).map_err(|_| {
                    modelgen_core::err!("column `{}` holds out of range integer {value}", column.name)
                })?;
                CoreValue::I32(value)
            }
            (SqlValue::Integer(value), StorageType::Real) => CoreValue::F64(value as f64),
            (SqlValue::Real(value), StorageType::Real) => CoreValue::F64(value),
            (SqlValue::Text(value), StorageType::Varchar) => CoreValue::String(value),
            (value, storage_ty) => modelgen_core::bail!(
                "column `{}` of type {} holds unexpected value {value:?}",
                column.name,
                storage_ty.as_sql()
            ),
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match &self.0 {
            CoreValue::Bool(true) => ToSqlOutput::Owned(SqlValue::Integer(1)),
            CoreValue::Bool(false) => ToSqlOutput::Owned(SqlValue::Integer(0)),
            CoreValue::I32(v) => ToSqlOutput::Owned(SqlValue::Integer(*v as i64)),
            CoreValue::F64(v) => ToSqlOutput::Owned(SqlValue::Real(*v)),
            CoreValue::String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
            CoreValue::Null => ToSqlOutput::Owned(SqlValue::Null),
        })
    }
}
