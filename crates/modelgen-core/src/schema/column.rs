use super::{EntityId, FieldId};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Uniquely identifies the column within its entity's table.
    pub id: ColumnId,

    /// Name of the column
    pub name: String,

    /// Storage type
    pub storage_ty: StorageType,

    /// Whether or not the column is nullable
    pub nullable: bool,

    /// True when the column is the table's primary key
    pub primary_key: bool,

    /// Attribute or relation the column stores
    pub field: FieldId,

    /// Target table, for foreign key columns
    pub references: Option<EntityId>,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId {
    pub entity: EntityId,
    pub index: usize,
}

/// SQL column types used by the model.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StorageType {
    Varchar,
    Integer,
    Real,
    Boolean,
}

impl StorageType {
    pub fn as_sql(self) -> &'static str {
        match self {
            StorageType::Varchar => "varchar",
            StorageType::Integer => "integer",
            StorageType::Real => "real",
            StorageType::Boolean => "boolean",
        }
    }
}

impl ColumnId {
    pub(crate) const fn placeholder() -> ColumnId {
        ColumnId {
            entity: EntityId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl fmt::Debug for ColumnId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ColumnId({}/{})", self.entity.0, self.index)
    }
}
