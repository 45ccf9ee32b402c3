use super::Statement;

use modelgen_core::schema::{Attribute, ColumnId, Entity, EntityId, Modifier};

/// A statement to create a single-column index.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
    /// Name of the index, `<table>_<column>`
    pub name: String,

    /// Which table to index
    pub on: EntityId,

    /// The indexed column
    pub column: ColumnId,

    /// When true, the index is unique
    pub unique: bool,
}

impl Statement {
    /// Creates an index over an attribute's column.
    pub fn create_index(entity: &Entity, attribute: &Attribute) -> Self {
        CreateIndex {
            name: format!("{}_{}", entity.table, attribute.column),
            on: entity.id,
            column: attribute.column_id,
            unique: attribute.has(Modifier::Unique),
        }
        .into()
    }
}

impl From<CreateIndex> for Statement {
    fn from(value: CreateIndex) -> Self {
        Self::CreateIndex(value)
    }
}
