use super::Statement;

use modelgen_core::schema::{Column, ColumnId, Entity, EntityId};

/// `ALTER TABLE .. ADD CONSTRAINT .. FOREIGN KEY ..`
#[derive(Debug, Clone, PartialEq)]
pub struct AddForeignKey {
    /// Constraint name, `<table>_<column>`
    pub name: String,

    /// Table holding the foreign key column
    pub on: EntityId,

    pub column: ColumnId,

    /// The referenced table. Its `id` column is the referenced key.
    pub references: EntityId,
}

impl Statement {
    /// Adds the constraint for a foreign key column. Returns `None` for
    /// columns that reference nothing.
    pub fn add_foreign_key(entity: &Entity, column: &Column) -> Option<Self> {
        let references = column.references?;

        Some(
            AddForeignKey {
                name: format!("{}_{}", entity.table, column.name),
                on: entity.id,
                column: column.id,
                references,
            }
            .into(),
        )
    }
}

impl From<AddForeignKey> for Statement {
    fn from(value: AddForeignKey) -> Self {
        Self::AddForeignKey(value)
    }
}
