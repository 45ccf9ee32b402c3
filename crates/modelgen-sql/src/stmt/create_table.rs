use super::Statement;

use modelgen_core::schema::{Entity, EntityId};

/// A statement to create a table for an entity. Columns are taken from the
/// entity when serializing.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub entity: EntityId,

    /// Append `FOREIGN KEY (..) REFERENCES ..` entries after the columns
    /// instead of adding the constraints afterwards.
    pub inline_foreign_keys: bool,
}

impl Statement {
    pub fn create_table(entity: &Entity, inline_foreign_keys: bool) -> Self {
        CreateTable {
            entity: entity.id,
            inline_foreign_keys,
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
