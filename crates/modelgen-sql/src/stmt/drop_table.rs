use super::Statement;

use modelgen_core::schema::Entity;

/// A statement to drop a SQL table.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    /// Name of the table.
    pub name: String,

    /// Whether or not to add an `IF EXISTS` clause.
    pub if_exists: bool,

    /// Whether or not to add a `CASCADE` clause, dropping dependent
    /// constraints along with the table.
    pub cascade: bool,
}

impl Statement {
    /// Drops the entity's table if it exists.
    pub fn drop_table_if_exists(entity: &Entity, cascade: bool) -> Self {
        DropTable {
            name: entity.table.clone(),
            if_exists: true,
            cascade,
        }
        .into()
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Self::DropTable(value)
    }
}
