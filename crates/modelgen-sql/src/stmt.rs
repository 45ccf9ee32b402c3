mod add_foreign_key;
pub use add_foreign_key::AddForeignKey;

mod create_index;
pub use create_index::CreateIndex;

mod create_table;
pub use create_table::CreateTable;

mod drop_table;
pub use drop_table::DropTable;

mod pragma;
pub use pragma::Pragma;

mod schema;

use modelgen_core::artifact::StorageOp;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    AddForeignKey(AddForeignKey),
    CreateIndex(CreateIndex),
    CreateTable(CreateTable),
    DropTable(DropTable),
    Pragma(Pragma),

    /// Insert, update, delete or select, as synthesized for an artifact group
    Storage(StorageOp),
}

impl Statement {
    pub fn is_ddl(&self) -> bool {
        !matches!(self, Statement::Storage(_))
    }
}

impl From<StorageOp> for Statement {
    fn from(value: StorageOp) -> Self {
        Self::Storage(value)
    }
}
