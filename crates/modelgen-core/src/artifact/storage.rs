use crate::schema::{ColumnId, EntityId};

/// A storage statement, independent of SQL flavor.
///
/// Parameters bind in this order: insert columns; update columns then the
/// key; the delete key; the select filter, then limit and offset when
/// paginated.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageOp {
    Insert {
        entity: EntityId,
        columns: Vec<ColumnId>,
    },
    Update {
        entity: EntityId,
        columns: Vec<ColumnId>,
        key: ColumnId,
    },
    Delete {
        entity: EntityId,
        key: ColumnId,
    },
    Select(Select),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub entity: EntityId,

    /// Every column of the table, in order
    pub columns: Vec<ColumnId>,

    /// `WHERE <column> = ?`
    pub filter: Option<ColumnId>,

    pub order_by: Option<ColumnId>,

    /// `LIMIT ? OFFSET ?`
    pub paginate: bool,
}

impl StorageOp {
    pub fn entity(&self) -> EntityId {
        match self {
            StorageOp::Insert { entity, .. }
            | StorageOp::Update { entity, .. }
            | StorageOp::Delete { entity, .. } => *entity,
            StorageOp::Select(select) => select.entity,
        }
    }

    /// Number of bound parameters
    pub fn param_count(&self) -> usize {
        match self {
            StorageOp::Insert { columns, .. } => columns.len(),
            StorageOp::Update { columns, .. } => columns.len() + 1,
            StorageOp::Delete { .. } => 1,
            StorageOp::Select(select) => {
                select.filter.iter().count() + if select.paginate { 2 } else { 0 }
            }
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, StorageOp::Select(_))
    }
}
