use super::{Step, StorageOp, WireOperation};
use crate::schema::{AttributeId, EntityId, Operation, RelationId};
use std::fmt;

/// Everything derived from one entity operation: the storage statement, the
/// wire operation, the persistence and resolver function names, the metric
/// pair and, for mutations, the pipeline.
#[derive(Debug, Clone)]
pub struct ArtifactGroup {
    pub id: ArtifactId,

    pub kind: ArtifactKind,

    /// The entity operation this group belongs to
    pub operation: Operation,

    pub storage: StorageOp,

    pub wire: WireOperation,

    /// Persistence function name, e.g. `InsertUser`, `FindUserByID`
    pub persistence: String,

    /// Resolver function name. Same as the wire operation name.
    pub resolver: String,

    pub metrics: Metrics,

    /// Steps run by the resolver, in order. Finders only persist.
    pub pipeline: Vec<Step>,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactId {
    pub entity: EntityId,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Create,
    Update,
    Delete,

    /// Single-row finder on a unique and indexed attribute
    FindBy { attribute: AttributeId },

    /// Paginated finder on a singular relation's foreign key
    FindManyBy { relation: RelationId },

    /// Paginated unconditional finder
    FindAll,
}

/// Names and help texts of a group's latency histogram and error counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub histogram: String,
    pub histogram_help: String,
    pub counter: String,
    pub counter_help: String,
}

impl ArtifactGroup {
    /// Names of the generator and hook functions the pipeline calls.
    pub fn functions(&self) -> impl Iterator<Item = &str> + '_ {
        self.pipeline.iter().filter_map(Step::function)
    }

    pub fn is_paginated(&self) -> bool {
        matches!(
            self.kind,
            ArtifactKind::FindManyBy { .. } | ArtifactKind::FindAll
        )
    }
}

impl ArtifactKind {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ArtifactKind::Create | ArtifactKind::Update | ArtifactKind::Delete
        )
    }
}

impl fmt::Debug for ArtifactId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ArtifactId({}/{})", self.entity.0, self.index)
    }
}
