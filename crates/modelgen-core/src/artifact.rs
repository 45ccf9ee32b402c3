mod group;
pub use group::{ArtifactGroup, ArtifactId, ArtifactKind, Metrics};

mod pipeline;
pub use pipeline::Step;

mod storage;
pub use storage::{Select, StorageOp};

mod synthesize;
pub use synthesize::synthesize;

mod wire;
pub use wire::{WireArg, WireKind, WireOperation, WireType};

use crate::schema::EntityId;

use indexmap::IndexMap;

/// Every artifact group of every entity, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct OperationSets {
    pub sets: Vec<OperationSet>,

    /// Maps wire operation names to groups
    by_name: IndexMap<String, ArtifactId>,
}

/// The ordered artifact groups of one entity.
#[derive(Debug, Clone)]
pub struct OperationSet {
    pub entity: EntityId,
    pub groups: Vec<ArtifactGroup>,
}

impl OperationSets {
    pub(crate) fn new(sets: Vec<OperationSet>) -> OperationSets {
        let by_name = sets
            .iter()
            .flat_map(|set| set.groups.iter())
            .map(|group| (group.wire.name.clone(), group.id))
            .collect();

        OperationSets { sets, by_name }
    }

    pub fn for_entity(&self, entity: impl Into<EntityId>) -> &OperationSet {
        &self.sets[entity.into().0]
    }

    pub fn group(&self, id: ArtifactId) -> &ArtifactGroup {
        &self.sets[id.entity.0].groups[id.index]
    }

    /// Look a group up by its wire operation (and resolver) name
    pub fn by_name(&self, name: &str) -> Option<&ArtifactGroup> {
        self.by_name.get(name).map(|id| self.group(*id))
    }

    pub fn groups(&self) -> impl Iterator<Item = &ArtifactGroup> + '_ {
        self.sets.iter().flat_map(|set| set.groups.iter())
    }
}

impl OperationSet {
    pub fn find(&self, kind: &ArtifactKind) -> Option<&ArtifactGroup> {
        self.groups.iter().find(|group| &group.kind == kind)
    }

    pub fn mutations(&self) -> impl Iterator<Item = &ArtifactGroup> + '_ {
        self.groups.iter().filter(|group| group.wire.is_mutation())
    }

    pub fn queries(&self) -> impl Iterator<Item = &ArtifactGroup> + '_ {
        self.groups.iter().filter(|group| !group.wire.is_mutation())
    }
}
