use super::{ColumnId, EntityId, Modifier, Modifiers};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Relation {
    pub id: RelationId,

    /// Explicit alias, if declared
    pub alias: Option<String>,

    /// Target entity name, as declared
    pub target_name: String,

    /// Resolved target entity
    pub target: EntityId,

    pub cardinality: Cardinality,

    pub modifiers: Modifiers,

    /// Display name: the alias, else the target's plural (hasMany) or name
    pub name: String,

    /// Native variable name
    pub variable: String,

    /// Foreign key column name. Only singular relations have one.
    pub column: Option<String>,

    /// Field and argument name on the wire
    pub wire_name: String,

    /// Foreign key column. Only singular relations have one.
    pub column_id: Option<ColumnId>,

    /// For hasMany: the singular relation on the target pointing back here
    pub pair: Option<RelationId>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cardinality {
    HasOne,
    BelongsTo,
    HasMany,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId {
    pub entity: EntityId,
    pub index: usize,
}

impl Relation {
    pub(crate) fn new(
        alias: Option<String>,
        target_name: impl Into<String>,
        cardinality: Cardinality,
        modifiers: Modifiers,
    ) -> Relation {
        Relation {
            id: RelationId::placeholder(),
            alias,
            target_name: target_name.into(),
            target: EntityId::placeholder(),
            cardinality,
            modifiers,
            name: String::new(),
            variable: String::new(),
            column: None,
            wire_name: String::new(),
            column_id: None,
            pair: None,
        }
    }

    /// hasOne and belongsTo embed a foreign key on this entity.
    pub fn is_singular(&self) -> bool {
        !self.is_many()
    }

    pub fn is_many(&self) -> bool {
        self.cardinality == Cardinality::HasMany
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(modifier)
    }

    pub fn is_required(&self) -> bool {
        self.has(Modifier::Required)
    }

    pub fn is_generated(&self) -> bool {
        self.has(Modifier::Generated)
    }
}

impl Cardinality {
    pub fn modifier(self) -> Modifier {
        match self {
            Cardinality::HasOne => Modifier::HasOne,
            Cardinality::BelongsTo => Modifier::BelongsTo,
            Cardinality::HasMany => Modifier::HasMany,
        }
    }
}

impl RelationId {
    pub(crate) const fn placeholder() -> RelationId {
        RelationId {
            entity: EntityId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl fmt::Debug for RelationId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "RelationId({}/{})", self.entity.0, self.index)
    }
}
