use super::{Attribute, AttributeId, Column, Hooks, Operation, Relation, RelationId};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Entity {
    /// Uniquely identifies the entity within the model
    pub id: EntityId,

    /// Name of the entity, as declared
    pub name: String,

    /// Attributes, declared ones first, then trait-derived ones
    pub attributes: Vec<Attribute>,

    /// Relations, declared ones first, then trait-derived ones
    pub relations: Vec<Relation>,

    /// Trait names as declared
    pub traits: Vec<String>,

    pub hooks: Hooks,

    /// Supported operations. Never empty once resolved.
    pub operations: Vec<Operation>,

    /// Variable name. Empty until naming resolution unless overridden.
    pub variable: String,

    /// Plural name. Empty until naming resolution unless overridden.
    pub plural: String,

    /// Storage table name
    pub table: String,

    /// Storage columns: attributes first, then singular relation keys
    pub columns: Vec<Column>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub usize);

impl Entity {
    pub fn supports(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    pub fn attribute_by_name(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.name == name)
    }

    /// Find a relation by its display name
    pub fn relation_by_name(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|relation| relation.name == name)
    }

    /// The `ID` attribute. Resolution guarantees it exists.
    pub fn primary_key(&self) -> &Attribute {
        self.attributes
            .iter()
            .find(|attribute| attribute.is_id())
            .unwrap_or(&self.attributes[0])
    }

    /// First non-`ID` attribute that is unique or indexed, else `ID`.
    pub fn preferred_sort(&self) -> &Attribute {
        self.attributes
            .iter()
            .find(|attribute| !attribute.is_id() && attribute.wants_index())
            .unwrap_or_else(|| self.primary_key())
    }

    /// Relations that embed a foreign key column on this entity
    pub fn singular_relations(&self) -> impl Iterator<Item = &Relation> + '_ {
        self.relations.iter().filter(|relation| relation.is_singular())
    }

    pub fn primary_key_column(&self) -> &Column {
        self.columns
            .iter()
            .find(|column| column.primary_key)
            .unwrap_or(&self.columns[0])
    }
}

impl EntityId {
    /// Create an `AttributeId` for the attribute at `index`.
    pub const fn attribute(self, index: usize) -> AttributeId {
        AttributeId {
            entity: self,
            index,
        }
    }

    /// Create a `RelationId` for the relation at `index`.
    pub const fn relation(self, index: usize) -> RelationId {
        RelationId {
            entity: self,
            index,
        }
    }

    pub(crate) const fn placeholder() -> Self {
        Self(usize::MAX)
    }

    pub(crate) fn is_placeholder(self) -> bool {
        self.0 == usize::MAX
    }
}

impl From<&Self> for EntityId {
    fn from(src: &Self) -> Self {
        *src
    }
}

impl From<&Entity> for EntityId {
    fn from(value: &Entity) -> Self {
        value.id
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "EntityId({})", self.0)
    }
}
