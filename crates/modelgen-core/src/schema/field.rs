use super::{Attribute, AttributeId, Modifiers, Relation, RelationId};

/// Identifies an attribute or a relation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Attribute(AttributeId),
    Relation(RelationId),
}

/// Borrowed attribute or relation, for code that treats both uniformly.
#[derive(Debug, Copy, Clone)]
pub enum Named<'a> {
    Attribute(&'a Attribute),
    Relation(&'a Relation),
}

impl<'a> Named<'a> {
    /// The name used to build canonical identifiers: the attribute name, or
    /// the relation display name.
    pub fn canonical_name(&self) -> &'a str {
        match self {
            Named::Attribute(attribute) => &attribute.name,
            Named::Relation(relation) => &relation.name,
        }
    }

    pub fn variable(&self) -> &'a str {
        match self {
            Named::Attribute(attribute) => &attribute.variable,
            Named::Relation(relation) => &relation.variable,
        }
    }

    pub fn wire_name(&self) -> &'a str {
        match self {
            Named::Attribute(attribute) => &attribute.wire_name,
            Named::Relation(relation) => &relation.wire_name,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Named::Attribute(attribute) => attribute.modifiers,
            Named::Relation(relation) => relation.modifiers,
        }
    }

    pub fn id(&self) -> FieldId {
        match self {
            Named::Attribute(attribute) => FieldId::Attribute(attribute.id),
            Named::Relation(relation) => FieldId::Relation(relation.id),
        }
    }

    pub fn is_generated(&self) -> bool {
        match self {
            Named::Attribute(attribute) => attribute.is_generated(),
            Named::Relation(relation) => relation.is_generated(),
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Named::Attribute(attribute) => attribute.is_required(),
            Named::Relation(relation) => relation.is_required(),
        }
    }

    pub fn as_attribute(&self) -> Option<&'a Attribute> {
        match self {
            Named::Attribute(attribute) => Some(attribute),
            Named::Relation(_) => None,
        }
    }

    pub fn as_relation(&self) -> Option<&'a Relation> {
        match self {
            Named::Relation(relation) => Some(relation),
            Named::Attribute(_) => None,
        }
    }
}

impl From<AttributeId> for FieldId {
    fn from(value: AttributeId) -> Self {
        FieldId::Attribute(value)
    }
}

impl From<RelationId> for FieldId {
    fn from(value: RelationId) -> Self {
        FieldId::Relation(value)
    }
}
