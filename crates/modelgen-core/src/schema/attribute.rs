use super::{AttrType, ColumnId, EntityId, Modifier, Modifiers};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Attribute {
    /// Uniquely identifies the attribute within the containing entity.
    pub id: AttributeId,

    /// The attribute name, as declared
    pub name: String,

    pub ty: AttrType,

    pub modifiers: Modifiers,

    /// Native variable name
    pub variable: String,

    /// Storage column name
    pub column: String,

    /// Field and argument name on the wire
    pub wire_name: String,

    /// Storage column holding this attribute
    pub column_id: ColumnId,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId {
    pub entity: EntityId,
    pub index: usize,
}

impl Attribute {
    pub(crate) fn new(name: impl Into<String>, ty: AttrType, modifiers: Modifiers) -> Attribute {
        Attribute {
            id: AttributeId::placeholder(),
            name: name.into(),
            ty,
            modifiers,
            variable: String::new(),
            column: String::new(),
            wire_name: String::new(),
            column_id: ColumnId::placeholder(),
        }
    }

    /// The `ID` attribute keys storage.
    pub fn is_id(&self) -> bool {
        self.name == "ID"
    }

    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(modifier)
    }

    pub fn is_required(&self) -> bool {
        self.is_id() || self.has(Modifier::Required)
    }

    pub fn is_generated(&self) -> bool {
        self.has(Modifier::Generated)
    }

    /// Attributes that get a single-row finder.
    pub fn is_finder_key(&self) -> bool {
        self.has(Modifier::Unique) && self.has(Modifier::Indexed)
    }

    pub fn wants_index(&self) -> bool {
        self.has(Modifier::Unique) || self.has(Modifier::Indexed)
    }
}

impl AttributeId {
    pub(crate) const fn placeholder() -> AttributeId {
        AttributeId {
            entity: EntityId::placeholder(),
            index: usize::MAX,
        }
    }
}

impl fmt::Debug for AttributeId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "AttributeId({}/{})", self.entity.0, self.index)
    }
}
