use serde::{Deserialize, Serialize};

/// A user-defined enum or union type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdType {
    pub name: String,
    pub kind: UdKind,
    pub values: Vec<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UdKind {
    Enum,
    Union,
}

impl UdType {
    pub fn is_enum(&self) -> bool {
        self.kind == UdKind::Enum
    }

    pub fn is_union(&self) -> bool {
        self.kind == UdKind::Union
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}
