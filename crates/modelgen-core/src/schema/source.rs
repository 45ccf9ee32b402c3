//! The model document, as written by users.
//!
//! Everything here is untyped strings. Resolution
//! validates the names and turns them into a [`Model`](super::Model).

use super::UdKind;
use crate::Result;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub types: Vec<TypeDef>,
    pub entities: Vec<EntityDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: UdKind,

    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityDef {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,

    pub traits: Vec<String>,
    pub attributes: Vec<AttributeDef>,
    pub relations: Vec<RelationDef>,

    /// Operation name to lifecycles, e.g. `create: [before, after]`
    pub hooks: IndexMap<String, Vec<String>>,

    pub operations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    pub entity: String,

    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl Document {
    pub fn from_yaml(source: &str) -> Result<Document> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json(source: &str) -> Result<Document> {
        Ok(serde_json::from_str(source)?)
    }
}
