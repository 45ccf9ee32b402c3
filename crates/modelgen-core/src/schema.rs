mod attribute;
pub use attribute::{Attribute, AttributeId};

mod builder;
use builder::Builder;

mod column;
pub use column::{Column, ColumnId, StorageType};

mod entity;
pub use entity::{Entity, EntityId};

mod field;
pub use field::{FieldId, Named};

mod modifier;
pub use modifier::{Modifier, Modifiers};

mod operation;
pub use operation::{Hooks, Lifecycle, Operation};

mod relation;
pub use relation::{Cardinality, Relation, RelationId};

mod resolve;

pub mod source;
pub use source::Document;

mod ty;
pub use ty::{map_type, AttrType, NativeType, TypeMapping};

mod ud_type;
pub use ud_type::{UdKind, UdType};

use crate::Result;

use indexmap::IndexMap;
use std::path::Path;

/// The resolved model: user-defined types and entities, in declaration order.
///
/// A `Model` is only handed out once every resolution pass succeeded, so all
/// names, columns, relation targets and operation sets are filled in.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub types: Vec<UdType>,
    pub entities: Vec<Entity>,

    /// Maps entity names to identifiers
    entity_lookup: IndexMap<String, EntityId>,

    /// Maps type names to their position in `types`
    type_lookup: IndexMap<String, usize>,
}

/// Switches for the resolution pipeline.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Reject unknown trait names instead of skipping them.
    pub strict_traits: bool,
}

impl ResolveOptions {
    pub fn strict_traits(mut self, strict_traits: bool) -> Self {
        self.strict_traits = strict_traits;
        self
    }
}

/// Read and resolve a model document. Files ending in `.json` are parsed as
/// JSON, anything else as YAML.
pub fn from_file(path: impl AsRef<Path>, options: &ResolveOptions) -> Result<Model> {
    use anyhow::Context;

    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).with_context(|| {
        let path = path.canonicalize().unwrap_or(path.into());
        format!("failed to read model file from path {}", path.display())
    })?;

    let document = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Document::from_json(&contents)?,
        _ => Document::from_yaml(&contents)?,
    };

    Model::from_document(document, options)
}

/// Resolve a YAML model document held in memory.
pub fn from_str(source: &str, options: &ResolveOptions) -> Result<Model> {
    Model::from_document(Document::from_yaml(source)?, options)
}

impl Model {
    /// Run the full resolution pipeline over a parsed document.
    pub fn from_document(document: Document, options: &ResolveOptions) -> Result<Model> {
        Builder::new(options).build(document)
    }

    pub(crate) fn from_parts(types: Vec<UdType>, entities: Vec<Entity>) -> Model {
        let entity_lookup = entities
            .iter()
            .map(|entity| (entity.name.clone(), entity.id))
            .collect();
        let type_lookup = types
            .iter()
            .enumerate()
            .map(|(index, ty)| (ty.name.clone(), index))
            .collect();

        Model {
            types,
            entities,
            entity_lookup,
            type_lookup,
        }
    }

    /// Get an entity by ID
    pub fn entity(&self, id: impl Into<EntityId>) -> &Entity {
        &self.entities[id.into().0]
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entity_lookup.get(name).map(|id| self.entity(*id))
    }

    pub fn ud_type(&self, name: &str) -> Option<&UdType> {
        self.type_lookup.get(name).map(|index| &self.types[*index])
    }

    pub fn attribute(&self, id: AttributeId) -> &Attribute {
        &self.entity(id.entity).attributes[id.index]
    }

    pub fn relation(&self, id: RelationId) -> &Relation {
        &self.entity(id.entity).relations[id.index]
    }

    pub fn column(&self, id: ColumnId) -> &Column {
        &self.entity(id.entity).columns[id.index]
    }

    pub fn field(&self, id: FieldId) -> Named<'_> {
        match id {
            FieldId::Attribute(id) => Named::Attribute(self.attribute(id)),
            FieldId::Relation(id) => Named::Relation(self.relation(id)),
        }
    }
}
