use super::{
    resolve,
    source::{AttributeDef, EntityDef, RelationDef},
    AttrType, Attribute, Cardinality, Document, Entity, EntityId, Hooks, Lifecycle, Model,
    Modifier, Modifiers, Operation, Relation, ResolveOptions, UdType,
};
use crate::{Error, ModelError, Result};

use indexmap::IndexMap;

/// Drives the resolution passes over an arena of entities and collects every
/// configuration error found on the way.
pub(super) struct Builder {
    pub(super) options: ResolveOptions,

    pub(super) types: Vec<UdType>,

    pub(super) entities: Vec<Entity>,

    /// Operation names as written, per entity, validated by the operation pass
    pub(super) raw_operations: Vec<Vec<String>>,

    /// Maps entity names to their slot in `entities`
    pub(super) lookup: IndexMap<String, EntityId>,

    pub(super) errors: Vec<Error>,
}

impl Builder {
    pub(super) fn new(options: &ResolveOptions) -> Builder {
        Builder {
            options: options.clone(),
            types: vec![],
            entities: vec![],
            raw_operations: vec![],
            lookup: IndexMap::new(),
            errors: vec![],
        }
    }

    pub(super) fn build(mut self, document: Document) -> Result<Model> {
        self.load(document);

        log::debug!("expanding traits; entities={}", self.entities.len());
        resolve::traits::expand_all(&mut self);

        log::debug!("resolving types; types={}", self.types.len());
        resolve::types::resolve(&mut self);

        log::debug!("resolving operations");
        resolve::operations::resolve(&mut self);

        log::debug!("resolving names");
        resolve::names::resolve(&mut self);

        resolve::verify::verify(&mut self);

        if !self.errors.is_empty() {
            return Err(Error::model_errors(self.errors));
        }

        Ok(Model::from_parts(self.types, self.entities))
    }

    pub(super) fn report(&mut self, err: ModelError) {
        log::debug!("model error: {err}");
        self.errors.push(Error::model(err));
    }

    fn load(&mut self, document: Document) {
        for def in document.types {
            if self.types.iter().any(|ty| ty.name == def.name) {
                self.report(ModelError::DuplicateType { name: def.name });
                continue;
            }

            self.types.push(UdType {
                name: def.name,
                kind: def.kind,
                values: def.values,
            });
        }

        for def in document.entities {
            if self.lookup.contains_key(&def.name) {
                self.report(ModelError::DuplicateEntity { name: def.name });
                continue;
            }

            let id = EntityId(self.entities.len());
            self.lookup.insert(def.name.clone(), id);
            self.raw_operations.push(def.operations.clone());

            let entity = self.load_entity(id, def);
            self.entities.push(entity);
        }
    }

    fn load_entity(&mut self, id: EntityId, def: EntityDef) -> Entity {
        let hooks = self.load_hooks(&def);

        let attributes = def
            .attributes
            .iter()
            .map(|attribute| self.load_attribute(&def.name, attribute))
            .collect();

        let relations = def
            .relations
            .iter()
            .map(|relation| self.load_relation(&def.name, relation))
            .collect();

        Entity {
            id,
            name: def.name,
            attributes,
            relations,
            traits: def.traits,
            hooks,
            operations: vec![],
            variable: def.variable.unwrap_or_default(),
            plural: def.plural.unwrap_or_default(),
            table: String::new(),
            columns: vec![],
        }
    }

    fn load_hooks(&mut self, def: &EntityDef) -> Hooks {
        let mut hooks = Hooks::default();

        for (operation, lifecycles) in &def.hooks {
            let parsed = Operation::from_name(operation).filter(|op| op.is_mutation());

            for lifecycle in lifecycles {
                match (parsed, Lifecycle::from_name(lifecycle)) {
                    (Some(operation), Some(lifecycle)) => hooks.insert(operation, lifecycle),
                    _ => self.report(ModelError::InvalidHook {
                        entity: def.name.clone(),
                        operation: operation.clone(),
                        lifecycle: lifecycle.clone(),
                    }),
                }
            }
        }

        hooks
    }

    fn load_attribute(&mut self, entity: &str, def: &AttributeDef) -> Attribute {
        let modifiers = self.load_modifiers(entity, &def.name, &def.modifiers, |modifier| {
            modifier.applies_to_attribute()
        });

        Attribute::new(&def.name, AttrType::from_name(&def.ty), modifiers)
    }

    fn load_relation(&mut self, entity: &str, def: &RelationDef) -> Relation {
        let field = def.alias.as_deref().unwrap_or(&def.entity);
        let modifiers = self.load_modifiers(entity, field, &def.modifiers, |modifier| {
            modifier.applies_to_relation()
        });

        let cardinalities: Vec<_> = [
            Cardinality::HasOne,
            Cardinality::BelongsTo,
            Cardinality::HasMany,
        ]
        .into_iter()
        .filter(|cardinality| modifiers.contains(cardinality.modifier()))
        .collect();

        let cardinality = match cardinalities[..] {
            [cardinality] => cardinality,
            _ => {
                self.report(ModelError::InvalidCardinality {
                    entity: entity.to_string(),
                    relation: field.to_string(),
                });
                Cardinality::HasOne
            }
        };

        Relation::new(def.alias.clone(), &def.entity, cardinality, modifiers)
    }

    fn load_modifiers(
        &mut self,
        entity: &str,
        field: &str,
        names: &[String],
        applies: impl Fn(Modifier) -> bool,
    ) -> Modifiers {
        let mut modifiers = Modifiers::empty();

        for name in names {
            match Modifier::from_name(name).filter(|modifier| applies(*modifier)) {
                Some(modifier) => modifiers.insert(modifier),
                None => self.report(ModelError::UnknownModifier {
                    entity: entity.to_string(),
                    field: field.to_string(),
                    modifier: name.clone(),
                }),
            }
        }

        modifiers
    }
}
