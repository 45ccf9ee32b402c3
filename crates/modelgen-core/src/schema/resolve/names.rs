use super::super::{builder::Builder, Column, ColumnId, EntityId, FieldId, StorageType};
use crate::ModelError;

use heck::{ToLowerCamelCase, ToSnakeCase};

pub(crate) fn resolve(builder: &mut Builder) {
    assign_ids(builder);
    name_entities(builder);
    name_attributes(builder);
    link_relations(builder);
    pair_relations(builder);
    build_columns(builder);
}

/// `lowercase(snake_case(name))`
pub(crate) fn storage_name(name: &str) -> String {
    name.to_snake_case().to_lowercase()
}

pub(crate) fn wire_name(name: &str) -> String {
    name.to_lower_camel_case()
}

fn assign_ids(builder: &mut Builder) {
    for entity in &mut builder.entities {
        let id = entity.id;

        for (index, attribute) in entity.attributes.iter_mut().enumerate() {
            attribute.id = id.attribute(index);
        }

        for (index, relation) in entity.relations.iter_mut().enumerate() {
            relation.id = id.relation(index);
        }
    }
}

/// Variable, plural and table names. Relations read these from their target,
/// so this runs for every entity before any relation is named.
fn name_entities(builder: &mut Builder) {
    for entity in &mut builder.entities {
        if entity.variable.is_empty() {
            entity.variable = entity.name.to_lowercase();
        }

        if entity.plural.is_empty() {
            entity.plural = format!("{}s", entity.name);
        }

        entity.table = storage_name(&entity.plural);
    }
}

fn name_attributes(builder: &mut Builder) {
    for entity in &mut builder.entities {
        for attribute in &mut entity.attributes {
            attribute.variable = attribute.name.to_lowercase();
            attribute.column = storage_name(&attribute.name);
            attribute.wire_name = wire_name(&attribute.name);
        }
    }
}

fn link_relations(builder: &mut Builder) {
    let mut errors = vec![];

    // (plural, name) of every entity, by id
    let names: Vec<(String, String)> = builder
        .entities
        .iter()
        .map(|entity| (entity.plural.clone(), entity.name.clone()))
        .collect();

    for entity in &mut builder.entities {
        let attribute_variables: Vec<String> = entity
            .attributes
            .iter()
            .map(|attribute| attribute.variable.clone())
            .collect();

        for relation in &mut entity.relations {
            let target = builder.lookup.get(&relation.target_name).copied();

            let Some(target) = target else {
                errors.push(ModelError::UnknownTarget {
                    entity: entity.name.clone(),
                    relation: relation
                        .alias
                        .clone()
                        .unwrap_or_else(|| relation.target_name.clone()),
                    target: relation.target_name.clone(),
                });
                continue;
            };

            let (target_plural, target_name) = &names[target.0];

            relation.target = target;
            relation.name = match &relation.alias {
                Some(alias) => alias.clone(),
                None if relation.is_many() => target_plural.clone(),
                None => target_name.clone(),
            };

            relation.variable = relation.name.to_lowercase();
            if attribute_variables.contains(&relation.variable) {
                relation.variable.push_str("rel");
            }

            relation.wire_name = wire_name(&relation.name);

            if relation.is_singular() {
                relation.column = Some(format!("{}_id", storage_name(&relation.name)));
            }
        }
    }

    for err in errors {
        builder.report(err);
    }
}

/// A hasMany relation is stored through the first singular relation on its
/// target that points back at the owning entity.
fn pair_relations(builder: &mut Builder) {
    let mut pairs = vec![];

    for entity in &builder.entities {
        for relation in entity.relations.iter().filter(|r| r.is_many()) {
            if relation.target.is_placeholder() {
                continue;
            }

            let target = &builder.entities[relation.target.0];
            let pair = target
                .relations
                .iter()
                .find(|back| back.is_singular() && back.target == entity.id);

            match pair {
                Some(back) => pairs.push((relation.id, back.id)),
                None => log::warn!(
                    "relation `{}.{}` has no foreign key on `{}` pointing back",
                    entity.name,
                    relation.name,
                    target.name
                ),
            }
        }
    }

    for (id, pair) in pairs {
        builder.entities[id.entity.0].relations[id.index].pair = Some(pair);
    }
}

fn build_columns(builder: &mut Builder) {
    for entity in &mut builder.entities {
        let id = entity.id;
        let mut columns = vec![];

        for attribute in &mut entity.attributes {
            let column_id = column_at(id, columns.len());
            attribute.column_id = column_id;

            columns.push(Column {
                id: column_id,
                name: attribute.column.clone(),
                storage_ty: attribute.ty.mapping().storage,
                nullable: !attribute.is_required(),
                primary_key: attribute.is_id(),
                field: FieldId::Attribute(attribute.id),
                references: None,
            });
        }

        for relation in &mut entity.relations {
            let Some(name) = &relation.column else {
                continue;
            };

            let column_id = column_at(id, columns.len());
            relation.column_id = Some(column_id);

            columns.push(Column {
                id: column_id,
                name: name.clone(),
                storage_ty: StorageType::Varchar,
                nullable: !relation.is_required(),
                primary_key: false,
                field: FieldId::Relation(relation.id),
                references: Some(relation.target),
            });
        }

        entity.columns = columns;
    }
}

fn column_at(entity: EntityId, index: usize) -> ColumnId {
    ColumnId { entity, index }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_names() {
        assert_eq!(storage_name("ID"), "id");
        assert_eq!(storage_name("CreatedAt"), "created_at");
        assert_eq!(storage_name("Organizations"), "organizations");
        assert_eq!(storage_name("PointOfInterests"), "point_of_interests");
    }

    #[test]
    fn wire_names() {
        assert_eq!(wire_name("ID"), "id");
        assert_eq!(wire_name("CreatedBy"), "createdBy");
        assert_eq!(wire_name("Name"), "name");
    }
}
