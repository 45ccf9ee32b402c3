use super::super::{builder::Builder, FieldId};
use crate::ModelError;

use std::collections::HashSet;

pub(crate) fn verify(builder: &mut Builder) {
    let mut errors = vec![];

    for entity in &builder.entities {
        if !entity.attributes.iter().any(|attribute| attribute.is_id()) {
            errors.push(ModelError::MissingPrimaryKey {
                entity: entity.name.clone(),
            });
        }

        // Relations with unknown targets were never named; they already
        // produced an error.
        let mut relation_names = HashSet::new();
        let mut collided = HashSet::new();
        for relation in entity.relations.iter().filter(|r| !r.name.is_empty()) {
            if !relation_names.insert(&relation.name) {
                collided.insert(relation.id);
                errors.push(ModelError::NamingCollision {
                    entity: entity.name.clone(),
                    name: relation.name.clone(),
                });
            }
        }

        // Attributes and relations share the wire namespace
        for relation in entity.relations.iter().filter(|r| !r.name.is_empty()) {
            if collided.contains(&relation.id) {
                continue;
            }

            let clashes = entity
                .attributes
                .iter()
                .any(|attribute| attribute.wire_name == relation.wire_name);
            if clashes {
                collided.insert(relation.id);
                errors.push(ModelError::NamingCollision {
                    entity: entity.name.clone(),
                    name: relation.name.clone(),
                });
            }
        }

        let mut columns = HashSet::new();
        for column in &entity.columns {
            let reported = matches!(column.field, FieldId::Relation(id) if collided.contains(&id));

            if !columns.insert(&column.name) && !reported {
                errors.push(ModelError::NamingCollision {
                    entity: entity.name.clone(),
                    name: column.name.clone(),
                });
            }
        }
    }

    for err in errors {
        builder.report(err);
    }
}
