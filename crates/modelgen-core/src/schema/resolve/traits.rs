use super::super::{
    builder::Builder, AttrType, Attribute, Cardinality, Entity, Modifier, Modifiers, Relation,
};
use crate::ModelError;

use Modifier::*;

pub(crate) fn expand_all(builder: &mut Builder) {
    let strict = builder.options.strict_traits;
    let mut unknown = vec![];

    for entity in &mut builder.entities {
        for name in expand(entity) {
            if strict {
                unknown.push(ModelError::UnknownTrait {
                    entity: entity.name.clone(),
                    name,
                });
            } else {
                log::warn!("ignoring unknown trait `{name}` on entity `{}`", entity.name);
            }
        }
    }

    for err in unknown {
        builder.report(err);
    }
}

/// Append the members of every trait on `entity`, in declaration order.
/// Returns the trait names that have no expansion.
pub(crate) fn expand(entity: &mut Entity) -> Vec<String> {
    let mut unknown = vec![];

    for name in entity.traits.clone() {
        let Some((attributes, relations)) = expansion(&name) else {
            unknown.push(name);
            continue;
        };

        entity.attributes.extend(attributes);
        entity.relations.extend(relations);
    }

    unknown
}

fn expansion(name: &str) -> Option<(Vec<Attribute>, Vec<Relation>)> {
    let key = || Modifiers::from([Required, Unique, Indexed]);

    Some(match name {
        "id" => (vec![Attribute::new("ID", AttrType::Id, key())], vec![]),
        "keys" => (
            vec![
                Attribute::new("ID", AttrType::Id, key()),
                Attribute::new("Name", AttrType::String, key()),
            ],
            vec![],
        ),
        "timestamps" => (
            vec![
                Attribute::new("CreatedAt", AttrType::Time, [Required, Generated].into()),
                Attribute::new("UpdatedAt", AttrType::Time, [Required, Generated].into()),
            ],
            vec![],
        ),
        "authors" => (
            vec![],
            vec![
                user("CreatedBy", [Required, HasOne, Generated].into()),
                user("UpdatedBy", [Required, HasOne, Generated].into()),
            ],
        ),
        "owner" => (vec![], vec![user("Owner", [Required, HasOne].into())]),
        _ => return None,
    })
}

fn user(alias: &str, modifiers: Modifiers) -> Relation {
    Relation::new(Some(alias.to_string()), "User", Cardinality::HasOne, modifiers)
}
