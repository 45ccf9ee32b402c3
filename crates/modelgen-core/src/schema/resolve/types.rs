use super::super::{builder::Builder, AttrType, UdKind};
use crate::ModelError;

use indexmap::IndexMap;

pub(crate) fn resolve(builder: &mut Builder) {
    flatten_unions(builder);
    check_attribute_types(builder);
}

/// Replace each reference to another type inside a union with that type's
/// values. Only one level is supported: referencing another union is an
/// error.
fn flatten_unions(builder: &mut Builder) {
    // Kinds and values as declared, so flattening one union never changes
    // what another one sees.
    let declared: IndexMap<String, (UdKind, Vec<String>)> = builder
        .types
        .iter()
        .map(|ty| (ty.name.clone(), (ty.kind, ty.values.clone())))
        .collect();

    let mut errors = vec![];

    for ty in &mut builder.types {
        if ty.kind != UdKind::Union {
            continue;
        }

        let mut values = vec![];
        let mut substituted = false;

        for value in &ty.values {
            match declared.get(value) {
                Some((UdKind::Union, _)) => errors.push(ModelError::NestedUnion {
                    ty: ty.name.clone(),
                    value: value.clone(),
                }),
                Some((UdKind::Enum, referenced)) => {
                    values.extend(referenced.iter().cloned());
                    substituted = true;
                }
                None => values.push(value.clone()),
            }
        }

        ty.values = values;
        if substituted {
            ty.kind = UdKind::Enum;
        }
    }

    for err in errors {
        builder.report(err);
    }
}

fn check_attribute_types(builder: &mut Builder) {
    let mut errors = vec![];

    for entity in &builder.entities {
        for attribute in &entity.attributes {
            if let AttrType::UserDefined(name) = &attribute.ty {
                if !builder.types.iter().any(|ty| &ty.name == name) {
                    errors.push(ModelError::UnknownType {
                        entity: entity.name.clone(),
                        attribute: attribute.name.clone(),
                        ty: name.clone(),
                    });
                }
            }
        }
    }

    for err in errors {
        builder.report(err);
    }
}
