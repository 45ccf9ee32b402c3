use crate::Record;

use modelgen_core::{
    schema::{AttrType, Entity, NativeType},
    Error, Model, Result,
};

/// Check a record against its entity before it is written.
pub(crate) fn validate(model: &Model, entity: &Entity, record: &Record) -> Result<()> {
    for attribute in &entity.attributes {
        let field = || format!("{}.{}", entity.name, attribute.name);
        let value = record.get(&attribute.name);

        if value.is_null() {
            if attribute.is_required() {
                return Err(Error::validation(field(), "a value is required"));
            }
            continue;
        }

        let native = attribute.ty.mapping().native;
        if !value.fits(native) {
            return Err(Error::validation(
                field(),
                format!("expected {}, got {}", native_name(native), value.type_name()),
            ));
        }

        if let AttrType::UserDefined(name) = &attribute.ty {
            let Some(ud_type) = model.ud_type(name) else {
                continue;
            };

            if let Some(value) = value.as_str() {
                if !ud_type.contains(value) {
                    return Err(Error::validation(
                        field(),
                        format!("`{value}` is not a value of `{name}`"),
                    ));
                }
            }
        }
    }

    for relation in entity.singular_relations() {
        if relation.is_required() && record.related_id(&relation.name).is_none() {
            return Err(Error::validation(
                format!("{}.{}", entity.name, relation.name),
                format!("a related `{}` is required", relation.target_name),
            ));
        }
    }

    Ok(())
}

fn native_name(native: NativeType) -> &'static str {
    match native {
        NativeType::I32 => "i32",
        NativeType::F64 => "f64",
        NativeType::Bool => "bool",
        NativeType::String => "string",
    }
}
