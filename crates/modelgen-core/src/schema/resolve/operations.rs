use super::super::{builder::Builder, Operation};
use crate::ModelError;

pub(crate) fn resolve(builder: &mut Builder) {
    let mut errors = vec![];

    for (entity, raw) in builder.entities.iter_mut().zip(&builder.raw_operations) {
        if raw.is_empty() {
            entity.operations = Operation::DEFAULT.to_vec();
            continue;
        }

        for name in raw {
            match Operation::from_name(name) {
                Some(operation) if !entity.operations.contains(&operation) => {
                    entity.operations.push(operation)
                }
                Some(_) => {}
                None => errors.push(ModelError::InvalidOperation {
                    entity: entity.name.clone(),
                    operation: name.clone(),
                }),
            }
        }
    }

    for err in errors {
        builder.report(err);
    }
}
