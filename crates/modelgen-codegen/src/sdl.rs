//! GraphQL schema definition for the wire operations.

use modelgen_core::{schema::map_type, Plan};

use std::fmt::Write;

pub(crate) fn render(plan: &Plan) -> String {
    let model = &plan.model;
    let mut dst = String::new();

    let has_mutations = plan.operations.groups().any(|group| group.wire.is_mutation());
    let has_queries = plan.operations.groups().any(|group| !group.wire.is_mutation());

    dst.push_str("schema {\n");
    if has_queries {
        dst.push_str("  query: Query\n");
    }
    if has_mutations {
        dst.push_str("  mutation: Mutation\n");
    }
    dst.push_str("}\n");

    for ty in model.types.iter().filter(|ty| ty.is_enum()) {
        let _ = writeln!(dst, "\nenum {} {{", ty.name);
        for value in &ty.values {
            let _ = writeln!(dst, "  {value}");
        }
        dst.push_str("}\n");
    }

    for ty in model.types.iter().filter(|ty| ty.is_union()) {
        let _ = writeln!(dst, "\nunion {} = {}", ty.name, ty.values.join(" | "));
    }

    for entity in &model.entities {
        let _ = writeln!(dst, "\ntype {} {{", entity.name);

        for attribute in &entity.attributes {
            let wire = map_type(&attribute.ty).wire;
            let _ = writeln!(dst, "  {}: {wire}!", attribute.wire_name);
        }

        for relation in &entity.relations {
            let target = &model.entity(relation.target).name;
            if relation.is_many() {
                let _ = writeln!(dst, "  {}: [{target}!]", relation.wire_name);
            } else {
                let _ = writeln!(dst, "  {}: {target}!", relation.wire_name);
            }
        }

        dst.push_str("}\n");
    }

    if has_mutations {
        dst.push_str("\ntype Mutation {\n");
        for group in plan.operations.groups().filter(|group| group.wire.is_mutation()) {
            let _ = writeln!(dst, "  {}", group.wire.signature());
        }
        dst.push_str("}\n");
    }

    if has_queries {
        dst.push_str("\ntype Query {\n");
        for group in plan.operations.groups().filter(|group| !group.wire.is_mutation()) {
            let _ = writeln!(dst, "  {}", group.wire.signature());
        }
        dst.push_str("}\n");
    }

    dst
}
