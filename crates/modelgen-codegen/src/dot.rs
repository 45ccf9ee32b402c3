//! Graphviz diagram of entities, their attributes and relations.

use heck::ToSnakeCase;
use modelgen_core::Model;

use std::fmt::Write;

pub(crate) fn render(model: &Model) -> String {
    let mut dst = String::from("digraph G {\n");

    for entity in &model.entities {
        let node = entity.name.to_snake_case();
        let _ = writeln!(dst, "  {node} [label=\"{}\", shape=box];", entity.name);

        for attribute in entity.attributes.iter().filter(|attribute| !attribute.is_id()) {
            let attr_node = format!("{node}_{}", attribute.name.to_snake_case());
            let _ = writeln!(
                dst,
                "  {attr_node} [label=\"{}\", shape=ellipse];",
                attribute.name
            );
            let _ = writeln!(dst, "  {node} -> {attr_node} [style=dotted];");
        }
    }

    for entity in &model.entities {
        let node = entity.name.to_snake_case();

        for relation in &entity.relations {
            let target = model.entity(relation.target).name.to_snake_case();
            let _ = writeln!(
                dst,
                "  {node} -> {target} [label=\"{}\", style=bold];",
                relation.name
            );
        }
    }

    dst.push_str("}\n");
    dst
}
