mod functions;
mod model;
mod record;
mod util;

use modelgen_core::{
    artifact::OperationSet,
    schema::{Attribute, Entity, Relation},
    Model, Plan,
};

use heck::ToSnakeCase;
use proc_macro2::{Ident, TokenStream};
use quote::quote;

struct Expand<'a> {
    /// The entity being expanded
    entity: &'a Entity,

    /// Artifact groups of the entity, in order
    set: &'a OperationSet,

    /// Struct name
    ident: Ident,

    fields: Vec<Field<'a>>,

    /// Path prefix for runtime types
    modelgen: TokenStream,
}

/// One struct field, backed by an attribute or a relation.
struct Field<'a> {
    ident: Ident,
    ty: FieldTy<'a>,
}

enum FieldTy<'a> {
    Attribute(&'a Attribute),
    Relation {
        relation: &'a Relation,

        /// Target struct, reached through the parent module
        target: Ident,
    },
}

impl<'a> Expand<'a> {
    fn new(plan: &'a Plan, entity: &'a Entity) -> Expand<'a> {
        Expand {
            entity,
            set: plan.operations.for_entity(entity),
            ident: util::type_ident(&entity.name),
            fields: Field::build(&plan.model, entity),
            modelgen: quote!(_modelgen),
        }
    }

    fn expand(&self) -> TokenStream {
        let model_struct = self.expand_model_struct();
        let model_impl = self.expand_model_impl();
        let persist_mod = self.expand_persist_mod();
        let resolve_mod = self.expand_resolve_mod();

        quote! {
            use modelgen::codegen_support as _modelgen;

            #model_struct
            #model_impl
            #persist_mod
            #resolve_mod
        }
    }

    /// Name of the entity parameter in generated functions
    fn variable(&self) -> Ident {
        util::ident(&self.entity.variable)
    }
}

impl<'a> Field<'a> {
    fn build(model: &'a Model, entity: &'a Entity) -> Vec<Field<'a>> {
        let mut fields: Vec<Field<'a>> = entity
            .attributes
            .iter()
            .map(|attribute| Field {
                ident: util::ident(&attribute.name),
                ty: FieldTy::Attribute(attribute),
            })
            .collect();

        for relation in &entity.relations {
            let mut name = relation.name.to_snake_case();
            if entity
                .attributes
                .iter()
                .any(|attribute| attribute.name.to_snake_case() == name)
            {
                name.push_str("_rel");
            }

            fields.push(Field {
                ident: util::ident(&name),
                ty: FieldTy::Relation {
                    relation,
                    target: util::type_ident(&model.entity(relation.target).name),
                },
            });
        }

        fields
    }
}

/// The Rust module for one entity: its struct, record conversions,
/// persistence functions and resolvers.
pub fn entity_module(plan: &Plan, entity: &Entity) -> TokenStream {
    Expand::new(plan, entity).expand()
}

/// `mod.rs` declaring every entity module and re-exporting its struct.
pub fn mod_file(model: &Model) -> TokenStream {
    let items = model.entities.iter().map(|entity| {
        let module = util::ident(&module_name(entity));
        let ident = util::type_ident(&entity.name);

        quote! {
            pub mod #module;
            pub use #module::#ident;
        }
    });

    quote!(#( #items )*)
}

pub(crate) fn module_name(entity: &Entity) -> String {
    entity.name.to_snake_case()
}
