use super::{util, Expand};

use heck::ToSnakeCase;
use modelgen_core::{
    artifact::{ArtifactGroup, ArtifactKind},
    schema::map_type,
};
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

/// Which runtime surface a generated function calls into.
#[derive(Copy, Clone)]
enum Target {
    /// `Db::persistence()`: storage only
    Persist,

    /// `Db` resolvers: pipeline, hooks and metrics
    Resolve,
}

impl Expand<'_> {
    pub(super) fn expand_persist_mod(&self) -> TokenStream {
        let model_ident = &self.ident;
        let functions = self
            .set
            .groups
            .iter()
            .map(|group| self.expand_function(group, Target::Persist));

        quote! {
            /// Transactional storage access, without hooks or metrics.
            pub mod persist {
                use super::{_modelgen, #model_ident};

                #( #functions )*
            }
        }
    }

    pub(super) fn expand_resolve_mod(&self) -> TokenStream {
        let model_ident = &self.ident;
        let functions = self
            .set
            .groups
            .iter()
            .map(|group| self.expand_function(group, Target::Resolve));

        quote! {
            /// Wire operation resolvers.
            pub mod resolve {
                use super::{_modelgen, #model_ident};

                #( #functions )*
            }
        }
    }

    fn expand_function(&self, group: &ArtifactGroup, target: Target) -> TokenStream {
        let modelgen = &self.modelgen;
        let model_ident = &self.ident;
        let variable = self.variable();

        let name = match target {
            Target::Persist => &group.persistence,
            Target::Resolve => &group.resolver,
        };
        let fn_ident = Ident::new(&name.to_snake_case(), Span::call_site());
        let doc = format!(" `{name}`");

        let db = match target {
            Target::Persist => quote!(db.persistence()),
            Target::Resolve => quote!(db),
        };

        let (args, ret, body) = match group.kind {
            ArtifactKind::Create | ArtifactKind::Update => {
                let method = match (group.kind, target) {
                    (ArtifactKind::Create, Target::Persist) => quote!(insert),
                    (ArtifactKind::Create, Target::Resolve) => quote!(create),
                    _ => quote!(update),
                };

                match target {
                    Target::Persist => (
                        quote!(#variable: #model_ident),
                        quote!(()),
                        quote! {
                            #db.#method(#model_ident::ENTITY, &#variable.into_record()).await
                        },
                    ),
                    Target::Resolve => (
                        quote!(#variable: #model_ident),
                        quote!(#model_ident),
                        quote! {
                            let record = #db.#method(#model_ident::ENTITY, #variable.into_record()).await?;
                            #model_ident::from_record(&record)
                        },
                    ),
                }
            }
            ArtifactKind::Delete => (
                quote!(id: &str),
                quote!(#model_ident),
                quote! {
                    let record = #db.delete(#model_ident::ENTITY, id).await?;
                    #model_ident::from_record(&record)
                },
            ),
            ArtifactKind::FindBy { attribute } => {
                let attribute = &self.entity.attributes[attribute.index];
                let name = &attribute.name;
                let arg = util::ident(name);
                let ty = util::native_arg_ty(map_type(&attribute.ty).native);

                (
                    quote!(#arg: #ty),
                    quote!(#model_ident),
                    quote! {
                        let record = #db.find_by(#model_ident::ENTITY, #name, #arg).await?;
                        #model_ident::from_record(&record)
                    },
                )
            }
            ArtifactKind::FindManyBy { relation } => {
                let relation = &self.entity.relations[relation.index];
                let name = &relation.name;
                let arg = util::ident(&relation.wire_name);

                (
                    quote!(#arg: &str, page: #modelgen::Page),
                    quote!(#modelgen::Vec<#model_ident>),
                    quote! {
                        let records = #db.find_many_by(#model_ident::ENTITY, #name, #arg, page).await?;
                        records.iter().map(#model_ident::from_record).collect()
                    },
                )
            }
            ArtifactKind::FindAll => (
                quote!(page: #modelgen::Page),
                quote!(#modelgen::Vec<#model_ident>),
                quote! {
                    let records = #db.find_all(#model_ident::ENTITY, page).await?;
                    records.iter().map(#model_ident::from_record).collect()
                },
            ),
        };

        quote! {
            #[doc = #doc]
            pub async fn #fn_ident(db: &#modelgen::Db, #args) -> #modelgen::Result<#ret> {
                #body
            }
        }
    }
}
