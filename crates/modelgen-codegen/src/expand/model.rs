use super::{util, Expand, FieldTy};

use modelgen_core::schema::map_type;
use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_model_struct(&self) -> TokenStream {
        let modelgen = &self.modelgen;
        let model_ident = &self.ident;

        let fields = self.fields.iter().map(|field| {
            let ident = &field.ident;

            let ty = match &field.ty {
                FieldTy::Attribute(attribute) => {
                    let native = util::native_ty(map_type(&attribute.ty).native);
                    if attribute.is_required() {
                        native
                    } else {
                        quote!(#modelgen::Option<#native>)
                    }
                }
                FieldTy::Relation { relation, target } if relation.is_many() => {
                    quote!(#modelgen::Vec<super::#target>)
                }
                FieldTy::Relation { target, .. } => {
                    quote!(#modelgen::Option<#modelgen::Box<super::#target>>)
                }
            };

            quote!(pub #ident: #ty,)
        });

        quote! {
            #[derive(Debug, Clone, Default, PartialEq)]
            pub struct #model_ident {
                #( #fields )*
            }
        }
    }

    pub(super) fn expand_model_impl(&self) -> TokenStream {
        let modelgen = &self.modelgen;
        let model_ident = &self.ident;
        let entity_name = &self.entity.name;
        let id = util::ident(&self.entity.primary_key().name);
        let into_record_body = self.expand_into_record_body();
        let from_record_body = self.expand_from_record_body();

        quote! {
            impl #model_ident {
                pub const ENTITY: &'static str = #entity_name;

                /// Points a relation at an existing record.
                pub fn reference(id: impl #modelgen::Into<#modelgen::String>) -> #model_ident {
                    #model_ident {
                        #id: id.into(),
                        ..#modelgen::Default::default()
                    }
                }

                pub fn into_record(self) -> #modelgen::Record {
                    #into_record_body
                }

                pub fn from_record(record: &#modelgen::Record) -> #modelgen::Result<#model_ident> {
                    #from_record_body
                }
            }
        }
    }
}
