use super::{Expand, FieldTy};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_into_record_body(&self) -> TokenStream {
        let modelgen = &self.modelgen;

        let sets = self.fields.iter().map(|field| {
            let ident = &field.ident;

            match &field.ty {
                FieldTy::Attribute(attribute) => {
                    let name = &attribute.name;
                    quote!(record.set(#name, self.#ident);)
                }
                FieldTy::Relation { relation, target } if relation.is_many() => {
                    let name = &relation.name;
                    quote! {
                        if !self.#ident.is_empty() {
                            record.set_many(
                                #name,
                                self.#ident.into_iter().map(super::#target::into_record).collect(),
                            );
                        }
                    }
                }
                FieldTy::Relation { relation, .. } => {
                    let name = &relation.name;
                    quote! {
                        if let #modelgen::Option::Some(related) = self.#ident {
                            record.set_one(#name, related.into_record());
                        }
                    }
                }
            }
        });

        quote! {
            let mut record = #modelgen::Record::new();
            #( #sets )*
            record
        }
    }

    pub(super) fn expand_from_record_body(&self) -> TokenStream {
        let modelgen = &self.modelgen;
        let model_ident = &self.ident;

        let loads = self.fields.iter().map(|field| {
            let ident = &field.ident;

            match &field.ty {
                FieldTy::Attribute(attribute) => {
                    let name = &attribute.name;
                    quote!(#ident: record.load(#name)?,)
                }
                FieldTy::Relation { relation, target } if relation.is_many() => {
                    let name = &relation.name;
                    quote! {
                        #ident: match record.many(#name) {
                            #modelgen::Option::Some(related) => related
                                .iter()
                                .map(super::#target::from_record)
                                .collect::<#modelgen::Result<_>>()?,
                            #modelgen::Option::None => #modelgen::Vec::new(),
                        },
                    }
                }
                // Singular relations load as references holding only the `ID`
                FieldTy::Relation { relation, target } => {
                    let name = &relation.name;
                    quote! {
                        #ident: match record.one(#name) {
                            #modelgen::Option::Some(related) => #modelgen::Option::Some(
                                #modelgen::Box::new(super::#target::reference(
                                    related.load::<#modelgen::String>("ID")?,
                                )),
                            ),
                            #modelgen::Option::None => #modelgen::Option::None,
                        },
                    }
                }
            }
        });

        quote! {
            Ok(#model_ident {
                #( #loads )*
            })
        }
    }
}
