use heck::{ToSnakeCase, ToUpperCamelCase};
use modelgen_core::schema::NativeType;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// A snake_case identifier. Keywords become raw identifiers; the few that
/// cannot be raw get a trailing underscore.
pub(super) fn ident(name: &str) -> Ident {
    let name = name.to_snake_case();

    match name.as_str() {
        "self" | "super" | "crate" => Ident::new(&format!("{name}_"), Span::call_site()),
        name if KEYWORDS.contains(&name) => Ident::new_raw(name, Span::call_site()),
        name => Ident::new(name, Span::call_site()),
    }
}

pub(super) fn type_ident(name: &str) -> Ident {
    match name.to_upper_camel_case().as_str() {
        "Self" => Ident::new("Self_", Span::call_site()),
        name => Ident::new(name, Span::call_site()),
    }
}

pub(super) fn native_ty(native: NativeType) -> TokenStream {
    match native {
        NativeType::I32 => quote!(i32),
        NativeType::F64 => quote!(f64),
        NativeType::Bool => quote!(bool),
        NativeType::String => quote!(String),
    }
}

/// Finder arguments borrow strings.
pub(super) fn native_arg_ty(native: NativeType) -> TokenStream {
    match native {
        NativeType::String => quote!(&str),
        native => native_ty(native),
    }
}
