//! Token generation for the `StrategicMerge` implementation.

use proc_macro2::TokenStream;
use quote::quote;

use super::policy::{FieldSpec, PolicySpec};

/// Generate the tokens constructing `policy`.
fn policy_tokens(krate: &TokenStream, policy: &PolicySpec) -> TokenStream {
    let schema_ref = |ty: &syn::Type| quote! { #krate::SchemaRef::of::<#ty>() };
    match policy {
        PolicySpec::Replace => quote! { #krate::FieldPolicy::Replace },
        PolicySpec::Map { values } => {
            let values = values.as_ref().map_or_else(
                || quote! { ::core::option::Option::None },
                |ty| {
                    let schema = schema_ref(ty);
                    quote! { ::core::option::Option::Some(#schema) }
                },
            );
            quote! { #krate::FieldPolicy::MergeMap { values: #values } }
        }
        PolicySpec::List { key, elements } => {
            let key = key.as_ref().map_or_else(
                || quote! { ::core::option::Option::None },
                |key| quote! { ::core::option::Option::Some(::std::string::String::from(#key)) },
            );
            let elements = elements.as_ref().map_or_else(
                || quote! { ::core::option::Option::None },
                |ty| {
                    let schema = schema_ref(ty);
                    quote! { ::core::option::Option::Some(#schema) }
                },
            );
            quote! { #krate::FieldPolicy::MergeList { key: #key, elements: #elements } }
        }
        PolicySpec::Nested { schema } => {
            let schema = schema_ref(schema);
            quote! { #krate::FieldPolicy::Nested { schema: #schema } }
        }
    }
}

/// Generate `impl StrategicMerge for #ident`.
///
/// The schema is built on first use and cached in a function-local
/// `OnceLock`. Nested schemas are referenced through their `schema`
/// function, so recursive types never re-enter their own initialiser.
pub(crate) fn schema_impl(krate: &TokenStream, ident: &syn::Ident, fields: &[FieldSpec]) -> TokenStream {
    let name = ident.to_string();
    let keys = fields.iter().map(|field| &field.key);
    let policies = fields.iter().map(|field| policy_tokens(krate, &field.policy));
    quote! {
        impl #krate::StrategicMerge for #ident {
            fn schema() -> &'static #krate::Schema {
                static SCHEMA: ::std::sync::OnceLock<#krate::Schema> = ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    #krate::Schema::builder(#name)
                        #( .field(#keys, #policies) )*
                        .build()
                })
            }
        }
    }
}
