//! Literal values inside `#[strategic(...)]`.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

fn wrong_kind(literal: &Lit, key: &str, expected: &str) -> syn::Error {
    syn::Error::new(literal.span(), format!("{key} must be a {expected}"))
}

/// Reads the string in `key = "..."`.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Str(value) => Ok(value),
        other => Err(wrong_kind(&other, key, "string")),
    }
}

pub(crate) fn lit_bool(meta: &ParseNestedMeta, key: &str) -> syn::Result<bool> {
    match meta.value()?.parse::<Lit>()? {
        Lit::Bool(value) => Ok(value.value),
        other => Err(wrong_kind(&other, key, "bool")),
    }
}
