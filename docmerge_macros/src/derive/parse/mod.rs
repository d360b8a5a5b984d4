//! Parsing utilities for the `StrategicMerge` derive macro.

use syn::{Attribute, Token, parenthesized};

mod input;
mod literals;
mod serde_attrs;
#[cfg(test)]
mod tests;
mod type_utils;

pub(crate) use input::{ParsedField, parse_input};
use literals::{lit_bool, lit_str};
use serde_attrs::{serde_rename_all, serde_serialized_field_key, serde_skipped};
pub(crate) use type_utils::{btree_map_inner, hash_map_inner, strip_wrappers, vec_inner};

/// Struct-level attributes recognised by `#[derive(StrategicMerge)]`.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[strategic(crate = "merge_alias")]`, generated code
    /// references types through `merge_alias::` instead of `docmerge::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(StrategicMerge)]`.
///
/// - `merge` forces a policy instead of the one inferred from the type.
/// - `key` names the identity field of a list of objects.
/// - `nested` attaches the derived schema of the field's type.
#[derive(Default, Clone)]
pub(crate) struct FieldAttrs {
    pub merge: Option<MergeKind>,
    pub key: Option<syn::LitStr>,
    pub nested: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MergeKind {
    Replace,
    Map,
    List,
}

impl MergeKind {
    pub(crate) fn parse(s: &str, span: proc_macro2::Span) -> Result<Self, syn::Error> {
        match s {
            "replace" => Ok(Self::Replace),
            "map" => Ok(Self::Map),
            "list" => Ok(Self::List),
            _ => Err(syn::Error::new(
                span,
                format!("unknown merge policy '{s}'; expected one of \"replace\", \"map\", or \"list\""),
            )),
        }
    }
}

/// Iterate all `#[strategic(...)]` attributes once and apply a callback.
fn parse_strategic<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&syn::meta::ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("strategic")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[strategic(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised; any other key is an error so typos surface at
/// compile time.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs::default();
    parse_strategic(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            return Ok(());
        }
        discard_unknown(meta)?;
        Err(meta.error("unknown strategic struct attribute; expected `crate`"))
    })?;
    Ok(out)
}

/// Applies a recognised field attribute, returning `true` if handled.
fn apply_field_attr(
    meta: &syn::meta::ParseNestedMeta,
    out: &mut FieldAttrs,
) -> Result<bool, syn::Error> {
    let Some(ident) = meta.path.get_ident() else {
        return Ok(false);
    };
    match ident.to_string().as_str() {
        "merge" => {
            let s = lit_str(meta, "merge")?;
            out.merge = Some(MergeKind::parse(&s.value(), s.span())?);
            Ok(true)
        }
        "key" => {
            out.key = Some(lit_str(meta, "key")?);
            Ok(true)
        }
        "nested" => {
            // Accept both `nested` and `nested = true`.
            out.nested = if meta.input.peek(Token![=]) {
                lit_bool(meta, "nested")?
            } else {
                true
            };
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Parses field-level `#[strategic(...)]` attributes.
///
/// Recognised keys are `merge`, `key` and `nested`. Unknown keys are
/// rejected.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs, syn::Error> {
    let mut out = FieldAttrs::default();
    parse_strategic(attrs, |meta| {
        if apply_field_attr(meta, &mut out)? {
            return Ok(());
        }
        discard_unknown(meta)?;
        Err(meta.error("unknown strategic field attribute; expected `merge`, `key`, or `nested`"))
    })?;
    Ok(out)
}
