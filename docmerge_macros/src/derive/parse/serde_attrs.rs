//! Field keys as serde emits them.
//!
//! A schema is looked up by encoded key, so the derive has to agree with
//! serde on renames and on which fields never reach the output.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Field, LitStr, Token};

type Rule = fn(&str) -> String;

const RULES: [(&str, Rule); 8] = [
    ("lowercase", str::to_ascii_lowercase),
    ("UPPERCASE", str::to_ascii_uppercase),
    ("PascalCase", <str as ToUpperCamelCase>::to_upper_camel_case),
    ("camelCase", <str as ToLowerCamelCase>::to_lower_camel_case),
    ("snake_case", <str as ToSnakeCase>::to_snake_case),
    ("SCREAMING_SNAKE_CASE", <str as ToShoutySnakeCase>::to_shouty_snake_case),
    ("kebab-case", <str as ToKebabCase>::to_kebab_case),
    ("SCREAMING-KEBAB-CASE", <str as ToShoutyKebabCase>::to_shouty_kebab_case),
];

/// A container-level `rename_all` rule.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SerdeRenameAll(Rule);

impl SerdeRenameAll {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        let requested = value.value();
        RULES
            .iter()
            .find(|(name, _)| *name == requested)
            .map(|&(_, rule)| Self(rule))
            .ok_or_else(|| {
                let known = RULES.map(|(name, _)| format!("\"{name}\"")).join(", ");
                syn::Error::new(
                    value.span(),
                    format!("unsupported serde rename_all value '{requested}'; expected one of {known}"),
                )
            })
    }
}

fn for_each_serde_item<F>(attrs: &[Attribute], mut visit: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("serde"))
        .try_for_each(|attr| attr.parse_nested_meta(|meta| visit(&meta)))
}

/// The serialising half of `name = "..."` or `name(serialize = "...")`.
fn serialize_value(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return meta.value()?.parse().map(Some);
    }
    let mut found = None;
    if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| {
            if !inner.path.is_ident("serialize") {
                return super::discard_unknown(&inner);
            }
            found = Some(inner.value()?.parse()?);
            Ok(())
        })?;
    }
    Ok(found)
}

fn renamed(attrs: &[Attribute], item: &str) -> syn::Result<Option<LitStr>> {
    let mut value = None;
    for_each_serde_item(attrs, |meta| {
        if !meta.path.is_ident(item) {
            return super::discard_unknown(meta);
        }
        if let Some(found) = serialize_value(meta)? {
            value = Some(found);
        }
        Ok(())
    })?;
    Ok(value)
}

/// Reads the struct's `#[serde(rename_all = "...")]`, if any.
pub(crate) fn serde_rename_all(attrs: &[Attribute]) -> syn::Result<Option<SerdeRenameAll>> {
    renamed(attrs, "rename_all")?
        .map(|value| SerdeRenameAll::parse(&value))
        .transpose()
}

/// The key serde writes `field` under.
///
/// A field-level `rename` beats the container rule; raw identifiers lose
/// their `r#` prefix as they do in serde.
pub(crate) fn serde_serialized_field_key(
    field: &Field,
    rename_all: Option<SerdeRenameAll>,
) -> syn::Result<String> {
    let Some(ident) = &field.ident else {
        return Err(syn::Error::new_spanned(field, "StrategicMerge requires named fields"));
    };
    if let Some(rename) = renamed(&field.attrs, "rename")? {
        return Ok(rename.value());
    }
    let name = ident.unraw().to_string();
    let Some(SerdeRenameAll(rule)) = rename_all else {
        return Ok(name);
    };
    Ok(rule(&name))
}

/// Whether serde leaves the field out of every encoding.
///
/// `skip` and `skip_serializing` count; `skip_serializing_if` does not.
/// `flatten` is an error because its keys belong to another type.
pub(crate) fn serde_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skipped = false;
    for_each_serde_item(attrs, |meta| {
        if meta.path.is_ident("flatten") {
            return Err(meta.error("StrategicMerge does not support flattened fields"));
        }
        if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
            skipped = true;
            return Ok(());
        }
        super::discard_unknown(meta)
    })?;
    Ok(skipped)
}
