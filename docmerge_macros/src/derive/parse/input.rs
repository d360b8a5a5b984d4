//! Input parsing for the `StrategicMerge` derive macro.
//!
//! This module gathers the struct identifier, its fields and their attribute
//! metadata in one pass so expansion can fail fast with useful errors.

use syn::{Data, DeriveInput, Fields};

use super::{
    FieldAttrs, StructAttrs, parse_field_attrs, parse_struct_attrs, serde_rename_all,
    serde_serialized_field_key, serde_skipped,
};

/// A named field that takes part in the encoded document.
pub(crate) struct ParsedField {
    /// Key serde emits for the field.
    pub key: String,
    pub field: syn::Field,
    pub attrs: FieldAttrs,
}

/// Everything the generator needs from the derive input.
pub(crate) struct ParsedInput {
    pub ident: syn::Ident,
    pub fields: Vec<ParsedField>,
    pub struct_attrs: StructAttrs,
}

/// Gathers information from the user-provided struct.
///
/// Generic structs, tuple structs, unit structs, enums and unions are
/// rejected. Fields marked `#[serde(skip)]` (or `skip_serializing`) never
/// appear in a document and are left out.
pub(crate) fn parse_input(input: &DeriveInput) -> Result<ParsedInput, syn::Error> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "StrategicMerge cannot be derived for generic types",
        ));
    }
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "StrategicMerge requires named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "StrategicMerge can only be derived for structs",
            ));
        }
    };

    let rename_all = serde_rename_all(&input.attrs)?;
    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let attrs = parse_field_attrs(&field.attrs)?;
        if serde_skipped(&field.attrs)? {
            continue;
        }
        fields.push(ParsedField {
            key: serde_serialized_field_key(field, rename_all)?,
            field: field.clone(),
            attrs,
        });
    }
    Ok(ParsedInput {
        ident: input.ident.clone(),
        fields,
        struct_attrs,
    })
}
