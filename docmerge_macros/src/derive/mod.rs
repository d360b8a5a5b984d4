//! Expansion of `#[derive(StrategicMerge)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;
mod policy;

/// Expand the derive for `input`.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    let fields = parsed
        .fields
        .iter()
        .map(policy::resolve)
        .collect::<syn::Result<Vec<_>>>()?;
    Ok(generate::schema_impl(&krate, &parsed.ident, &fields))
}

#[cfg(test)]
mod tests;
