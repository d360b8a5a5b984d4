//! Procedural macros for `docmerge`.
//!
//! `#[derive(StrategicMerge)]` resolves the merge policy of every named field
//! of a struct into a static [`Schema`] table. Maps default to key union,
//! every other field (vectors included) to replacement. Field attributes
//! adjust the defaults:
//!
//! - `#[strategic(merge = "list")]` merges a `Vec` as an order-preserving
//!   union, optionally matching object elements by `key = "field"`;
//! - `#[strategic(merge = "map")]` and `#[strategic(merge = "replace")]`
//!   force the map or replacement policy;
//! - `#[strategic(nested)]` merges the field's own type (or the element or
//!   value type of a collection) with that type's derived schema.
//!
//! The struct-level `#[strategic(crate = "path")]` attribute points generated
//! code at a renamed `docmerge` dependency.
//!
//! [`Schema`]: https://docs.rs/docmerge/latest/docmerge/struct.Schema.html

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `docmerge::StrategicMerge`.
#[proc_macro_derive(StrategicMerge, attributes(strategic))]
pub fn derive_strategic_merge(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
