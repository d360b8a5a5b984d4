//! Shallow inspection of field types.
//!
//! Only the last path segment is compared, so `Vec<T>`, `std::vec::Vec<T>`
//! and `crate::vec::Vec<T>` all match. Aliases are not seen through: a field
//! typed through an alias falls back to `Replace` unless annotated.

use syn::{GenericArgument, PathArguments, Type};

/// Type arguments of `ty` when its last path segment is `name`.
fn type_args<'a>(ty: &'a Type, name: &str) -> Option<Vec<&'a Type>> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != name {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    Some(
        args.args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(inner) => Some(inner),
                _ => None,
            })
            .collect(),
    )
}

fn single_arg<'a>(ty: &'a Type, name: &str) -> Option<&'a Type> {
    type_args(ty, name)?.first().copied()
}

fn key_value_args<'a>(ty: &'a Type, name: &str) -> Option<(&'a Type, &'a Type)> {
    match type_args(ty, name)?.as_slice() {
        [key, value, ..] => Some((*key, *value)),
        _ => None,
    }
}

/// Peel every `Option` and `Presence` layer off `ty`.
///
/// Both wrappers encode as the wrapped value or `null`, so they never change
/// the policy a field gets.
pub(crate) fn strip_wrappers(mut ty: &Type) -> &Type {
    while let Some(inner) = single_arg(ty, "Option").or_else(|| single_arg(ty, "Presence")) {
        ty = inner;
    }
    ty
}

/// Element type of `Vec<T>`.
pub(crate) fn vec_inner(ty: &Type) -> Option<&Type> {
    single_arg(ty, "Vec")
}

/// Key and value types of `BTreeMap<K, V>`.
pub(crate) fn btree_map_inner(ty: &Type) -> Option<(&Type, &Type)> {
    key_value_args(ty, "BTreeMap")
}

/// Key and value types of `HashMap<K, V, S>`; the hasher is ignored.
pub(crate) fn hash_map_inner(ty: &Type) -> Option<(&Type, &Type)> {
    key_value_args(ty, "HashMap")
}
