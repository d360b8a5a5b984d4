//! Resolution of a field's merge policy from its type and attributes.

use syn::Type;

use super::parse::{
    MergeKind, ParsedField, btree_map_inner, hash_map_inner, strip_wrappers, vec_inner,
};

/// Policy chosen for one field, before it is turned into tokens.
pub(crate) enum PolicySpec {
    Replace,
    Map { values: Option<Type> },
    List { key: Option<String>, elements: Option<Type> },
    Nested { schema: Type },
}

/// A field key paired with its resolved policy.
pub(crate) struct FieldSpec {
    pub key: String,
    pub policy: PolicySpec,
}

enum Shape<'a> {
    Map { value: &'a Type },
    List { element: &'a Type },
    Other(&'a Type),
}

fn shape(ty: &Type) -> Shape<'_> {
    let inner = strip_wrappers(ty);
    if let Some((_, value)) = btree_map_inner(inner).or_else(|| hash_map_inner(inner)) {
        return Shape::Map { value };
    }
    if let Some(element) = vec_inner(inner) {
        return Shape::List { element };
    }
    Shape::Other(inner)
}

/// Decide the policy of `parsed`.
///
/// Maps merge by key unless told otherwise; everything else, vectors
/// included, is replaced unless annotated. Contradictory attributes are
/// reported against the field.
pub(crate) fn resolve(parsed: &ParsedField) -> syn::Result<FieldSpec> {
    let field = &parsed.field;
    let attrs = &parsed.attrs;
    let fail = |message: &str| Err(syn::Error::new_spanned(field, message));

    if attrs.key.is_some() && attrs.merge != Some(MergeKind::List) {
        return fail("`key` requires `merge = \"list\"`");
    }

    let policy = match (shape(&field.ty), attrs.merge) {
        (_, Some(MergeKind::Replace)) if attrs.nested => {
            return fail("`nested` cannot be combined with `merge = \"replace\"`");
        }
        (_, Some(MergeKind::Replace)) => PolicySpec::Replace,
        (Shape::Map { value }, None | Some(MergeKind::Map)) => PolicySpec::Map {
            values: attrs.nested.then(|| value.clone()),
        },
        (_, Some(MergeKind::Map)) => {
            return fail("`merge = \"map\"` requires a `BTreeMap` or `HashMap` field");
        }
        (Shape::List { element }, Some(MergeKind::List)) => PolicySpec::List {
            key: attrs.key.as_ref().map(syn::LitStr::value),
            elements: attrs.nested.then(|| element.clone()),
        },
        (_, Some(MergeKind::List)) => {
            return fail("`merge = \"list\"` requires a `Vec` field");
        }
        (Shape::List { .. }, None) if attrs.nested => {
            return fail("`nested` on a `Vec` requires `merge = \"list\"`");
        }
        (Shape::Other(ty), None) if attrs.nested => PolicySpec::Nested { schema: ty.clone() },
        (_, None) => PolicySpec::Replace,
    };
    Ok(FieldSpec {
        key: parsed.key.clone(),
        policy,
    })
}
