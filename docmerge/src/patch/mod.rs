//! Null-preserving merge patches.
//!
//! The rules follow JSON Merge Patch with one deliberate difference: a `null`
//! in the patch sets the key to `null` instead of deleting it. The merged
//! output can then be re-emitted as a patch itself (forwarded downstream or
//! handed to another encoder) without an explicit reset turning into "no
//! opinion".

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::trace;

use crate::{Document, DocumentFormat, MergeResult, MergeResultExt, is_empty};

/// Merge `patch` into `original`, returning a new document.
///
/// - An empty (`null`) patch leaves `original` unchanged.
/// - An empty original yields `patch`.
/// - Objects merge recursively; `null` patch values are kept as `null`.
/// - Everything else, arrays included, replaces wholesale.
///
/// # Examples
///
/// ```rust
/// use docmerge::merge_patch;
/// use serde_json::json;
///
/// let original = json!({"cpu": "100m", "memory": "1Gi"});
/// let merged = merge_patch(&original, &json!({"cpu": null}));
/// assert_eq!(merged, json!({"cpu": null, "memory": "1Gi"}));
/// ```
#[must_use]
pub fn merge_patch(original: &Document, patch: &Document) -> Document {
    if is_empty(Some(patch)) {
        return original.clone();
    }
    let mut merged = original.clone();
    apply_patch(&mut merged, patch);
    merged
}

/// Owned variant of [`merge_patch`] that treats `None` as an empty document.
///
/// Returns `None` only when both sides are empty.
#[must_use]
pub fn merge_patch_opt(original: Option<Document>, patch: Option<Document>) -> Option<Document> {
    match (original, patch) {
        (base, None | Some(Value::Null)) => base,
        (None | Some(Value::Null), overlay) => overlay,
        (Some(mut merged), Some(overlay)) => {
            apply_patch(&mut merged, &overlay);
            Some(merged)
        }
    }
}

/// Overlay `patch` onto `target` in place.
pub(crate) fn apply_patch(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            merge_object(target_map, patch_map);
        }
        (_, Value::Null) => {}
        (slot, replacement) => {
            *slot = replacement.clone();
        }
    }
}

fn merge_object(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        match target.get_mut(key) {
            Some(existing) if existing.is_object() && value.is_object() => {
                apply_patch(existing, value);
            }
            Some(existing) => {
                trace!(key = key.as_str(), "replacing value");
                *existing = value.clone();
            }
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Merge two encoded documents, decoding with `input` and re-encoding with
/// `output`.
///
/// Either side may be empty or `null`; two empty inputs produce empty output.
///
/// # Errors
///
/// Returns [`crate::MergeError::Decode`] when either input fails to parse and
/// [`crate::MergeError::Encode`] when the merged tree cannot be written as
/// `output`.
pub fn patch_bytes(
    original: &[u8],
    patch: &[u8],
    input: DocumentFormat,
    output: DocumentFormat,
) -> MergeResult<Vec<u8>> {
    let base = input.decode(original)?;
    let overlay = input.decode(patch)?;
    output.encode(merge_patch_opt(base, overlay).as_ref())
}

/// Merge two JSON documents.
///
/// # Examples
///
/// ```rust
/// let merged = docmerge::patch_json(
///     br#"{"map":{"one":{"i":1,"s":"one"}}}"#,
///     br#"{"map":{"one":{"i":2}}}"#,
/// )?;
/// assert_eq!(merged, br#"{"map":{"one":{"i":2,"s":"one"}}}"#);
/// # Ok::<_, std::sync::Arc<docmerge::MergeError>>(())
/// ```
///
/// # Errors
///
/// See [`patch_bytes`].
pub fn patch_json(original: &[u8], patch: &[u8]) -> MergeResult<Vec<u8>> {
    patch_bytes(original, patch, DocumentFormat::Json, DocumentFormat::Json)
}

/// Merge two YAML documents, producing YAML.
///
/// # Errors
///
/// See [`patch_bytes`].
pub fn patch_yaml(original: &[u8], patch: &[u8]) -> MergeResult<Vec<u8>> {
    patch_bytes(original, patch, DocumentFormat::Yaml, DocumentFormat::Yaml)
}

/// Merge two typed values through their encoded documents.
///
/// `None` on either side short-circuits to the other side. The merged tree
/// is decoded back into a fresh `T`.
///
/// # Errors
///
/// Returns [`crate::MergeError::Encode`] when either value fails to
/// serialise or the merged tree does not fit `T`.
pub fn patch<T>(original: Option<&T>, patch: Option<&T>) -> MergeResult<Option<T>>
where
    T: Serialize + DeserializeOwned,
{
    let base = to_document(original)?;
    let overlay = to_document(patch)?;
    merge_patch_opt(base, overlay)
        .map(from_document)
        .transpose()
}

/// Merge `patch` into `original` in place.
///
/// On error `original` is left untouched.
///
/// # Errors
///
/// See [`patch`].
pub fn patch_in_place<T>(original: &mut T, patch: &T) -> MergeResult<()>
where
    T: Serialize + DeserializeOwned,
{
    if let Some(merged) = self::patch(Some(&*original), Some(patch))? {
        *original = merged;
    }
    Ok(())
}

pub(crate) fn to_document<T: Serialize>(value: Option<&T>) -> MergeResult<Option<Document>> {
    value
        .map(|v| serde_json::to_value(v).into_encode("document tree"))
        .transpose()
}

pub(crate) fn from_document<T: DeserializeOwned>(document: Document) -> MergeResult<T> {
    serde_json::from_value(document).into_encode(std::any::type_name::<T>())
}
