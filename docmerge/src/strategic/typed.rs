//! Typed entry points for values with a derived schema.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use super::{Schema, StrategicMerger};
use crate::MergeResult;
use crate::patch::{from_document, to_document};

/// Types carrying a strategic merge [`Schema`].
///
/// Usually implemented with `#[derive(StrategicMerge)]`, which resolves the
/// policy of every field once and caches the table for the life of the
/// process.
pub trait StrategicMerge {
    /// Field policy table for `Self`.
    fn schema() -> &'static Schema;
}

/// Fold `modifiers` over `original` using the schema of `V`.
///
/// Every value is encoded to a document, folded with [`StrategicMerger`] and
/// decoded back into a fresh `V`. `None` entries are skipped; when `original`
/// is `None` the first present modifier becomes the base.
///
/// # Errors
///
/// Returns [`crate::MergeError::Encode`] when a value fails to serialise or
/// the merged tree does not fit `V`, and
/// [`crate::MergeError::SchemaMismatch`] when an encoded value contradicts
/// the schema.
pub fn strategic<'a, V, I>(original: Option<&V>, modifiers: I) -> MergeResult<Option<V>>
where
    V: StrategicMerge + Serialize + DeserializeOwned + 'a,
    I: IntoIterator<Item = Option<&'a V>>,
{
    let base = to_document(original)?;
    let overlays = modifiers
        .into_iter()
        .map(to_document)
        .collect::<MergeResult<Vec<_>>>()?;
    StrategicMerger::new(V::schema())
        .fold(base, overlays)?
        .map(from_document)
        .transpose()
}

/// Non-optional form of [`strategic`].
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use docmerge::{StrategicMerge, strategic_merge};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Deserialize, Serialize, StrategicMerge)]
/// struct Labels {
///     #[serde(default)]
///     map: BTreeMap<String, String>,
/// }
///
/// let original = Labels { map: BTreeMap::from([("o".into(), "o".into()), ("test".into(), "o".into())]) };
/// let first = Labels { map: BTreeMap::from([("e1".into(), "e1".into()), ("test".into(), "e1".into())]) };
/// let second = Labels { map: BTreeMap::from([("test".into(), "e2".into())]) };
/// let merged = strategic_merge(&original, [&first, &second])?;
/// assert_eq!(merged.map["test"], "e2");
/// assert_eq!(merged.map.len(), 3);
/// # Ok::<_, std::sync::Arc<docmerge::MergeError>>(())
/// ```
///
/// # Errors
///
/// See [`strategic`].
pub fn strategic_merge<'a, V, I>(original: &V, modifiers: I) -> MergeResult<V>
where
    V: StrategicMerge + Serialize + DeserializeOwned + 'a,
    I: IntoIterator<Item = &'a V>,
{
    match strategic(Some(original), modifiers.into_iter().map(Some))? {
        Some(merged) => Ok(merged),
        None => from_document(Value::Object(Map::new())),
    }
}
