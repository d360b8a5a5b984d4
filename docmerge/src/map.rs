//! Precedence-ordered union of plain maps.

use std::collections::BTreeMap;

/// Build a new map from `first` followed by every map in `rest`.
///
/// Later maps win on key collisions and `None` entries are skipped, so an
/// all-`None` input yields an empty map. Inputs are never modified.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use docmerge::merge_maps;
///
/// let base = BTreeMap::from([("key", "a"), ("keep", "a")]);
/// let overlay = BTreeMap::from([("key", "b")]);
/// let merged = merge_maps(Some(&base), [None, Some(&overlay)]);
/// assert_eq!(merged, BTreeMap::from([("key", "b"), ("keep", "a")]));
/// ```
#[must_use]
pub fn merge_maps<'a, K, V, I>(first: Option<&'a BTreeMap<K, V>>, rest: I) -> BTreeMap<K, V>
where
    K: Ord + Clone + 'a,
    V: Clone + 'a,
    I: IntoIterator<Item = Option<&'a BTreeMap<K, V>>>,
{
    std::iter::once(first)
        .chain(rest)
        .flatten()
        .flat_map(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())))
        .collect()
}
