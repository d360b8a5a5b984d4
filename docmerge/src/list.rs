//! Order-preserving list merge.
//!
//! Elements are matched across the two lists by an identity key and the
//! output is laid out as
//!
//! 1. elements only in the original, in original order;
//! 2. elements in both lists, in the modified list's order (so re-listing
//!    existing elements reorders them), each merged pairwise;
//! 3. elements only in the modified list, in modified order.
//!
//! ```rust
//! use docmerge::merge_scalar_list;
//!
//! let merged = merge_scalar_list(vec!["b", "c", "a"], vec!["a", "b", "d"]);
//! assert_eq!(merged, ["c", "a", "b", "d"]);
//! ```
//!
//! When an identity appears more than once within the same input, the first
//! occurrence wins and later duplicates in that input are dropped. This is a
//! chosen behaviour rather than an inherited contract; callers should not
//! rely on supplying duplicates.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::hash::Hash;

use tracing::trace;

/// Merge `modified` into `original` by identity.
///
/// `identity` extracts the matching key of an element; `merge` combines an
/// `(original, modified)` pair that share an identity. Either callback may
/// fail, which aborts the whole merge.
///
/// # Errors
///
/// Propagates the first error returned by `identity` or `merge`.
///
/// # Examples
///
/// ```rust
/// use docmerge::merge_list;
///
/// let original = vec![("web", 1), ("db", 1)];
/// let modified = vec![("web", 2), ("cache", 1)];
/// let merged = merge_list(
///     original,
///     modified,
///     |(name, _)| Ok::<_, ()>(*name),
///     |(name, old), (_, new)| Ok((name, old + new)),
/// )?;
/// assert_eq!(merged, [("db", 1), ("web", 3), ("cache", 1)]);
/// # Ok::<_, ()>(())
/// ```
pub fn merge_list<T, K, E, I, M>(
    original: Vec<T>,
    modified: Vec<T>,
    mut identity: I,
    mut merge: M,
) -> Result<Vec<T>, E>
where
    K: Eq + Hash,
    I: FnMut(&T) -> Result<K, E>,
    M: FnMut(T, T) -> Result<T, E>,
{
    let original = first_occurrences(original, &mut identity)?;
    let modified = first_occurrences(modified, &mut identity)?;

    // Position in `modified` of each original element's counterpart.
    let counterparts: Vec<Option<usize>> = {
        let index: HashMap<&K, usize> = modified
            .iter()
            .enumerate()
            .map(|(position, (key, _))| (key, position))
            .collect();
        original
            .iter()
            .map(|(key, _)| index.get(key).copied())
            .collect()
    };

    let mut merged = Vec::with_capacity(original.len() + modified.len());
    let mut matched: Vec<Option<T>> = std::iter::repeat_with(|| None)
        .take(modified.len())
        .collect();
    for ((_, element), counterpart) in original.into_iter().zip(counterparts) {
        match counterpart.and_then(|position| matched.get_mut(position)) {
            Some(slot) => *slot = Some(element),
            None => merged.push(element),
        }
    }

    let mut introduced = Vec::new();
    for ((_, element), slot) in modified.into_iter().zip(matched) {
        match slot {
            Some(previous) => merged.push(merge(previous, element)?),
            None => introduced.push(element),
        }
    }
    trace!(introduced = introduced.len(), total = merged.len(), "merged list");
    merged.append(&mut introduced);
    Ok(merged)
}

/// Merge two lists whose elements are their own identity.
///
/// Matched elements are taken from `modified`.
#[must_use]
pub fn merge_scalar_list<T>(original: Vec<T>, modified: Vec<T>) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let merged: Result<Vec<T>, Infallible> = merge_list(
        original,
        modified,
        |element| Ok(element.clone()),
        |_, element| Ok(element),
    );
    match merged {
        Ok(list) => list,
        Err(never) => match never {},
    }
}

/// Pair each element with its identity, dropping later duplicates.
fn first_occurrences<T, K, E, I>(items: Vec<T>, identity: &mut I) -> Result<Vec<(K, T)>, E>
where
    K: Eq + Hash,
    I: FnMut(&T) -> Result<K, E>,
{
    let keyed = items
        .into_iter()
        .map(|item| identity(&item).map(|key| (key, item)))
        .collect::<Result<Vec<_>, E>>()?;
    let keep: Vec<bool> = {
        let mut seen = HashSet::with_capacity(keyed.len());
        keyed.iter().map(|(key, _)| seen.insert(key)).collect()
    };
    let before = keyed.len();
    let unique: Vec<(K, T)> = keyed
        .into_iter()
        .zip(keep)
        .filter_map(|(entry, is_first)| is_first.then_some(entry))
        .collect();
    if unique.len() != before {
        trace!(dropped = before - unique.len(), "dropped duplicate list identities");
    }
    Ok(unique)
}
