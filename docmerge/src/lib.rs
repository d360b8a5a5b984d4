//! Core crate for the `docmerge` document merge engine.
//!
//! Two merge semantics are provided over decoded document trees
//! ([`Document`], a [`serde_json::Value`]):
//!
//! - a null-preserving merge patch ([`merge_patch`], [`patch_bytes`],
//!   [`patch`]) where `null` in a patch means "explicitly set to null" rather
//!   than "delete";
//! - a schema-directed strategic merge ([`strategic`], [`StrategicMerger`])
//!   where each field carries a [`FieldPolicy`] and any number of modifier
//!   documents are folded over an original in order of increasing precedence.
//!
//! Field policies are usually declared with the companion derive macro:
//!
//! ```rust
//! use docmerge::{StrategicMerge, strategic_merge};
//! use serde::{Deserialize, Serialize};
//! use std::collections::BTreeMap;
//!
//! #[derive(Debug, Default, PartialEq, Deserialize, Serialize, StrategicMerge)]
//! struct Item {
//!     #[serde(default, skip_serializing_if = "Vec::is_empty")]
//!     #[strategic(merge = "list")]
//!     slice: Vec<String>,
//!     #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
//!     map: BTreeMap<String, String>,
//! }
//!
//! let original = Item { slice: vec!["b".into(), "c".into(), "a".into()], ..Item::default() };
//! let modifier = Item { slice: vec!["a".into(), "b".into(), "d".into()], ..Item::default() };
//! let merged = strategic_merge(&original, [&modifier])?;
//! assert_eq!(merged.slice, ["c", "a", "b", "d"]);
//! # Ok::<_, std::sync::Arc<docmerge::MergeError>>(())
//! ```

pub use docmerge_macros::StrategicMerge;

pub mod codec;
mod document;
mod error;
pub mod layer;
pub mod list;
mod map;
pub mod patch;
mod result_ext;
pub mod strategic;
#[cfg(test)]
mod test_support;

pub use codec::DocumentFormat;
pub use document::{Document, Presence, is_empty, kind};
pub use error::{AggregatedErrors, MergeError};
pub use layer::{DocumentLayer, LayerComposition, LayerOrigin, LayerStack};
pub use list::{merge_list, merge_scalar_list};
pub use map::merge_maps;
pub use patch::{
    merge_patch, merge_patch_opt, patch, patch_bytes, patch_in_place, patch_json, patch_yaml,
};
pub use result_ext::MergeResultExt;
pub use strategic::{
    FieldPolicy, Schema, SchemaBuilder, SchemaRef, StrategicMerge, StrategicMerger, strategic,
    strategic_merge,
};

#[doc(hidden)]
pub use serde_json;

/// Convenience alias for results returned by merge operations.
///
/// Errors are shared behind an [`Arc`](std::sync::Arc) so they can be
/// aggregated and reported from several places without cloning.
pub type MergeResult<T> = Result<T, std::sync::Arc<MergeError>>;
