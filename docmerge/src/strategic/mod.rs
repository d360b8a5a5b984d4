//! Schema-directed strategic merge.
//!
//! Each field of a document carries a [`FieldPolicy`] that decides how the
//! field combines: replaced outright, unioned as a map, or unioned as an
//! order-preserving list. Any number of modifiers fold over an original in
//! order of increasing precedence, and a field a modifier omits never
//! disturbs the accumulated value.

mod engine;
mod policy;
mod typed;

pub use engine::StrategicMerger;
pub use policy::{FieldPolicy, Schema, SchemaBuilder, SchemaRef};
pub use typed::{StrategicMerge, strategic, strategic_merge};
