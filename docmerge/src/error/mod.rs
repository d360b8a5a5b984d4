//! Error types produced by the merge engines and codecs.

mod aggregate;
mod constructors;
mod types;

pub use aggregate::AggregatedErrors;
pub use types::MergeError;
