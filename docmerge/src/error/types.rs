//! Primary error enum for merge operations.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use crate::DocumentFormat;
use crate::layer::LayerOrigin;

/// Errors that can occur while decoding, merging or encoding documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MergeError {
    /// Input bytes do not parse as the declared format.
    #[error("failed to decode {format} document: {source}")]
    Decode {
        /// Format the input was decoded as.
        format: DocumentFormat,
        /// Underlying parser error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The merged tree cannot be serialised into the target representation.
    #[error("failed to encode document as {target}: {source}")]
    Encode {
        /// Human-readable name of the target representation.
        target: String,
        /// Underlying serialiser error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A document's shape contradicts the field policy declared for it.
    #[error("schema '{schema}' expects {expected} at '{path}' but found {found}")]
    SchemaMismatch {
        /// Name of the schema that declared the policy.
        schema: String,
        /// Dotted field path to the offending value.
        path: String,
        /// Shape required by the policy.
        expected: &'static str,
        /// Shape actually present in the document.
        found: &'static str,
    },

    /// Reading a document from disk failed.
    #[error("failed to read document '{path}': {source}")]
    File {
        /// Path that could not be read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Merging a layer of a [`crate::LayerStack`] failed.
    #[error("failed to merge {origin}: {source}")]
    Layer {
        /// Source of the offending layer.
        origin: LayerOrigin,
        /// Error raised while merging it.
        #[source]
        source: std::sync::Arc<MergeError>,
    },

    /// Multiple errors occurred while preparing a merge.
    #[error("multiple merge errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
