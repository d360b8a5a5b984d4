//! Error types for `docmerge`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use docmerge::MergeError;
use thiserror::Error;

/// Errors surfaced by the `docmerge` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or merging the input documents failed.
    #[error(transparent)]
    Merge(#[from] Arc<MergeError>),

    /// The schema file decoded to nothing.
    #[error("schema document '{0}' is empty")]
    EmptySchema(Utf8PathBuf),

    /// The schema file does not describe a valid schema.
    #[error("invalid schema in '{path}': {source}")]
    Schema {
        /// Schema file.
        path: Utf8PathBuf,
        /// Deserialisation failure.
        #[source]
        source: serde_json::Error,
    },

    /// Writing the merged document failed.
    #[error("I/O error writing {target}: {source}")]
    Output {
        /// `stdout` or the quoted output path.
        target: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A global tracing subscriber was already installed.
    #[error("failed to install logging: {0}")]
    Logging(String),
}
