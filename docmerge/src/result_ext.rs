//! Extensions for mapping errors to `MergeResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(MergeError::…))`
//! patterns when converting parser and serialiser failures into the crate's
//! `MergeResult<T>` alias (`Result<T, Arc<MergeError>>`).
//!
//! # Examples
//!
//! ```
//! use docmerge::{DocumentFormat, MergeResult, MergeResultExt};
//!
//! fn parse(text: &str) -> MergeResult<serde_json::Value> {
//!     serde_json::from_str(text).into_decode(DocumentFormat::Json)
//! }
//!
//! assert!(parse("{\"a\": 1}").is_ok());
//! assert!(parse("{").is_err());
//! ```

use std::error::Error;
use std::sync::Arc;

use crate::{DocumentFormat, MergeError, MergeResult};

/// Extension for routing any `Result<T, E>` into a [`MergeResult`].
pub trait MergeResultExt<T> {
    /// Convert the error into [`MergeError::Decode`] for `format`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped decode error when the input is `Err`.
    fn into_decode(self, format: DocumentFormat) -> MergeResult<T>;

    /// Convert the error into [`MergeError::Encode`] for `target`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped encode error when the input is `Err`.
    fn into_encode(self, target: &str) -> MergeResult<T>;
}

impl<T, E> MergeResultExt<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn into_decode(self, format: DocumentFormat) -> MergeResult<T> {
        self.map_err(|e| Arc::new(MergeError::decode(format, e)))
    }

    fn into_encode(self, target: &str) -> MergeResult<T> {
        self.map_err(|e| Arc::new(MergeError::encode(target, e)))
    }
}
