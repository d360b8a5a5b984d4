//! Constructors and aggregation helpers for `MergeError`.

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;

use super::{AggregatedErrors, MergeError};
use crate::DocumentFormat;
use crate::layer::LayerOrigin;

impl MergeError {
    /// Tries to build a [`MergeError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] containing that single [`Arc`] when the error is
    ///   already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.len() > 1 {
            return Some(Self::Aggregate(Box::new(AggregatedErrors::new(arcs))));
        }
        let last = arcs.pop()?;
        Some(Arc::try_unwrap(last).unwrap_or_else(|shared| {
            Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared])))
        }))
    }

    /// Build a [`MergeError`] from at least one error.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`MergeError::try_aggregate`] when the
    /// list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Construct a decode error for `format`.
    ///
    /// # Examples
    ///
    /// ```
    /// use docmerge::{DocumentFormat, MergeError};
    /// let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    /// let e = MergeError::decode(DocumentFormat::Json, err);
    /// assert!(matches!(e, MergeError::Decode { format: DocumentFormat::Json, .. }));
    /// ```
    #[must_use]
    pub fn decode(format: DocumentFormat, source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Decode {
            format,
            source: source.into(),
        }
    }

    /// Construct an encode error for the named `target` representation.
    #[must_use]
    pub fn encode(
        target: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self::Encode {
            target: target.into(),
            source: source.into(),
        }
    }

    /// Construct a schema mismatch error wrapped in an [`Arc`].
    #[must_use]
    pub fn schema_mismatch(
        schema: &str,
        path: &str,
        expected: &'static str,
        found: &'static str,
    ) -> Arc<Self> {
        Arc::new(Self::SchemaMismatch {
            schema: schema.to_owned(),
            path: path.to_owned(),
            expected,
            found,
        })
    }

    /// Construct a file error for `path` wrapped in an [`Arc`].
    #[must_use]
    pub fn file(path: &Utf8Path, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::File {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Attribute `source` to the layer loaded from `origin`.
    #[must_use]
    pub fn layer(origin: LayerOrigin, source: Arc<Self>) -> Arc<Self> {
        Arc::new(Self::Layer { origin, source })
    }
}
