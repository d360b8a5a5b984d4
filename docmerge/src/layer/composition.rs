//! Layers loaded alongside the errors met while loading them.

use std::sync::Arc;

use super::LayerStack;
use crate::{AggregatedErrors, MergeError, MergeResult};

/// Result of loading many layers without stopping at the first failure.
///
/// Every unreadable or malformed file is recorded so a caller can report all
/// of them at once.
#[derive(Debug)]
pub struct LayerComposition {
    stack: LayerStack,
    errors: Vec<Arc<MergeError>>,
}

impl LayerComposition {
    /// Create a composition from `stack` and `errors`.
    #[must_use]
    pub const fn new(stack: LayerStack, errors: Vec<Arc<MergeError>>) -> Self {
        Self { stack, errors }
    }

    /// Decompose the composition into its constituent parts.
    #[must_use]
    pub fn into_parts(self) -> (LayerStack, Vec<Arc<MergeError>>) {
        (self.stack, self.errors)
    }

    /// Indicates whether any errors were captured while loading.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn errors_to_result<T>(mut errors: Vec<Arc<MergeError>>) -> MergeResult<T> {
        if errors.len() == 1
            && let Some(err) = errors.pop()
        {
            return Err(err);
        }
        Err(Arc::new(MergeError::Aggregate(Box::new(
            AggregatedErrors::new(errors),
        ))))
    }

    /// Return the stack, or every load error as one.
    ///
    /// # Errors
    ///
    /// Returns the single load error, or [`MergeError::Aggregate`] when
    /// several files failed.
    pub fn into_stack(self) -> MergeResult<LayerStack> {
        if self.errors.is_empty() {
            Ok(self.stack)
        } else {
            Self::errors_to_result(self.errors)
        }
    }

    /// Consume the composition and fold the layers using `merge`.
    ///
    /// Load errors are reported together with any failure of `merge`.
    ///
    /// # Errors
    ///
    /// Returns the aggregated load and merge errors.
    pub fn into_merge_result<T, F>(self, merge: F) -> MergeResult<T>
    where
        F: FnOnce(&LayerStack) -> MergeResult<T>,
    {
        let (stack, mut errors) = self.into_parts();
        match merge(&stack) {
            Ok(merged) if errors.is_empty() => Ok(merged),
            Ok(_) => Self::errors_to_result(errors),
            Err(err) => {
                errors.push(err);
                Self::errors_to_result(errors)
            }
        }
    }
}
