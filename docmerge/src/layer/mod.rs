//! Precedence-ordered stacks of documents with their origins.
//!
//! A [`LayerStack`] collects documents from inline values and files and folds
//! them with either merge engine. Every layer remembers where it came from so
//! a failure can name the offending file.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};

use crate::Document;

mod composition;
mod stack;

pub use composition::LayerComposition;
pub use stack::LayerStack;

/// Source of a [`DocumentLayer`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum LayerOrigin {
    /// Document supplied directly by the caller.
    Inline,
    /// Document read from a file.
    File(Utf8PathBuf),
}

impl fmt::Display for LayerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => f.write_str("inline document"),
            Self::File(path) => write!(f, "'{path}'"),
        }
    }
}

/// A document paired with its [`LayerOrigin`].
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentLayer {
    origin: LayerOrigin,
    document: Document,
}

impl DocumentLayer {
    /// Construct a layer supplied by the caller.
    #[must_use]
    pub const fn inline(document: Document) -> Self {
        Self {
            origin: LayerOrigin::Inline,
            document,
        }
    }

    /// Construct a layer read from `path`.
    #[must_use]
    pub fn file(document: Document, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            origin: LayerOrigin::File(path.into()),
            document,
        }
    }

    /// Where the layer came from.
    #[must_use]
    pub const fn origin(&self) -> &LayerOrigin {
        &self.origin
    }

    /// Path of the layer when it was read from a file.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        match &self.origin {
            LayerOrigin::File(path) => Some(path),
            LayerOrigin::Inline => None,
        }
    }

    /// Borrow the layer's document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Split the layer into its origin and document.
    #[must_use]
    pub fn into_parts(self) -> (LayerOrigin, Document) {
        (self.origin, self.document)
    }
}

#[cfg(test)]
mod tests;
