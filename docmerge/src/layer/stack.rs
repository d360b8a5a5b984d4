//! Layer accumulation and folding.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use super::{DocumentLayer, LayerComposition};
use crate::{
    Document, DocumentFormat, MergeError, MergeResult, Schema, StrategicMerger, merge_patch_opt,
};

/// Builder that accumulates [`DocumentLayer`]s in increasing precedence.
///
/// ```rust
/// use docmerge::LayerStack;
/// use serde_json::json;
///
/// let mut stack = LayerStack::new();
/// stack.push_inline(json!({"replicas": 1, "image": "nginx"}));
/// stack.push_inline(json!({"replicas": null}));
/// assert_eq!(
///     stack.merge_patch(),
///     Some(json!({"replicas": null, "image": "nginx"}))
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayerStack {
    layers: Vec<DocumentLayer>,
}

impl LayerStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Create a stack with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            layers: Vec::with_capacity(capacity),
        }
    }

    /// Push a document supplied by the caller.
    pub fn push_inline(&mut self, document: Document) {
        self.push_layer(DocumentLayer::inline(document));
    }

    /// Push a document read from `path`.
    pub fn push_file(&mut self, document: Document, path: impl Into<Utf8PathBuf>) {
        self.push_layer(DocumentLayer::file(document, path));
    }

    /// Push an arbitrary layer.
    pub fn push_layer(&mut self, layer: DocumentLayer) {
        self.layers.push(layer);
    }

    /// Read `path`, decode it by extension and push it.
    ///
    /// An empty file becomes an empty (`null`) layer.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::File`] when the file cannot be read and
    /// [`MergeError::Decode`] when its contents do not parse.
    pub fn load(&mut self, path: &Utf8Path) -> MergeResult<()> {
        let layer = read_layer(path)?;
        self.push_layer(layer);
        Ok(())
    }

    /// Load every path, collecting failures instead of stopping at the first.
    #[must_use]
    pub fn load_all<I, P>(paths: I) -> LayerComposition
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Utf8Path>,
    {
        let mut stack = Self::new();
        let mut errors = Vec::new();
        for path in paths {
            match read_layer(path.as_ref()) {
                Ok(layer) => stack.push_layer(layer),
                Err(err) => errors.push(err),
            }
        }
        LayerComposition::new(stack, errors)
    }

    /// Borrow the accumulated layers.
    #[must_use]
    pub fn layers(&self) -> &[DocumentLayer] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the stack has no layers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Fold the layers with the null-preserving merge patch.
    ///
    /// Returns `None` when every layer is empty.
    #[must_use]
    pub fn merge_patch(&self) -> Option<Document> {
        self.layers.iter().fold(None, |merged, layer| {
            debug!(origin = %layer.origin(), "patching layer");
            merge_patch_opt(merged, Some(layer.document().clone()))
        })
    }

    /// Fold the layers with the strategic engine.
    ///
    /// The first layer is the original and the rest are modifiers.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Layer`] naming the layer whose merge failed.
    pub fn strategic(&self, schema: &Schema) -> MergeResult<Option<Document>> {
        let merger = StrategicMerger::new(schema);
        let mut merged = None;
        for layer in &self.layers {
            debug!(origin = %layer.origin(), schema = schema.name(), "merging layer");
            merged = merger
                .fold(merged, [Some(layer.document().clone())])
                .map_err(|err| MergeError::layer(layer.origin().clone(), err))?;
        }
        Ok(merged)
    }
}

fn read_layer(path: &Utf8Path) -> MergeResult<DocumentLayer> {
    let bytes = std::fs::read(path).map_err(|err| MergeError::file(path, err))?;
    let format = DocumentFormat::from_path(path);
    debug!(path = %path, %format, "loaded layer");
    let document = format.decode(&bytes)?;
    Ok(DocumentLayer::file(document.unwrap_or_default(), path))
}

impl IntoIterator for LayerStack {
    type Item = DocumentLayer;
    type IntoIter = std::vec::IntoIter<DocumentLayer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}

impl FromIterator<DocumentLayer> for LayerStack {
    fn from_iter<I: IntoIterator<Item = DocumentLayer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}
