//! Text encodings for documents.
//!
//! Every textual format decodes into the same [`Document`] tree, is merged
//! there, and is re-encoded afterwards. No merge logic is duplicated per
//! format.

use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use tracing::trace;

use crate::{Document, MergeError, MergeResult, MergeResultExt};

/// Supported textual document formats.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum DocumentFormat {
    /// JSON text, encoded compactly.
    #[default]
    Json,
    /// YAML 1.2 text with strict boolean semantics.
    Yaml,
    /// TOML text. Cannot represent `null` or non-table roots.
    Toml,
}

impl DocumentFormat {
    /// Select a format from a file extension, defaulting to JSON.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use camino::Utf8Path;
    /// use docmerge::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_path(Utf8Path::new("a.YML")), DocumentFormat::Yaml);
    /// assert_eq!(DocumentFormat::from_path(Utf8Path::new("a.toml")), DocumentFormat::Toml);
    /// assert_eq!(DocumentFormat::from_path(Utf8Path::new("a")), DocumentFormat::Json);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Self {
        let ext = path.extension().map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    /// Upper-case display name of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
        }
    }

    /// Decode `bytes` into a document.
    ///
    /// Whitespace-only input and a literal `null` decode to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Decode`] when the input is not valid UTF-8, does
    /// not parse, or the format's feature is disabled.
    pub fn decode(self, bytes: &[u8]) -> MergeResult<Option<Document>> {
        let text = std::str::from_utf8(bytes).into_decode(self)?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        let document = match self {
            Self::Json => serde_json::from_str(text).into_decode(self)?,
            Self::Yaml => decode_yaml(text)?,
            Self::Toml => decode_toml(text)?,
        };
        trace!(format = self.as_str(), shape = crate::kind(&document), "decoded document");
        Ok(match document {
            Document::Null => None,
            other => Some(other),
        })
    }

    /// Encode `document` as this format; `None` encodes to empty output.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::Encode`] when the tree cannot be represented in
    /// the format (for example `null` in TOML) or the format's feature is
    /// disabled.
    pub fn encode(self, document: Option<&Document>) -> MergeResult<Vec<u8>> {
        let Some(document) = document else {
            return Ok(Vec::new());
        };
        match self {
            Self::Json => serde_json::to_vec(document).into_encode(self.as_str()),
            Self::Yaml => encode_yaml(document),
            Self::Toml => encode_toml(document),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            other => Err(format!(
                "unknown document format '{other}'; expected one of \"json\", \"yaml\", or \"toml\""
            )),
        }
    }
}

#[cfg(not(all(feature = "yaml", feature = "toml")))]
fn feature_disabled(format: DocumentFormat, feature: &str) -> std::io::Error {
    std::io::Error::other(format!(
        "{feature} feature disabled: enable the '{feature}' feature to support {format} documents"
    ))
}

#[cfg(feature = "yaml")]
fn decode_yaml(text: &str) -> MergeResult<Document> {
    serde_saphyr::from_str_with_options(
        text,
        serde_saphyr::Options {
            strict_booleans: true,
            ..serde_saphyr::Options::default()
        },
    )
    .into_decode(DocumentFormat::Yaml)
}

#[cfg(not(feature = "yaml"))]
fn decode_yaml(_text: &str) -> MergeResult<Document> {
    Err(std::sync::Arc::new(MergeError::decode(
        DocumentFormat::Yaml,
        feature_disabled(DocumentFormat::Yaml, "yaml"),
    )))
}

#[cfg(feature = "yaml")]
fn encode_yaml(document: &Document) -> MergeResult<Vec<u8>> {
    serde_saphyr::to_string(document)
        .map(String::into_bytes)
        .into_encode(DocumentFormat::Yaml.as_str())
}

#[cfg(not(feature = "yaml"))]
fn encode_yaml(_document: &Document) -> MergeResult<Vec<u8>> {
    Err(std::sync::Arc::new(MergeError::encode(
        DocumentFormat::Yaml.as_str(),
        feature_disabled(DocumentFormat::Yaml, "yaml"),
    )))
}

#[cfg(feature = "toml")]
fn decode_toml(text: &str) -> MergeResult<Document> {
    toml::from_str(text).into_decode(DocumentFormat::Toml)
}

#[cfg(not(feature = "toml"))]
fn decode_toml(_text: &str) -> MergeResult<Document> {
    Err(std::sync::Arc::new(MergeError::decode(
        DocumentFormat::Toml,
        feature_disabled(DocumentFormat::Toml, "toml"),
    )))
}

#[cfg(feature = "toml")]
fn encode_toml(document: &Document) -> MergeResult<Vec<u8>> {
    if !document.is_object() {
        return Err(std::sync::Arc::new(MergeError::encode(
            DocumentFormat::Toml.as_str(),
            format!("TOML documents must be tables, found {}", crate::kind(document)),
        )));
    }
    toml::to_string(document)
        .map(String::into_bytes)
        .into_encode(DocumentFormat::Toml.as_str())
}

#[cfg(not(feature = "toml"))]
fn encode_toml(_document: &Document) -> MergeResult<Vec<u8>> {
    Err(std::sync::Arc::new(MergeError::encode(
        DocumentFormat::Toml.as_str(),
        feature_disabled(DocumentFormat::Toml, "toml"),
    )))
}
