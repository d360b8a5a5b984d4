//! Document model shared by both merge engines.
//!
//! Documents are plain [`serde_json::Value`] trees. A key missing from an
//! object is not the same as a key mapped to `null`; [`Presence`] carries the
//! same three-way distinction into typed structs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Decoded tree representation every merge operates on.
pub type Document = Value;

/// Returns `true` when `document` is absent or an explicit `null`.
///
/// Both merge engines short-circuit on semantically empty inputs.
///
/// # Examples
///
/// ```rust
/// use docmerge::is_empty;
/// use serde_json::json;
///
/// assert!(is_empty(None));
/// assert!(is_empty(Some(&json!(null))));
/// assert!(!is_empty(Some(&json!({}))));
/// ```
#[must_use]
pub const fn is_empty(document: Option<&Document>) -> bool {
    matches!(document, None | Some(Value::Null))
}

/// Human-readable label for the shape of `document`, used in diagnostics.
#[must_use]
pub const fn kind(document: &Document) -> &'static str {
    match document {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Field value that distinguishes "not set" from "explicitly null".
///
/// Use it with `#[serde(default, skip_serializing_if = "Presence::is_absent")]`
/// so unset fields are omitted from the encoded document while explicit resets
/// survive as `null` and take part in the merge.
///
/// # Examples
///
/// ```rust
/// use docmerge::Presence;
/// use serde::{Deserialize, Serialize};
/// use serde_json::json;
///
/// #[derive(Debug, Default, Deserialize, Serialize)]
/// struct Limits {
///     #[serde(default, skip_serializing_if = "Presence::is_absent")]
///     cpu: Presence<String>,
/// }
///
/// let unset = Limits::default();
/// assert_eq!(serde_json::to_value(&unset)?, json!({}));
///
/// let reset = Limits { cpu: Presence::Null };
/// assert_eq!(serde_json::to_value(&reset)?, json!({"cpu": null}));
///
/// let decoded: Limits = serde_json::from_value(json!({"cpu": "100m"}))?;
/// assert_eq!(decoded.cpu, Presence::Present(String::from("100m")));
/// # Ok::<_, serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Presence<T> {
    /// The field was not supplied.
    #[default]
    Absent,
    /// The field was supplied as an explicit `null`.
    Null,
    /// The field was supplied with a value.
    Present(T),
}

impl<T> Presence<T> {
    /// Returns `true` when the field was not supplied.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` when the field was explicitly `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the contained value, if any.
    #[must_use]
    pub const fn as_ref(&self) -> Presence<&T> {
        match self {
            Self::Absent => Presence::Absent,
            Self::Null => Presence::Null,
            Self::Present(value) => Presence::Present(value),
        }
    }

    /// Returns the value when present, collapsing `Absent` and `Null`.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    /// Overlay `other` on `self`: absent leaves `self` untouched, anything
    /// else replaces it.
    #[must_use]
    pub fn or_keep(self, other: Self) -> Self {
        if other.is_absent() { self } else { other }
    }
}

impl<T> From<Option<T>> for Presence<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Present)
    }
}

impl<T: Serialize> Serialize for Presence<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Presence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
