//! Field policy tables consulted by the strategic engine.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use super::StrategicMerge;

/// How a single field combines across documents.
///
/// Runtime schemas deserialise from an internally tagged representation:
///
/// ```rust
/// use docmerge::{FieldPolicy, Schema};
///
/// let schema: Schema = serde_json::from_value(serde_json::json!({
///     "name": "pod",
///     "fields": {
///         "labels": {"policy": "merge_map"},
///         "containers": {"policy": "merge_list", "key": "name"},
///     },
/// }))?;
/// assert!(matches!(
///     schema.policy("containers"),
///     Some(FieldPolicy::MergeList { key: Some(key), .. }) if key == "name"
/// ));
/// # Ok::<_, serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
#[non_exhaustive]
pub enum FieldPolicy {
    /// The modifier's value replaces the accumulated value when present.
    Replace,
    /// Union of keys; the modifier wins on collision.
    MergeMap {
        /// Schema used to merge colliding object values recursively.
        #[serde(default)]
        values: Option<SchemaRef>,
    },
    /// Order-preserving list union.
    MergeList {
        /// Identity field for lists of objects. Element equality is the
        /// identity when unset.
        #[serde(default)]
        key: Option<String>,
        /// Schema used to merge matched object elements. Every field of a
        /// matched element is replaced when unset.
        #[serde(default)]
        elements: Option<SchemaRef>,
    },
    /// A schema'd object merged recursively field by field.
    Nested {
        /// Schema of the nested object.
        schema: SchemaRef,
    },
}

impl FieldPolicy {
    /// Map union without a value schema.
    #[must_use]
    pub const fn merge_map() -> Self {
        Self::MergeMap { values: None }
    }

    /// List union where each element is its own identity.
    #[must_use]
    pub const fn merge_list() -> Self {
        Self::MergeList {
            key: None,
            elements: None,
        }
    }

    /// List union of objects matched by the `key` field.
    #[must_use]
    pub fn keyed_list(key: impl Into<String>) -> Self {
        Self::MergeList {
            key: Some(key.into()),
            elements: None,
        }
    }

    /// Recursive merge with `schema`.
    #[must_use]
    pub fn nested(schema: impl Into<SchemaRef>) -> Self {
        Self::Nested {
            schema: schema.into(),
        }
    }
}

/// Reference to a schema held by a [`FieldPolicy`].
///
/// Derived schemas refer to each other through the generated
/// [`StrategicMerge::schema`] function so recursive types never have to build
/// their own schema while it is being initialised.
#[derive(Clone)]
pub enum SchemaRef {
    /// Schema produced by a derived [`StrategicMerge::schema`].
    Static(fn() -> &'static Schema),
    /// Schema built or deserialised at runtime.
    Owned(Arc<Schema>),
}

impl SchemaRef {
    /// Refer to the derived schema of `T`.
    #[must_use]
    pub fn of<T: StrategicMerge>() -> Self {
        Self::Static(T::schema)
    }

    /// Resolve the referenced schema.
    #[must_use]
    pub fn get(&self) -> &Schema {
        match self {
            Self::Static(schema) => schema(),
            Self::Owned(schema) => schema,
        }
    }
}

impl fmt::Debug for SchemaRef {
    // Only the name: recursive schemas would otherwise print forever.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemaRef").field(&self.get().name()).finish()
    }
}

impl From<Schema> for SchemaRef {
    fn from(schema: Schema) -> Self {
        Self::Owned(Arc::new(schema))
    }
}

impl From<Arc<Schema>> for SchemaRef {
    fn from(schema: Arc<Schema>) -> Self {
        Self::Owned(schema)
    }
}

impl<'de> Deserialize<'de> for SchemaRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Schema::deserialize(deserializer).map(Self::from)
    }
}

/// Named table mapping field keys to their [`FieldPolicy`].
///
/// Keys a document carries but the table does not declare fall back to the
/// null-preserving merge patch.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, FieldPolicy>,
}

impl Schema {
    /// Start building a schema called `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Policy declared for `key`, if any.
    #[must_use]
    pub fn policy(&self, key: &str) -> Option<&FieldPolicy> {
        self.fields.get(key)
    }

    /// Declared fields in key order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldPolicy)> {
        self.fields.iter().map(|(key, policy)| (key.as_str(), policy))
    }
}

/// Builder returned by [`Schema::builder`].
#[derive(Debug)]
#[must_use]
pub struct SchemaBuilder {
    name: String,
    fields: BTreeMap<String, FieldPolicy>,
}

impl SchemaBuilder {
    /// Declare `policy` for `key`, replacing any earlier declaration.
    pub fn field(mut self, key: impl Into<String>, policy: FieldPolicy) -> Self {
        self.fields.insert(key.into(), policy);
        self
    }

    /// Finish the schema.
    #[must_use]
    pub fn build(self) -> Schema {
        Schema {
            name: self.name,
            fields: self.fields,
        }
    }
}
