//! Schema-directed fold over decoded documents.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::{FieldPolicy, Schema, SchemaRef};
use crate::patch::apply_patch;
use crate::{Document, MergeError, MergeResult, kind, merge_list};

/// Policy applied to every field of a matched list element that has no
/// element schema.
static REPLACE: FieldPolicy = FieldPolicy::Replace;

static MISSING: Value = Value::Null;

/// Folds modifier documents over an original according to a [`Schema`].
///
/// # Examples
///
/// ```rust
/// use docmerge::{FieldPolicy, Schema, StrategicMerger};
/// use serde_json::json;
///
/// let schema = Schema::builder("item")
///     .field("slice", FieldPolicy::merge_list())
///     .field("map", FieldPolicy::merge_map())
///     .build();
/// let merged = StrategicMerger::new(&schema).fold(
///     Some(json!({"slice": ["b", "c", "a"], "map": {"o": "o", "test": "o"}})),
///     [Some(json!({"slice": ["a", "b", "d"], "map": {"m": "m", "test": "m"}}))],
/// )?;
/// assert_eq!(
///     merged,
///     Some(json!({
///         "slice": ["c", "a", "b", "d"],
///         "map": {"m": "m", "o": "o", "test": "m"},
///     }))
/// );
/// # Ok::<_, std::sync::Arc<docmerge::MergeError>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StrategicMerger<'s> {
    schema: &'s Schema,
}

impl<'s> StrategicMerger<'s> {
    /// Create a merger for documents described by `schema`.
    #[must_use]
    pub const fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    /// Schema driving this merger.
    #[must_use]
    pub const fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Merge a single `modifier` into `accumulator`.
    ///
    /// A `null` on either side stands for an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::SchemaMismatch`] when either document is not an
    /// object or a field's shape contradicts its policy.
    pub fn merge(&self, accumulator: Document, modifier: Document) -> MergeResult<Document> {
        let name = self.schema.name();
        let mut target = root_object(name, accumulator)?;
        let overlay = root_object(name, modifier)?;
        merge_fields(Some(self.schema), name, &mut target, overlay, "")?;
        Ok(Value::Object(target))
    }

    /// Fold `modifiers` over `original` in order of increasing precedence.
    ///
    /// `None` and `null` modifiers are skipped. Without an original the first
    /// present modifier becomes the base. Returns `None` only when every input
    /// is absent.
    ///
    /// # Errors
    ///
    /// Stops at the first [`MergeError::SchemaMismatch`]; no partial result is
    /// returned.
    pub fn fold<I>(&self, original: Option<Document>, modifiers: I) -> MergeResult<Option<Document>>
    where
        I: IntoIterator<Item = Option<Document>>,
    {
        let name = self.schema.name();
        let mut accumulator = match original {
            None | Some(Value::Null) => None,
            Some(document) => Some(Value::Object(root_object(name, document)?)),
        };
        for (step, modifier) in modifiers.into_iter().enumerate() {
            let Some(overlay) = modifier.filter(|document| !document.is_null()) else {
                trace!(schema = name, step, "skipping absent modifier");
                continue;
            };
            debug!(schema = name, step, "folding modifier");
            let base = accumulator.take().unwrap_or(Value::Null);
            accumulator = Some(self.merge(base, overlay)?);
        }
        Ok(accumulator)
    }
}

fn root_object(schema: &str, document: Document) -> MergeResult<Map<String, Value>> {
    match document {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map),
        other => Err(mismatch(schema, "", "an object", &other)),
    }
}

fn mismatch(schema: &str, path: &str, expected: &'static str, found: &Value) -> Arc<MergeError> {
    let location = if path.is_empty() { "<root>" } else { path };
    MergeError::schema_mismatch(schema, location, expected, kind(found))
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{path}.{key}")
    }
}

/// Merge `overlay` into `target` field by field.
///
/// Without a schema every field is replaced; `name` is the schema reported in
/// diagnostics.
fn merge_fields(
    schema: Option<&Schema>,
    name: &str,
    target: &mut Map<String, Value>,
    overlay: Map<String, Value>,
    path: &str,
) -> MergeResult<()> {
    for (key, value) in overlay {
        let field = child_path(path, &key);
        let policy = match schema {
            Some(table) => table.policy(&key),
            None => Some(&REPLACE),
        };
        match policy {
            None => patch_field(target, key, value),
            Some(FieldPolicy::Replace) => {
                target.insert(key, value);
            }
            Some(FieldPolicy::MergeMap { values }) => {
                let values = values.as_ref().map(SchemaRef::get);
                merge_map_field(values, name, target, key, value, &field)?;
            }
            Some(FieldPolicy::MergeList { key: identity, elements }) => {
                let policy = ListPolicy {
                    schema: name,
                    identity: identity.as_deref(),
                    elements: elements.as_ref().map(SchemaRef::get),
                };
                policy.merge_field(target, key, value, &field)?;
            }
            Some(FieldPolicy::Nested { schema: nested }) => {
                merge_nested_field(nested.get(), target, key, value, &field)?;
            }
        }
    }
    Ok(())
}

/// Undeclared keys follow the merge patch: objects merge recursively and
/// `null` is kept.
fn patch_field(target: &mut Map<String, Value>, key: String, value: Value) {
    match target.get_mut(&key) {
        Some(existing) if existing.is_object() && value.is_object() => {
            apply_patch(existing, &value);
        }
        _ => {
            target.insert(key, value);
        }
    }
}

/// Take the current value of `key` as an object, treating absent and `null`
/// as empty.
fn take_object(
    schema: &str,
    target: &mut Map<String, Value>,
    key: &str,
    path: &str,
) -> MergeResult<Map<String, Value>> {
    match target.remove(key) {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(mismatch(schema, path, "an object", &other)),
    }
}

fn merge_map_field(
    values: Option<&Schema>,
    name: &str,
    target: &mut Map<String, Value>,
    key: String,
    value: Value,
    path: &str,
) -> MergeResult<()> {
    let entries = match value {
        Value::Null => {
            trace!(field = path, "resetting map to null");
            target.insert(key, Value::Null);
            return Ok(());
        }
        Value::Object(entries) => entries,
        other => return Err(mismatch(name, path, "an object", &other)),
    };
    let mut merged = take_object(name, target, &key, path)?;
    for (entry, overlay) in entries {
        let entry_path = child_path(path, &entry);
        match (values, overlay) {
            (Some(schema), Value::Object(fields)) => {
                let mut current = take_object(schema.name(), &mut merged, &entry, &entry_path)?;
                merge_fields(Some(schema), schema.name(), &mut current, fields, &entry_path)?;
                merged.insert(entry, Value::Object(current));
            }
            (Some(schema), other) if !other.is_null() => {
                return Err(mismatch(schema.name(), &entry_path, "an object", &other));
            }
            (_, other) => {
                merged.insert(entry, other);
            }
        }
    }
    target.insert(key, Value::Object(merged));
    Ok(())
}

fn merge_nested_field(
    schema: &Schema,
    target: &mut Map<String, Value>,
    key: String,
    value: Value,
    path: &str,
) -> MergeResult<()> {
    match value {
        Value::Null => {
            target.insert(key, Value::Null);
        }
        Value::Object(fields) => {
            let mut current = take_object(schema.name(), target, &key, path)?;
            merge_fields(Some(schema), schema.name(), &mut current, fields, path)?;
            target.insert(key, Value::Object(current));
        }
        other => return Err(mismatch(schema.name(), path, "an object", &other)),
    }
    Ok(())
}

/// Resolved view of a [`FieldPolicy::MergeList`].
struct ListPolicy<'a> {
    schema: &'a str,
    identity: Option<&'a str>,
    elements: Option<&'a Schema>,
}

impl ListPolicy<'_> {
    fn merge_field(
        &self,
        target: &mut Map<String, Value>,
        key: String,
        value: Value,
        path: &str,
    ) -> MergeResult<()> {
        let modified = match value {
            Value::Null => {
                trace!(field = path, "resetting list to null");
                target.insert(key, Value::Null);
                return Ok(());
            }
            Value::Array(items) => items,
            other => return Err(mismatch(self.schema, path, "an array", &other)),
        };
        let original = match target.remove(&key) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => return Err(mismatch(self.schema, path, "an array", &other)),
        };
        let merged = self.merge(original, modified, path)?;
        target.insert(key, Value::Array(merged));
        Ok(())
    }

    fn merge(&self, original: Vec<Value>, modified: Vec<Value>, path: &str) -> MergeResult<Vec<Value>> {
        let Some(identity) = self.identity else {
            return merge_list(
                original,
                modified,
                |item| Ok(item.to_string()),
                |_, item| Ok(item),
            );
        };
        self.check_keyed(&original, identity, path)?;
        self.check_keyed(&modified, identity, path)?;
        merge_list(
            original,
            modified,
            |item| Ok(identity_of(item, identity).to_string()),
            |current, item| self.merge_element(current, item, identity, path),
        )
    }

    fn check_keyed(&self, items: &[Value], identity: &str, path: &str) -> MergeResult<()> {
        for (position, item) in items.iter().enumerate() {
            let item_path = format!("{path}[{position}]");
            let Value::Object(fields) = item else {
                return Err(mismatch(self.schema, &item_path, "an object", item));
            };
            if !fields.contains_key(identity) {
                return Err(MergeError::schema_mismatch(
                    self.schema,
                    &child_path(&item_path, identity),
                    "an identity value",
                    "nothing",
                ));
            }
        }
        Ok(())
    }

    fn merge_element(
        &self,
        current: Value,
        item: Value,
        identity: &str,
        path: &str,
    ) -> MergeResult<Value> {
        let item_path = format!("{path}[{}]", display_identity(identity_of(&item, identity)));
        let name = self.elements.map_or(self.schema, Schema::name);
        let mut target = match current {
            Value::Object(fields) => fields,
            other => return Err(mismatch(name, &item_path, "an object", &other)),
        };
        let fields = match item {
            Value::Object(fields) => fields,
            other => return Err(mismatch(name, &item_path, "an object", &other)),
        };
        merge_fields(self.elements, name, &mut target, fields, &item_path)?;
        Ok(Value::Object(target))
    }
}

fn identity_of<'v>(item: &'v Value, identity: &str) -> &'v Value {
    item.get(identity).unwrap_or(&MISSING)
}

fn display_identity(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
