//! Unit tests for layer stacks.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface merge mistakes"
)]

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::{FieldPolicy, MergeError, Schema};

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().expect("create tempdir")
}

fn write(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf-8 temp path");
    std::fs::write(&path, contents).expect("write layer");
    path
}

#[rstest]
fn load_decodes_by_extension(dir: TempDir) {
    let base = write(&dir, "base.yaml", "image: nginx\nreplicas: 1\n");
    let overlay = write(&dir, "overlay.json", r#"{"replicas": null}"#);
    let empty = write(&dir, "empty.toml", "");

    let mut stack = LayerStack::new();
    for path in [&base, &overlay, &empty] {
        stack.load(path).expect("layer loads");
    }

    assert_eq!(stack.len(), 3);
    assert_eq!(
        stack.layers().first().and_then(DocumentLayer::path),
        Some(base.as_path())
    );
    assert_eq!(
        stack.merge_patch(),
        Some(json!({"image": "nginx", "replicas": null}))
    );
}

#[rstest]
fn load_reports_missing_files(dir: TempDir) {
    let missing = Utf8PathBuf::from_path_buf(dir.path().join("absent.json")).expect("utf-8 path");
    let err = LayerStack::new()
        .load(&missing)
        .expect_err("file does not exist");
    assert!(matches!(&*err, MergeError::File { path, .. } if *path == missing));
}

#[rstest]
fn load_all_collects_every_failure(dir: TempDir) {
    let good = write(&dir, "good.json", r#"{"a": 1}"#);
    let bad = write(&dir, "bad.json", "{");
    let missing = Utf8PathBuf::from_path_buf(dir.path().join("missing.yaml")).expect("utf-8 path");

    let composition = LayerStack::load_all([&good, &bad, &missing]);
    assert!(composition.has_errors());
    let err = composition.into_stack().expect_err("two layers failed");
    let MergeError::Aggregate(errors) = &*err else {
        panic!("expected aggregate, got {err}");
    };
    assert_eq!(errors.len(), 2);
}

#[rstest]
fn load_all_single_failure_is_not_wrapped(dir: TempDir) {
    let bad = write(&dir, "bad.json", "{");
    let err = LayerStack::load_all([&bad])
        .into_merge_result(|stack| Ok(stack.merge_patch()))
        .expect_err("layer is malformed");
    assert!(matches!(&*err, MergeError::Decode { .. }));
}

#[rstest]
fn load_all_without_failures_merges(dir: TempDir) {
    let first = write(&dir, "first.json", r#"{"a": {"b": 1}}"#);
    let second = write(&dir, "second.json", r#"{"a": {"c": 2}}"#);
    let merged = LayerStack::load_all([first, second])
        .into_merge_result(|stack| Ok(stack.merge_patch()))
        .expect("layers merge");
    assert_eq!(merged, Some(json!({"a": {"b": 1, "c": 2}})));
}

#[test]
fn strategic_folds_layers_in_order() {
    let schema = Schema::builder("item")
        .field("slice", FieldPolicy::merge_list())
        .build();
    let stack: LayerStack = [
        DocumentLayer::inline(json!({"slice": ["b", "c", "a"]})),
        DocumentLayer::inline(json!(null)),
        DocumentLayer::inline(json!({"slice": ["a", "b", "d"]})),
    ]
    .into_iter()
    .collect();
    let merged = stack.strategic(&schema).expect("layers merge");
    assert_eq!(merged, Some(json!({"slice": ["c", "a", "b", "d"]})));
}

#[test]
fn strategic_errors_name_the_layer() {
    let schema = Schema::builder("item")
        .field("slice", FieldPolicy::merge_list())
        .build();
    let mut stack = LayerStack::new();
    stack.push_inline(json!({"slice": ["a"]}));
    stack.push_file(json!({"slice": "b"}), "overlay.yaml");

    let err = stack.strategic(&schema).expect_err("slice is not a list");
    let MergeError::Layer { origin, source } = &*err else {
        panic!("expected layer error, got {err}");
    };
    assert_eq!(*origin, LayerOrigin::File(Utf8PathBuf::from("overlay.yaml")));
    assert!(matches!(&**source, MergeError::SchemaMismatch { .. }));
    assert!(err.to_string().starts_with("failed to merge 'overlay.yaml': schema 'item'"));
}

#[test]
fn empty_stack_merges_to_nothing() {
    let stack = LayerStack::default();
    assert!(stack.is_empty());
    assert_eq!(stack.merge_patch(), None);
}
