//! End-to-end tests for the `docmerge` binary.

mod common;

use camino::Utf8PathBuf;
use common::run_docmerge;
use rstest::{fixture, rstest};
use std::error::Error;
use std::ffi::OsStr;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn Error>>;

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap_or_else(|err| panic!("create tempdir: {err}"))
}

fn write(dir: &TempDir, name: &str, contents: &str) -> Result<Utf8PathBuf, Box<dyn Error>> {
    let path = Utf8PathBuf::from_path_buf(dir.path().join(name))
        .map_err(|path| format!("non UTF-8 temp path: {}", path.display()))?;
    std::fs::write(&path, contents)?;
    Ok(path)
}

#[rstest]
fn patch_writes_merged_json_to_stdout(dir: TempDir) -> TestResult {
    let original = write(&dir, "base.json", r#"{"map":{"one":{"i":1,"s":"one"}}}"#)?;
    let patch = write(&dir, "patch.json", r#"{"map":{"one":{"s":null,"x":3}}}"#)?;

    let output = run_docmerge(["patch", original.as_str(), patch.as_str()])?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let merged: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        merged,
        serde_json::json!({"map": {"one": {"i": 1, "s": null, "x": 3}}})
    );
    Ok(())
}

#[rstest]
fn strategic_merges_yaml_with_a_schema(dir: TempDir) -> TestResult {
    let schema = write(
        &dir,
        "schema.yaml",
        "name: pod\nfields:\n  containers:\n    policy: merge_list\n    key: name\n",
    )?;
    let original = write(
        &dir,
        "base.yaml",
        "containers:\n  - name: web\n    image: nginx:1\n  - name: sidecar\n    image: envoy\n",
    )?;
    let overlay = write(
        &dir,
        "overlay.yaml",
        "containers:\n  - name: web\n    image: nginx:2\n",
    )?;

    let output = run_docmerge([
        "strategic",
        "--schema",
        schema.as_str(),
        original.as_str(),
        overlay.as_str(),
        "--output-format",
        "json",
    ])?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let merged: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        merged,
        serde_json::json!({"containers": [
            {"name": "sidecar", "image": "envoy"},
            {"name": "web", "image": "nginx:2"},
        ]})
    );
    Ok(())
}

#[rstest]
fn schema_mismatch_fails_with_the_layer_path(dir: TempDir) -> TestResult {
    let schema = write(
        &dir,
        "schema.json",
        r#"{"name": "item", "fields": {"slice": {"policy": "merge_list"}}}"#,
    )?;
    let original = write(&dir, "base.json", r#"{"slice": ["a"]}"#)?;
    let overlay = write(&dir, "overlay.json", r#"{"slice": "b"}"#)?;

    let output = run_docmerge([
        "strategic",
        "--schema",
        schema.as_str(),
        original.as_str(),
        overlay.as_str(),
    ])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("overlay.json"), "stderr: {stderr}");
    assert!(stderr.contains("'slice'"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
    Ok(())
}

#[rstest]
fn missing_inputs_are_all_reported(dir: TempDir) -> TestResult {
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    let output = run_docmerge([OsStr::new("patch"), first.as_os_str(), second.as_os_str()])?;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("multiple merge errors"), "stderr: {stderr}");
    assert!(stderr.contains("first.json") && stderr.contains("second.json"));
    Ok(())
}

#[rstest]
fn verbose_flag_logs_to_stderr(dir: TempDir) -> TestResult {
    let original = write(&dir, "a.json", "{}")?;
    let patch = write(&dir, "b.json", r#"{"a": 1}"#)?;

    let output = run_docmerge(["-vv", "patch", original.as_str(), patch.as_str()])?;

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("encoding result"), "stderr: {stderr}");
    assert_eq!(output.stdout, br#"{"a":1}"#);
    Ok(())
}
