//! Behavioural tests for `#[derive(StrategicMerge)]` and the typed fold.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface merge mistakes"
)]

use std::collections::BTreeMap;

use anyhow::{Result, anyhow, ensure};
use docmerge::{FieldPolicy, Presence, StrategicMerge, strategic, strategic_merge};
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, StrategicMerge)]
#[serde(rename_all = "camelCase")]
struct PodSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[strategic(merge = "list", key = "name", nested)]
    containers: Vec<Container>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    node_selector: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[strategic(nested)]
    resources: Option<Resources>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    image_pull_secrets: Vec<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    priority: Presence<i32>,
    #[serde(skip)]
    generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, StrategicMerge)]
struct Container {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[strategic(merge = "list", key = "name")]
    env: Vec<EnvVar>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[strategic(merge = "list")]
    args: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
struct EnvVar {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize, StrategicMerge)]
struct Resources {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    limits: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Default, PartialEq, Deserialize, Serialize, StrategicMerge)]
struct Tree {
    #[serde(default)]
    #[strategic(nested)]
    children: BTreeMap<String, Tree>,
}

#[derive(Debug, Default, PartialEq, Deserialize, Serialize, StrategicMerge)]
struct Labels {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    map: Presence<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    #[strategic(merge = "list")]
    list: Presence<Vec<String>>,
}

mod renamed {
    use docmerge as merge_alias;
    use serde::Serialize;

    #[derive(Serialize, merge_alias::StrategicMerge)]
    #[strategic(crate = "merge_alias")]
    pub(crate) struct Aliased {
        pub(crate) labels: std::collections::BTreeMap<String, String>,
    }
}

fn env(name: &str, value: &str) -> EnvVar {
    EnvVar {
        name: name.to_owned(),
        value: Some(value.to_owned()),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[fixture]
fn original() -> PodSpec {
    PodSpec {
        containers: vec![
            Container {
                name: "web".into(),
                image: Some("nginx:1".into()),
                env: vec![env("A", "1")],
                args: strings(&["--a"]),
            },
            Container {
                name: "sidecar".into(),
                image: Some("envoy".into()),
                ..Container::default()
            },
        ],
        node_selector: BTreeMap::from([("zone".into(), "a".into())]),
        resources: Some(Resources {
            limits: BTreeMap::from([("cpu".into(), Some("1".into()))]),
        }),
        image_pull_secrets: strings(&["old"]),
        priority: Presence::Present(5),
        generation: 0,
    }
}

#[rstest]
fn derived_schema_follows_field_types() -> Result<()> {
    let schema = PodSpec::schema();
    ensure!(schema.name() == "PodSpec", "schema named {}", schema.name());

    let Some(FieldPolicy::MergeList {
        key: Some(key),
        elements: Some(elements),
    }) = schema.policy("containers")
    else {
        return Err(anyhow!("containers should be a keyed list"));
    };
    ensure!(key == "name");
    ensure!(elements.get().name() == "Container");

    ensure!(matches!(
        schema.policy("nodeSelector"),
        Some(FieldPolicy::MergeMap { values: None })
    ));
    ensure!(matches!(
        schema.policy("resources"),
        Some(FieldPolicy::Nested { schema: nested }) if nested.get().name() == "Resources"
    ));
    ensure!(matches!(schema.policy("imagePullSecrets"), Some(FieldPolicy::Replace)));
    ensure!(matches!(schema.policy("priority"), Some(FieldPolicy::Replace)));
    ensure!(schema.policy("generation").is_none(), "skipped fields have no policy");
    ensure!(schema.policy("node_selector").is_none(), "policies use encoded keys");
    Ok(())
}

#[rstest]
fn derived_schema_is_built_once() {
    assert!(std::ptr::eq(PodSpec::schema(), PodSpec::schema()));
}

#[rstest]
fn recursive_types_refer_to_their_own_schema() -> Result<()> {
    let Some(FieldPolicy::MergeMap {
        values: Some(values),
    }) = Tree::schema().policy("children")
    else {
        return Err(anyhow!("children should merge as a map of trees"));
    };
    ensure!(std::ptr::eq(values.get(), Tree::schema()));
    Ok(())
}

#[rstest]
fn renamed_crate_paths_resolve() {
    let aliased = renamed::Aliased {
        labels: BTreeMap::new(),
    };
    assert!(aliased.labels.is_empty());
    assert!(matches!(
        renamed::Aliased::schema().policy("labels"),
        Some(FieldPolicy::MergeMap { .. })
    ));
}

#[rstest]
fn typed_fold_applies_every_policy(original: PodSpec) {
    let modifier = PodSpec {
        containers: vec![Container {
            name: "web".into(),
            image: None,
            env: vec![env("B", "2"), env("A", "3")],
            args: strings(&["--b"]),
        }],
        node_selector: BTreeMap::from([("disk".into(), "ssd".into())]),
        resources: Some(Resources {
            limits: BTreeMap::from([("memory".into(), Some("1Gi".into())), ("cpu".into(), None)]),
        }),
        image_pull_secrets: strings(&["new"]),
        priority: Presence::Null,
        generation: 9,
    };

    let merged = strategic_merge(&original, [&modifier]).expect("documents merge");

    let expected = PodSpec {
        containers: vec![
            Container {
                name: "sidecar".into(),
                image: Some("envoy".into()),
                ..Container::default()
            },
            Container {
                name: "web".into(),
                image: Some("nginx:1".into()),
                env: vec![env("A", "3"), env("B", "2")],
                args: strings(&["--a", "--b"]),
            },
        ],
        node_selector: BTreeMap::from([
            ("disk".into(), "ssd".into()),
            ("zone".into(), "a".into()),
        ]),
        resources: Some(Resources {
            limits: BTreeMap::from([("cpu".into(), None), ("memory".into(), Some("1Gi".into()))]),
        }),
        image_pull_secrets: strings(&["new"]),
        priority: Presence::Null,
        generation: 0,
    };
    assert_eq!(merged, expected);
}

#[rstest]
fn unset_modifier_fields_leave_the_original_alone(original: PodSpec) {
    let merged = strategic_merge(&original, [&PodSpec::default()]).expect("documents merge");
    assert_eq!(merged, original);
}

#[rstest]
fn later_modifiers_take_precedence(original: PodSpec) {
    let first = PodSpec {
        node_selector: BTreeMap::from([("zone".into(), "b".into())]),
        ..PodSpec::default()
    };
    let second = PodSpec {
        node_selector: BTreeMap::from([("zone".into(), "c".into())]),
        ..PodSpec::default()
    };
    let merged = strategic_merge(&original, [&first, &second]).expect("documents merge");
    assert_eq!(merged.node_selector.get("zone").map(String::as_str), Some("c"));
}

#[rstest]
fn absent_original_starts_from_the_first_modifier(original: PodSpec) {
    let merged = strategic::<PodSpec, _>(None, [None, Some(&original)]).expect("documents merge");
    assert_eq!(merged, Some(original));
}

#[rstest]
fn nothing_to_merge_yields_none() {
    let merged = strategic::<PodSpec, _>(None, [None, None]).expect("nothing to merge");
    assert_eq!(merged, None);
}

#[rstest]
fn explicit_null_resets_collections() {
    let original = Labels {
        map: Presence::Present(BTreeMap::from([("a".into(), "1".into())])),
        list: Presence::Present(strings(&["x"])),
    };
    let reset = Labels {
        map: Presence::Null,
        list: Presence::Null,
    };

    let merged = strategic_merge(&original, [&reset]).expect("documents merge");

    assert!(merged.map.is_null(), "map came back as {:?}", merged.map);
    assert!(merged.list.is_null(), "list came back as {:?}", merged.list);
}

#[rstest]
fn absent_collections_keep_the_original() {
    let original = Labels {
        map: Presence::Present(BTreeMap::from([("a".into(), "1".into())])),
        list: Presence::Null,
    };

    let merged = strategic_merge(&original, [&Labels::default()]).expect("documents merge");

    assert_eq!(merged, original);
}
