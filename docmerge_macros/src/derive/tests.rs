//! Unit tests for the derive expansion.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

use super::expand;

fn expanded(input: &DeriveInput) -> Result<String> {
    expand(input)
        .map(|tokens| tokens.to_string())
        .map_err(|err| anyhow!(err))
}

#[test]
fn expansion_builds_a_cached_schema() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[serde(rename_all = "camelCase")]
        struct Pod {
            #[strategic(merge = "list", key = "name", nested)]
            containers: Vec<Container>,
            node_labels: BTreeMap<String, String>,
            image: String,
        }
    };
    let tokens = expanded(&input)?;
    for fragment in [
        "impl docmerge :: StrategicMerge for Pod",
        ":: std :: sync :: OnceLock < docmerge :: Schema >",
        "docmerge :: Schema :: builder (\"Pod\")",
        ". field (\"containers\" , docmerge :: FieldPolicy :: MergeList",
        "docmerge :: SchemaRef :: of :: < Container > ()",
        ". field (\"nodeLabels\" , docmerge :: FieldPolicy :: MergeMap",
        ". field (\"image\" , docmerge :: FieldPolicy :: Replace)",
    ] {
        ensure!(tokens.contains(fragment), "missing `{fragment}` in {tokens}");
    }
    Ok(())
}

#[test]
fn crate_override_rewrites_paths() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[strategic(crate = "merge_alias")]
        struct Item { value: u8 }
    };
    let tokens = expanded(&input)?;
    ensure!(
        tokens.contains("impl merge_alias :: StrategicMerge for Item"),
        "unexpected expansion {tokens}"
    );
    ensure!(!tokens.contains("docmerge"), "default path leaked into {tokens}");
    Ok(())
}

#[rstest]
#[case::generic(parse_quote!(struct Item<T> { value: T }))]
#[case::enumeration(parse_quote!(enum Item { A, B }))]
#[case::contradiction(parse_quote!(struct Item { #[strategic(merge = "map")] value: u8 }))]
fn invalid_input_fails_to_expand(#[case] input: DeriveInput) {
    assert!(expand(&input).is_err());
}
