//! End-to-end comparison properties, driven through baseline JSON documents
//! the way embedding tools feed the engine.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use strata_compare::{
    compare_baselines, CompareContext, CompareError, DeltaFlag, DeltaKind, MemberComparator,
};
use strata_model::{document, Baseline, Visibility};

fn make_baseline(components: Vec<Value>) -> Baseline {
    document::from_document(&json!({
        "name": "fixture",
        "components": components,
    }))
    .expect("fixture document should load")
}

fn api_component(id: &str, version: &str, types: Vec<Value>) -> Value {
    json!({
        "id": id,
        "version": version,
        "containers": [
            {
                "packages": {
                    "com.example": {
                        "visibility": "api",
                        "types": types,
                    }
                }
            }
        ]
    })
}

fn public_type(name: &str) -> Value {
    json!({ "name": name, "modifiers": ["public"] })
}

fn compare_api(
    reference: &Baseline,
    target: &Baseline,
) -> Result<Option<strata_compare::Delta>, CompareError> {
    let comparator = MemberComparator;
    let ctx = CompareContext::new(Visibility::API, &comparator);
    compare_baselines(reference, target, &ctx, false)
}

#[test]
fn comparing_a_baseline_against_itself_finds_nothing() {
    let baseline = make_baseline(vec![api_component(
        "com.example",
        "1.0.0",
        vec![public_type("com.example.Foo"), public_type("com.example.Bar")],
    )]);
    assert!(compare_api(&baseline, &baseline).unwrap().is_none());
}

#[test]
fn identical_type_sets_produce_no_type_leaves() {
    let before = make_baseline(vec![api_component(
        "com.example",
        "1.0.0",
        vec![public_type("com.example.Foo")],
    )]);
    let after = make_baseline(vec![api_component(
        "com.example",
        "1.1.0",
        vec![public_type("com.example.Foo")],
    )]);
    let delta = compare_api(&before, &after).unwrap().unwrap();
    assert!(delta
        .leaves()
        .iter()
        .all(|l| !matches!(l.flag, DeltaFlag::Type | DeltaFlag::ApiType)));
}

#[test]
fn removing_a_public_api_type_yields_one_removed_api_type_leaf() {
    let before = make_baseline(vec![api_component(
        "com.example",
        "1.0.0",
        vec![public_type("com.example.Foo")],
    )]);
    let after = make_baseline(vec![api_component("com.example", "1.0.1", vec![])]);
    let delta = compare_api(&before, &after).unwrap().unwrap();
    let removed: Vec<_> = delta
        .leaves()
        .into_iter()
        .filter(|l| l.kind == DeltaKind::Removed)
        .collect();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].flag, DeltaFlag::ApiType);
    assert_eq!(removed[0].key, "com.example.Foo");
}

#[test]
fn adding_a_public_type_yields_one_added_type_leaf() {
    let before = make_baseline(vec![api_component("com.example", "1.0.0", vec![])]);
    let after = make_baseline(vec![api_component(
        "com.example",
        "1.0.1",
        vec![public_type("com.example.Bar")],
    )]);
    let delta = compare_api(&before, &after).unwrap().unwrap();
    let added: Vec<_> = delta
        .leaves()
        .into_iter()
        .filter(|l| l.kind == DeltaKind::Added)
        .collect();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].flag, DeltaFlag::Type);
    assert_eq!(added[0].key, "com.example.Bar");
}

#[test]
fn visibility_downgrade_under_api_mask_suppresses_member_deltas() {
    let before = make_baseline(vec![api_component(
        "com.example",
        "1.0.0",
        vec![json!({
            "name": "com.example.Foo",
            "modifiers": ["public"],
            "members": [
                {"kind": "method", "name": "run", "signature": "()V",
                 "modifiers": ["public"]}
            ]
        })],
    )]);
    // Foo becomes package-private; its method also disappears, which must
    // not be reported separately
    let after = make_baseline(vec![api_component(
        "com.example",
        "1.1.0",
        vec![json!({ "name": "com.example.Foo", "modifiers": [] })],
    )]);
    let delta = compare_api(&before, &after).unwrap().unwrap();
    let leaves = delta.sorted_leaves();
    let type_leaves: Vec<_> = leaves
        .iter()
        .filter(|l| l.flag != DeltaFlag::MinorVersion)
        .collect();
    assert_eq!(type_leaves.len(), 1);
    assert_eq!(type_leaves[0].kind, DeltaKind::Removed);
    assert_eq!(type_leaves[0].flag, DeltaFlag::ApiType);
    assert!(!leaves.iter().any(|l| l.flag == DeltaFlag::Method));
}

#[test]
fn major_version_bump_emits_major_but_never_minor() {
    let before = make_baseline(vec![api_component("com.example", "1.2.3", vec![])]);
    let after = make_baseline(vec![api_component("com.example", "2.0.0", vec![])]);
    let delta = compare_api(&before, &after).unwrap().unwrap();
    let leaves = delta.leaves();
    assert_eq!(
        leaves
            .iter()
            .filter(|l| l.flag == DeltaFlag::MajorVersion)
            .count(),
        1
    );
    assert!(!leaves.iter().any(|l| l.flag == DeltaFlag::MinorVersion));
}

#[test]
fn type_moved_into_reexported_dependency_uses_reexport_flags() {
    let before = make_baseline(vec![api_component(
        "com.example",
        "1.0.0",
        vec![public_type("com.example.Foo")],
    )]);
    // Foo now lives in com.example.dep, re-exported by com.example, but has
    // lost its API status there; the finding must carry a re-export flag,
    // not a plain removal
    let after = make_baseline(vec![
        json!({
            "id": "com.example",
            "version": "1.1.0",
            "requires": [{"id": "com.example.dep", "exported": true}],
            "containers": [],
        }),
        json!({
            "id": "com.example.dep",
            "version": "1.0.0",
            "containers": [
                {
                    "packages": {
                        "com.example": {
                            "visibility": "internal",
                            "types": [public_type("com.example.Foo")],
                        }
                    }
                }
            ]
        }),
    ]);
    let delta = compare_api(&before, &after).unwrap().unwrap();
    let foo_leaves: Vec<_> = delta
        .leaves()
        .into_iter()
        .filter(|l| l.key == "com.example.Foo")
        .collect();
    assert_eq!(foo_leaves.len(), 1);
    assert_eq!(foo_leaves[0].kind, DeltaKind::Removed);
    assert_eq!(foo_leaves[0].flag, DeltaFlag::ReexportedApiType);
}

#[test]
fn comparison_is_idempotent() {
    let before = make_baseline(vec![api_component(
        "com.example",
        "1.0.0",
        vec![public_type("com.example.Foo"), public_type("com.example.Baz")],
    )]);
    let after = make_baseline(vec![api_component(
        "com.example",
        "1.1.0",
        vec![public_type("com.example.Bar"), public_type("com.example.Baz")],
    )]);

    let first = compare_api(&before, &after).unwrap().unwrap();
    let second = compare_api(&before, &after).unwrap().unwrap();
    let first_leaves: Vec<_> = first
        .sorted_leaves()
        .into_iter()
        .map(|l| (l.kind, l.flag, l.key.clone()))
        .collect();
    let second_leaves: Vec<_> = second
        .sorted_leaves()
        .into_iter()
        .map(|l| (l.kind, l.flag, l.key.clone()))
        .collect();
    assert_eq!(first_leaves, second_leaves);
}

#[test]
fn minor_bump_with_removed_and_added_type_scenario() {
    let before = make_baseline(vec![api_component(
        "com.example",
        "1.0.0",
        vec![public_type("com.example.Foo")],
    )]);
    let after = make_baseline(vec![api_component(
        "com.example",
        "1.1.0",
        vec![public_type("com.example.Bar")],
    )]);

    let delta = compare_api(&before, &after).unwrap().unwrap();
    let leaves = delta.sorted_leaves();
    assert_eq!(leaves.len(), 3);

    let summary: Vec<(DeltaKind, DeltaFlag, &str)> = leaves
        .iter()
        .map(|l| (l.kind, l.flag, l.key.as_str()))
        .collect();
    assert!(summary.contains(&(DeltaKind::Changed, DeltaFlag::MinorVersion, "com.example")));
    assert!(summary.contains(&(DeltaKind::Removed, DeltaFlag::ApiType, "com.example.Foo")));
    assert!(summary.contains(&(DeltaKind::Added, DeltaFlag::Type, "com.example.Bar")));
}

#[test]
fn cancellation_is_distinct_from_no_difference() {
    let baseline = make_baseline(vec![api_component("com.example", "1.0.0", vec![])]);
    let comparator = MemberComparator;
    let flag = AtomicBool::new(true);
    flag.store(true, Ordering::Relaxed);
    let ctx = CompareContext::new(Visibility::API, &comparator).with_cancel(&flag);
    assert!(matches!(
        compare_baselines(&baseline, &baseline, &ctx, false),
        Err(CompareError::Cancelled)
    ));
}

#[test]
fn removed_method_reported_under_the_type_subtree() {
    let before = make_baseline(vec![api_component(
        "com.example",
        "1.0.0",
        vec![json!({
            "name": "com.example.Foo",
            "modifiers": ["public"],
            "members": [
                {"kind": "method", "name": "run", "signature": "()V",
                 "modifiers": ["public"]},
                {"kind": "method", "name": "stop", "signature": "()V",
                 "modifiers": ["public"]}
            ]
        })],
    )]);
    let after = make_baseline(vec![api_component(
        "com.example",
        "1.1.0",
        vec![json!({
            "name": "com.example.Foo",
            "modifiers": ["public"],
            "members": [
                {"kind": "method", "name": "run", "signature": "()V",
                 "modifiers": ["public"]}
            ]
        })],
    )]);

    let delta = compare_api(&before, &after).unwrap().unwrap();
    let method_leaves: Vec<_> = delta
        .leaves()
        .into_iter()
        .filter(|l| l.flag == DeltaFlag::Method)
        .collect();
    assert_eq!(method_leaves.len(), 1);
    assert_eq!(method_leaves[0].kind, DeltaKind::Removed);
    assert_eq!(method_leaves[0].key, "com.example.Foo#stop()V");
    assert_eq!(
        method_leaves[0].type_name.as_deref(),
        Some("com.example.Foo")
    );
}
