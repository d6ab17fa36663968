//! Execution-environment set difference between two component versions.

use crate::delta::{Delta, DeltaFlag, DeltaKind, ElementType, Leaf};
use std::collections::BTreeSet;
use strata_model::{AccessFlags, Component, Restrictions};

fn environment_leaf(reference: &Component, environment: &str, kind: DeltaKind) -> Delta {
    Delta::Leaf(Leaf {
        component_id: Some(reference.versioned_id()),
        element_type: ElementType::ExecutionEnvironment,
        kind,
        flag: DeltaFlag::ExecutionEnvironment,
        restrictions: Restrictions::NONE,
        modifiers: AccessFlags::NONE,
        type_name: None,
        key: reference.id.clone(),
        arguments: vec![environment.to_string(), reference.versioned_id()],
    })
}

/// Emit one Removed leaf per environment only the reference requires and one
/// Added leaf per environment only the target requires.
pub fn compare_execution_environments(
    reference: &Component,
    target: &Component,
    children: &mut Vec<Delta>,
) {
    let reference_environments: BTreeSet<&str> = reference
        .execution_environments
        .iter()
        .map(String::as_str)
        .collect();
    let target_environments: BTreeSet<&str> = target
        .execution_environments
        .iter()
        .map(String::as_str)
        .collect();

    for environment in reference_environments.difference(&target_environments) {
        children.push(environment_leaf(reference, environment, DeltaKind::Removed));
    }
    for environment in target_environments.difference(&reference_environments) {
        children.push(environment_leaf(reference, environment, DeltaKind::Added));
    }
}
