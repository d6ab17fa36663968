//! Top-level comparison entry points: baseline pairs, single components
//! against a baseline, and arbitrary type scopes.

use crate::component::{compare_components, compare_type, component_leaf};
use crate::context::CompareContext;
use crate::delta::{Delta, DeltaFlag, DeltaKind, ElementType, Leaf};
use crate::error::CompareError;
use std::collections::BTreeSet;
use std::time::Instant;
use strata_model::{
    AccessFlags, Baseline, Component, ModelError, Restrictions, Version,
};

/// One entry of a comparison scope: a type selected by owning component id
/// and qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeEntry {
    pub component_id: String,
    pub type_name: String,
}

impl ScopeEntry {
    pub fn new(component_id: impl Into<String>, type_name: impl Into<String>) -> ScopeEntry {
        ScopeEntry {
            component_id: component_id.into(),
            type_name: type_name.into(),
        }
    }
}

/// Emit at most one version leaf for a component pair: major mismatch wins,
/// minor mismatch otherwise. Unparseable versions emit nothing.
fn check_version_changes(reference: &Component, target: &Component, children: &mut Vec<Delta>) {
    let (Some(before), Some(after)) = (
        Version::parse(&reference.version),
        Version::parse(&target.version),
    ) else {
        return;
    };
    let flag = if before.major != after.major {
        DeltaFlag::MajorVersion
    } else if before.minor != after.minor {
        DeltaFlag::MinorVersion
    } else {
        return;
    };
    children.push(Delta::Leaf(Leaf {
        component_id: Some(target.versioned_id()),
        element_type: ElementType::Component,
        kind: DeltaKind::Changed,
        flag,
        restrictions: Restrictions::NONE,
        modifiers: AccessFlags::NONE,
        type_name: None,
        key: reference.id.clone(),
        arguments: vec![
            reference.id.clone(),
            reference.version.clone(),
            target.version.clone(),
        ],
    }));
}

/// Compare two baselines. Non-system components are paired by id; pairs are
/// compared when their versions differ or `force` is set. A component pair
/// whose comparison fails is logged and skipped; cancellation fails the
/// whole run.
pub fn compare_baselines(
    reference: &Baseline,
    target: &Baseline,
    ctx: &CompareContext<'_>,
    force: bool,
) -> Result<Option<Delta>, CompareError> {
    let mut children = Vec::new();
    let mut matched: BTreeSet<&str> = BTreeSet::new();

    for component in reference.components() {
        ctx.check_cancelled()?;
        if component.is_system() {
            continue;
        }
        let Some(counterpart) = target.component(&component.id) else {
            children.push(component_leaf(component, DeltaKind::Removed));
            continue;
        };
        matched.insert(component.id.as_str());
        check_version_changes(component, counterpart, &mut children);
        if component.version == counterpart.version && !force {
            continue;
        }
        let start = Instant::now();
        match compare_components(Some(component), Some(counterpart), reference, target, ctx) {
            Ok(Some(delta)) => children.push(delta),
            Ok(None) => {}
            Err(CompareError::Cancelled) => return Err(CompareError::Cancelled),
            Err(error) => {
                tracing::warn!(
                    component = %component.id,
                    error = %error,
                    "component comparison failed; skipping"
                );
            }
        }
        tracing::debug!(
            component = %component.id,
            version = %component.version,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "component pair compared"
        );
    }

    for component in target.components() {
        if component.is_system() {
            continue;
        }
        if !matched.contains(component.id.as_str()) {
            children.push(component_leaf(component, DeltaKind::Added));
        }
    }

    Ok(Delta::group(children))
}

/// Compare a single component against its counterpart in a reference
/// baseline. System components compare as unchanged; a component unknown to
/// the reference is an addition.
pub fn compare_component_with_baseline(
    component: &Component,
    baseline: &Baseline,
    reference: &Baseline,
    ctx: &CompareContext<'_>,
    force: bool,
) -> Result<Option<Delta>, CompareError> {
    if component.is_system() {
        return Ok(None);
    }
    let Some(counterpart) = reference.component(&component.id) else {
        return Ok(Some(component_leaf(component, DeltaKind::Added)));
    };
    if component.version == counterpart.version && !force {
        return Ok(None);
    }
    compare_components(Some(counterpart), Some(component), reference, baseline, ctx)
}

/// Compare an arbitrary scope of types against a reference baseline. Each
/// entry is compared individually and the results aggregate into one tree;
/// any unrecoverable error fails the whole scope comparison rather than
/// returning a partial result.
pub fn compare_scope(
    scope: &[ScopeEntry],
    baseline: &Baseline,
    reference: &Baseline,
    ctx: &CompareContext<'_>,
) -> Result<Option<Delta>, CompareError> {
    let mut children = Vec::new();
    for entry in scope {
        ctx.check_cancelled()?;
        let component = baseline
            .component(&entry.component_id)
            .ok_or_else(|| ModelError::UnknownComponent(entry.component_id.clone()))?;
        let descriptor = component
            .find_type(&entry.type_name, None)
            .ok_or_else(|| ModelError::UnknownType {
                component: entry.component_id.clone(),
                type_name: entry.type_name.clone(),
            })?;
        let Some(counterpart) = reference.component(&component.id) else {
            children.push(component_leaf(component, DeltaKind::Added));
            continue;
        };
        if let Some(delta) =
            compare_type(descriptor, counterpart, component, reference, baseline, ctx)?
        {
            children.push(delta);
        }
    }
    Ok(Delta::group(children))
}
