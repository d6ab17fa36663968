//! Pairwise component comparison.
//!
//! Four visitation passes share one processed-name set: the reference
//! component's own containers, the reference's re-exported requirements,
//! the target's own containers, and the target's re-exported requirements.
//! The first two detect removals and visibility downgrades (resolving
//! apparent removals through re-export providers first); the last two
//! detect additions not already accounted for.

use crate::context::CompareContext;
use crate::delta::{Delta, DeltaFlag, DeltaKind, ElementType, Leaf};
use crate::environments;
use crate::error::CompareError;
use crate::filter;
use crate::resolve::{resolve_in_providers, Resolution};
use crate::typecmp::TypePair;
use std::collections::BTreeSet;
use strata_model::{
    AccessFlags, Baseline, Component, Restrictions, TypeDescriptor, Visibility,
};

/// Baseline-scope leaf for a component present on only one side.
pub(crate) fn component_leaf(component: &Component, kind: DeltaKind) -> Delta {
    Delta::Leaf(Leaf {
        component_id: None,
        element_type: ElementType::Baseline,
        kind,
        flag: DeltaFlag::ApiComponent,
        restrictions: Restrictions::NONE,
        modifiers: AccessFlags::NONE,
        type_name: None,
        key: component.id.clone(),
        arguments: vec![component.versioned_id()],
    })
}

fn type_leaf(
    component_id: String,
    kind: DeltaKind,
    flag: DeltaFlag,
    restrictions: Restrictions,
    modifiers: AccessFlags,
    type_name: &str,
) -> Delta {
    Delta::Leaf(Leaf {
        component_id: Some(component_id.clone()),
        element_type: ElementType::Type,
        kind,
        flag,
        restrictions,
        modifiers,
        type_name: Some(type_name.to_string()),
        key: type_name.to_string(),
        arguments: vec![type_name.to_string(), component_id],
    })
}

/// Compare a pair of components. An absent side yields a single
/// added/removed component delta; two absent sides are a caller error.
pub fn compare_components(
    reference: Option<&Component>,
    target: Option<&Component>,
    reference_baseline: &Baseline,
    target_baseline: &Baseline,
    ctx: &CompareContext<'_>,
) -> Result<Option<Delta>, CompareError> {
    let (reference, target) = match (reference, target) {
        (None, None) => return Err(CompareError::MissingInput),
        (None, Some(target)) => {
            return Ok(Some(component_leaf(target, DeltaKind::Added)));
        }
        (Some(reference), None) => {
            return Ok(Some(component_leaf(reference, DeltaKind::Removed)));
        }
        (Some(reference), Some(target)) => (reference, target),
    };

    let mut children = Vec::new();
    environments::compare_execution_environments(reference, target, &mut children);
    internal_compare(
        reference,
        target,
        reference_baseline,
        target_baseline,
        ctx,
        &mut children,
    )?;
    Ok(Delta::group(children))
}

/// Direct lookup in the target component, falling back to the target
/// baseline's package providers.
fn lookup_target<'a>(
    target: &'a Component,
    target_baseline: &'a Baseline,
    package: &str,
    type_name: &str,
    ctx: &CompareContext<'_>,
) -> Option<Resolution<'a>> {
    if let Some(descriptor) = target.find_type(type_name, ctx.lookup_scope(target)) {
        return Some(Resolution {
            provider: target,
            descriptor,
            reexported: false,
        });
    }
    resolve_in_providers(target_baseline, target, package, type_name, ctx)
}

fn internal_compare(
    reference: &Component,
    target: &Component,
    reference_baseline: &Baseline,
    target_baseline: &Baseline,
    ctx: &CompareContext<'_>,
    children: &mut Vec<Delta>,
) -> Result<(), CompareError> {
    let mut processed: BTreeSet<String> = BTreeSet::new();
    let reference_versioned = reference.versioned_id();
    let target_versioned = target.versioned_id();

    // pass 1: every type reachable from the reference component's own
    // containers, paired against the target side
    for container in reference.api_type_containers(ctx.lookup_scope(reference)) {
        for (package, descriptor) in container.types() {
            ctx.check_cancelled()?;
            if descriptor.is_nested() {
                continue;
            }
            visit_reference_type(
                package,
                descriptor,
                reference,
                target,
                reference_baseline,
                target_baseline,
                ctx,
                &mut processed,
                children,
            );
        }
    }

    // pass 2: types the reference re-exports from its requirements; their
    // disappearance from the target surface is a re-export removal
    for required in &reference.requires {
        if !required.exported {
            continue;
        }
        let Some(owner) = reference_baseline.component(&required.id) else {
            tracing::warn!(
                component = %required.id,
                "required component missing from reference baseline; skipping"
            );
            continue;
        };
        for container in owner.api_type_containers(None) {
            for (package, descriptor) in container.types() {
                ctx.check_cancelled()?;
                if descriptor.is_nested() {
                    continue;
                }
                visit_reexported_reference_type(
                    package,
                    descriptor,
                    owner,
                    &reference_versioned,
                    target,
                    target_baseline,
                    ctx,
                    &mut processed,
                    children,
                );
            }
        }
    }

    // pass 3: types in the target's own containers not already processed
    for container in target.api_type_containers(ctx.lookup_scope(target)) {
        for (package, descriptor) in container.types() {
            ctx.check_cancelled()?;
            if descriptor.is_nested() {
                continue;
            }
            let annotations = target.annotations(package, &descriptor.name);
            if filter::should_skip(ctx.visibility, annotations.visibility, descriptor.modifiers) {
                continue;
            }
            if !processed.insert(descriptor.name.clone()) {
                continue;
            }
            children.push(type_leaf(
                target_versioned.clone(),
                DeltaKind::Added,
                DeltaFlag::Type,
                annotations.restrictions,
                descriptor.modifiers,
                &descriptor.name,
            ));
        }
    }

    // pass 4: types newly re-exported into the target's surface
    for required in &target.requires {
        if !required.exported {
            continue;
        }
        let Some(owner) = target_baseline.component(&required.id) else {
            tracing::warn!(
                component = %required.id,
                "required component missing from target baseline; skipping"
            );
            continue;
        };
        for container in owner.api_type_containers(None) {
            for (package, descriptor) in container.types() {
                ctx.check_cancelled()?;
                if descriptor.is_nested() {
                    continue;
                }
                let annotations = owner.annotations(package, &descriptor.name);
                if filter::should_skip(
                    ctx.visibility,
                    annotations.visibility,
                    descriptor.modifiers,
                ) {
                    continue;
                }
                if !processed.insert(descriptor.name.clone()) {
                    continue;
                }
                children.push(type_leaf(
                    reference_versioned.clone(),
                    DeltaKind::Added,
                    DeltaFlag::ReexportedType,
                    annotations.restrictions,
                    descriptor.modifiers,
                    &descriptor.name,
                ));
            }
        }
    }

    Ok(())
}

fn visit_reference_type(
    package: &str,
    descriptor: &TypeDescriptor,
    reference: &Component,
    target: &Component,
    reference_baseline: &Baseline,
    target_baseline: &Baseline,
    ctx: &CompareContext<'_>,
    processed: &mut BTreeSet<String>,
    children: &mut Vec<Delta>,
) {
    let annotations = reference.annotations(package, &descriptor.name);
    let visibility = annotations.visibility;
    let target_versioned = target.versioned_id();

    let Some(resolution) =
        lookup_target(target, target_baseline, package, &descriptor.name, ctx)
    else {
        // genuinely absent from the target's effective surface
        if filter::should_skip(ctx.visibility, visibility, descriptor.modifiers) {
            return;
        }
        let flag = if filter::is_api(visibility, descriptor.modifiers) {
            DeltaFlag::ApiType
        } else {
            DeltaFlag::Type
        };
        children.push(type_leaf(
            target_versioned,
            DeltaKind::Removed,
            flag,
            Restrictions::NONE,
            descriptor.modifiers,
            &descriptor.name,
        ));
        return;
    };

    if !visibility.intersects(ctx.visibility) {
        return;
    }
    let target_annotations = resolution
        .provider
        .annotations(package, &resolution.descriptor.name);
    let target_visibility = target_annotations.visibility;
    if ctx.visibility == Visibility::API
        && (descriptor.modifiers.is_default() || descriptor.modifiers.is_private())
    {
        return;
    }

    if !filter::is_api(visibility, descriptor.modifiers)
        && filter::is_api(target_visibility, resolution.descriptor.modifiers)
    {
        // the type joined the API surface; no member-level history to diff
        processed.insert(descriptor.name.clone());
        children.push(type_leaf(
            target_versioned,
            DeltaKind::Added,
            DeltaFlag::Type,
            target_annotations.restrictions,
            resolution.descriptor.modifiers,
            &descriptor.name,
        ));
        return;
    }

    if filter::is_api(visibility, descriptor.modifiers)
        && !filter::is_api(target_visibility, resolution.descriptor.modifiers)
    {
        // visibility downgrade supersedes member-level diffing
        let flag = if resolution.reexported {
            DeltaFlag::ReexportedApiType
        } else {
            DeltaFlag::ApiType
        };
        children.push(type_leaf(
            target_versioned,
            DeltaKind::Removed,
            flag,
            target_annotations.restrictions,
            resolution.descriptor.modifiers,
            &descriptor.name,
        ));
        return;
    }

    if !target_visibility.intersects(ctx.visibility) {
        children.push(type_leaf(
            target_versioned,
            DeltaKind::Changed,
            DeltaFlag::TypeVisibility,
            target_annotations.restrictions,
            resolution.descriptor.modifiers,
            &descriptor.name,
        ));
    }

    processed.insert(descriptor.name.clone());
    let pair = TypePair {
        reference: descriptor,
        target: resolution.descriptor,
        reference_component: reference,
        target_component: resolution.provider,
        reference_baseline,
        target_baseline,
    };
    match ctx.type_comparator.compare(&pair, ctx.visibility) {
        Ok(comparison) => {
            if let Some(status) = comparison.status {
                tracing::warn!(
                    type_name = %descriptor.name,
                    status = %status,
                    "type comparison reported a diagnostic"
                );
            }
            if let Some(delta) = comparison.delta {
                children.push(delta);
            }
        }
        Err(error) => {
            tracing::warn!(
                type_name = %descriptor.name,
                error = %error,
                "type comparison failed; continuing with remaining types"
            );
        }
    }
}

fn visit_reexported_reference_type(
    package: &str,
    descriptor: &TypeDescriptor,
    owner: &Component,
    reference_versioned: &str,
    target: &Component,
    target_baseline: &Baseline,
    ctx: &CompareContext<'_>,
    processed: &mut BTreeSet<String>,
    children: &mut Vec<Delta>,
) {
    let annotations = owner.annotations(package, &descriptor.name);
    let visibility = annotations.visibility;

    let Some(resolution) =
        lookup_target(target, target_baseline, package, &descriptor.name, ctx)
    else {
        if filter::should_skip(ctx.visibility, visibility, descriptor.modifiers) {
            return;
        }
        children.push(type_leaf(
            reference_versioned.to_string(),
            DeltaKind::Removed,
            DeltaFlag::ReexportedType,
            Restrictions::NONE,
            descriptor.modifiers,
            &descriptor.name,
        ));
        return;
    };

    processed.insert(descriptor.name.clone());
    if descriptor.modifiers.is_default() || descriptor.modifiers.is_private() {
        return;
    }
    let target_annotations = resolution
        .provider
        .annotations(package, &resolution.descriptor.name);
    if filter::is_api(visibility, descriptor.modifiers)
        && !filter::is_api(
            target_annotations.visibility,
            resolution.descriptor.modifiers,
        )
    {
        children.push(type_leaf(
            reference_versioned.to_string(),
            DeltaKind::Removed,
            DeltaFlag::ReexportedApiType,
            target_annotations.restrictions,
            resolution.descriptor.modifiers,
            &descriptor.name,
        ));
    }
}

/// Compare a single type from `component` against its counterpart in the
/// reference component. Used for scope comparison; unlike the full component
/// comparison, a failing type comparator here fails the call.
pub fn compare_type(
    descriptor: &TypeDescriptor,
    reference_component: &Component,
    component: &Component,
    reference_baseline: &Baseline,
    baseline: &Baseline,
    ctx: &CompareContext<'_>,
) -> Result<Option<Delta>, CompareError> {
    if descriptor.is_nested() {
        return Ok(None);
    }
    let package = descriptor.package();
    let annotations = component.annotations(package, &descriptor.name);
    let visibility = annotations.visibility;
    let reference_annotations = reference_component.annotations(package, &descriptor.name);
    let reference_visibility = reference_annotations.visibility;
    let component_versioned = component.versioned_id();

    let Some(reference_descriptor) = reference_component.find_type(&descriptor.name, None) else {
        if filter::is_api(visibility, descriptor.modifiers) {
            return Ok(Some(type_leaf(
                component_versioned,
                DeltaKind::Added,
                DeltaFlag::Type,
                annotations.restrictions,
                descriptor.modifiers,
                &descriptor.name,
            )));
        }
        return Ok(None);
    };

    if !visibility.intersects(ctx.visibility) {
        if !reference_visibility.intersects(ctx.visibility) {
            return Ok(None);
        }
        if filter::is_api(reference_visibility, reference_descriptor.modifiers) {
            return Ok(Some(type_leaf(
                component_versioned,
                DeltaKind::Removed,
                DeltaFlag::ApiType,
                annotations.restrictions,
                descriptor.modifiers,
                &descriptor.name,
            )));
        }
    } else if !filter::is_api(reference_visibility, reference_descriptor.modifiers)
        && filter::is_api(visibility, descriptor.modifiers)
    {
        return Ok(Some(type_leaf(
            component_versioned,
            DeltaKind::Added,
            DeltaFlag::Type,
            annotations.restrictions,
            descriptor.modifiers,
            &descriptor.name,
        )));
    }

    if ctx.visibility == Visibility::API
        && (descriptor.modifiers.is_default() || descriptor.modifiers.is_private())
    {
        // reduced visibility when the reference side was accessible
        if reference_descriptor.modifiers.is_public()
            || reference_descriptor.modifiers.is_protected()
        {
            return Ok(Some(type_leaf(
                component_versioned,
                DeltaKind::Removed,
                DeltaFlag::ApiType,
                annotations.restrictions,
                descriptor.modifiers,
                &descriptor.name,
            )));
        }
        return Ok(None);
    }

    let pair = TypePair {
        reference: reference_descriptor,
        target: descriptor,
        reference_component,
        target_component: component,
        reference_baseline,
        target_baseline: baseline,
    };
    let comparison = ctx.type_comparator.compare(&pair, ctx.visibility)?;
    if let Some(status) = comparison.status {
        tracing::warn!(
            type_name = %descriptor.name,
            status = %status,
            "type comparison reported a diagnostic"
        );
    }
    Ok(comparison.delta)
}
