//! Cross-component re-export resolution.
//!
//! When a type present on the reference side cannot be found by direct
//! lookup in the paired component, the owning baseline is asked for every
//! component that can supply the type's package, and each provider is
//! probed in turn. Whether the winning provider is reached through an
//! `exported` requirement edge decides between the re-export delta variants
//! and plain added/removed.

use crate::context::CompareContext;
use strata_model::{Baseline, Component, TypeDescriptor};

/// A type located in another component of the same baseline.
pub struct Resolution<'a> {
    /// The component that actually holds the type.
    pub provider: &'a Component,
    pub descriptor: &'a TypeDescriptor,
    /// True when the provider is reached through an `exported` requirement
    /// edge of the component the lookup started from.
    pub reexported: bool,
}

/// Probe the providers of `package` in `baseline` for `type_name`, skipping
/// `component` itself (which has already been checked directly). Providers
/// are tried in the baseline's priority order; the first match wins.
pub fn resolve_in_providers<'a>(
    baseline: &'a Baseline,
    component: &Component,
    package: &str,
    type_name: &str,
    ctx: &CompareContext<'_>,
) -> Option<Resolution<'a>> {
    for provider in baseline.resolve_package(component, package) {
        if provider.id == component.id {
            continue;
        }
        let scope = ctx.lookup_scope(provider);
        if let Some(descriptor) = provider.find_type(type_name, scope) {
            let reexported = component
                .requires
                .iter()
                .any(|r| r.id == provider.id && r.exported);
            return Some(Resolution {
                provider,
                descriptor,
                reexported,
            });
        }
    }
    None
}
