//! strata-compare: the API-compatibility delta engine.
//!
//! Given two baselines of a modular component system, the engine computes a
//! hierarchical delta describing every addition, removal, or change that
//! affects compatibility, tagged with element kind, change kind, change
//! flag, usage restrictions, and raw access modifiers.
//!
//! # Outcomes
//!
//! Every comparison returns `Result<Option<Delta>, CompareError>`:
//! `Ok(None)` means no difference was found, `Ok(Some(tree))` carries the
//! aggregated findings, and `Err` is a whole-comparison failure (including
//! cooperative cancellation). Per-element model failures inside a
//! visitation are logged and skipped, not surfaced.
//!
//! # Entry points
//!
//! - [`compare_baselines`] — pair every non-system component across two
//!   baselines, with version-consistency checks
//! - [`compare_component_with_baseline`] — one component against a baseline
//! - [`compare_components`] — one component pair, including
//!   execution-environment and re-export analysis
//! - [`compare_scope`] — an arbitrary set of types against a baseline
//!
//! Member-level comparison is delegated to the [`TypeComparator`] injected
//! through [`CompareContext`]; [`MemberComparator`] is the default.

pub mod baseline;
pub mod component;
pub mod context;
pub mod delta;
pub mod environments;
pub mod error;
pub mod filter;
pub mod resolve;
pub mod typecmp;

pub use baseline::{
    compare_baselines, compare_component_with_baseline, compare_scope, ScopeEntry,
};
pub use component::{compare_components, compare_type};
pub use context::CompareContext;
pub use delta::{Delta, DeltaFlag, DeltaKind, ElementType, Leaf};
pub use environments::compare_execution_environments;
pub use error::CompareError;
pub use filter::{is_api, should_skip};
pub use resolve::{resolve_in_providers, Resolution};
pub use typecmp::{MemberComparator, TypeComparator, TypeComparison, TypePair};
