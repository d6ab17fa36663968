//! Shared read-only state for one comparison run.

use crate::error::CompareError;
use crate::typecmp::TypeComparator;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use strata_model::{Component, Visibility};

/// Everything a comparison needs besides the two sides being compared.
/// Passed explicitly through every visitation; there is no global state.
pub struct CompareContext<'a> {
    /// Which declared visibilities participate in the comparison.
    pub visibility: Visibility,
    /// Component ids whose types are looked up without origin
    /// qualification. This is the explicit exception table for
    /// platform-native components whose types are widely re-exported.
    pub unscoped: BTreeSet<String>,
    /// Member-level comparison collaborator.
    pub type_comparator: &'a dyn TypeComparator,
    /// Optional cooperative cancellation, checked between type iterations.
    pub cancel: Option<&'a AtomicBool>,
}

impl<'a> CompareContext<'a> {
    pub fn new(visibility: Visibility, type_comparator: &'a dyn TypeComparator) -> Self {
        CompareContext {
            visibility,
            unscoped: BTreeSet::new(),
            type_comparator,
            cancel: None,
        }
    }

    pub fn with_unscoped<I: IntoIterator<Item = String>>(mut self, ids: I) -> Self {
        self.unscoped.extend(ids);
        self
    }

    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// The origin scope to use when looking up types in `component`:
    /// `None` (search everything) for components in the exception table,
    /// the component's own id otherwise.
    pub fn lookup_scope<'c>(&self, component: &'c Component) -> Option<&'c str> {
        if self.unscoped.contains(&component.id) {
            None
        } else {
            Some(component.id.as_str())
        }
    }

    pub fn check_cancelled(&self) -> Result<(), CompareError> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(CompareError::Cancelled),
            _ => Ok(()),
        }
    }
}
