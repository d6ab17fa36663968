//! Baselines: component snapshots with package resolution.

use crate::component::Component;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// A complete snapshot of a modular system's components at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    pub name: String,
    components: BTreeMap<String, Component>,
}

impl Baseline {
    pub fn new(name: impl Into<String>) -> Baseline {
        Baseline {
            name: name.into(),
            components: BTreeMap::new(),
        }
    }

    pub fn add_component(&mut self, component: Component) {
        self.components.insert(component.id.clone(), component);
    }

    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.get(id)
    }

    /// All components in deterministic id order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The components that can supply `package` to `component`, in priority
    /// order: the component itself, its direct requirements in declaration
    /// order, then requirements reachable transitively through `exported`
    /// edges (breadth-first, deduplicated). Only components that actually
    /// contain the package are returned.
    pub fn resolve_package(&self, component: &Component, package: &str) -> Vec<&Component> {
        let mut providers = Vec::new();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        seen.insert(component.id.as_str());
        if component.has_package(package) {
            if let Some(own) = self.component(&component.id) {
                providers.push(own);
            }
        }

        let mut queue: VecDeque<&str> = component.requires.iter().map(|r| r.id.as_str()).collect();
        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            let Some(candidate) = self.component(id) else {
                continue;
            };
            if candidate.has_package(package) {
                providers.push(candidate);
            }
            for required in &candidate.requires {
                if required.exported {
                    queue.push_back(required.id.as_str());
                }
            }
        }
        providers
    }
}
