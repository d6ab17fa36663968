//! Components and their API descriptions.

use crate::types::{TypeContainer, TypeDescriptor};
use crate::visibility::Annotations;
use std::collections::BTreeMap;

/// A dependency edge declared by a component. When `exported` is set, the
/// requirement's types become part of the requiring component's effective
/// API surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredComponent {
    pub id: String,
    pub exported: bool,
}

/// Visibility/restriction annotations for a component's content, resolved by
/// `(package, type name)`. Type entries override package defaults; an
/// element with neither has empty visibility and is filtered out of any
/// masked comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiDescription {
    pub packages: BTreeMap<String, Annotations>,
    pub types: BTreeMap<String, Annotations>,
}

impl ApiDescription {
    pub fn resolve(&self, package: &str, type_name: &str) -> Annotations {
        if let Some(annotations) = self.types.get(type_name) {
            return *annotations;
        }
        self.packages.get(package).copied().unwrap_or_default()
    }
}

/// A named, versioned unit exposing packages of types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: String,
    pub version: String,
    pub system: bool,
    pub execution_environments: Vec<String>,
    pub requires: Vec<RequiredComponent>,
    pub containers: Vec<TypeContainer>,
    pub description: ApiDescription,
}

impl Component {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Component {
        Component {
            id: id.into(),
            version: version.into(),
            system: false,
            execution_environments: Vec::new(),
            requires: Vec::new(),
            containers: Vec::new(),
            description: ApiDescription::default(),
        }
    }

    /// System components (execution-environment providers) are excluded from
    /// baseline comparison.
    pub fn is_system(&self) -> bool {
        self.system
    }

    /// The component's type containers. With `Some(origin)`, only containers
    /// whose content originates from that component id.
    pub fn api_type_containers(&self, scope: Option<&str>) -> Vec<&TypeContainer> {
        self.containers
            .iter()
            .filter(|c| scope.map_or(true, |origin| c.origin == origin))
            .collect()
    }

    /// Direct lookup of a type by qualified name, optionally restricted to
    /// containers with the given origin.
    pub fn find_type(&self, name: &str, scope: Option<&str>) -> Option<&TypeDescriptor> {
        self.api_type_containers(scope)
            .into_iter()
            .find_map(|c| c.find_type(name))
    }

    pub fn has_package(&self, package: &str) -> bool {
        self.containers.iter().any(|c| c.has_package(package))
    }

    /// API-description lookup for a type held by (or attributed to) this
    /// component.
    pub fn annotations(&self, package: &str, type_name: &str) -> Annotations {
        self.description.resolve(package, type_name)
    }

    /// Stable identity string carried on deltas: `id@version`.
    pub fn versioned_id(&self) -> String {
        format!("{}@{}", self.id, self.version)
    }
}
