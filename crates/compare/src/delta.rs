//! The hierarchical delta tree.
//!
//! A delta is either a leaf describing one compatibility-relevant finding,
//! or a group whose meaning is the union of its leaves. Comparisons return
//! `Option<Delta>`: `None` means "no difference found", so callers never
//! compare against a sentinel value.

use serde::Serialize;
use std::fmt;
use strata_model::{AccessFlags, Restrictions};

/// The structural level a leaf delta describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Baseline,
    Component,
    ExecutionEnvironment,
    Type,
    TypeMember,
    Method,
    Field,
    Constructor,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Baseline => "baseline",
            ElementType::Component => "component",
            ElementType::ExecutionEnvironment => "execution_environment",
            ElementType::Type => "type",
            ElementType::TypeMember => "type_member",
            ElementType::Method => "method",
            ElementType::Field => "field",
            ElementType::Constructor => "constructor",
        };
        write!(f, "{}", name)
    }
}

/// What happened to the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    Added,
    Removed,
    Changed,
}

impl fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeltaKind::Added => "added",
            DeltaKind::Removed => "removed",
            DeltaKind::Changed => "changed",
        };
        write!(f, "{}", name)
    }
}

/// Qualifies the kind within the element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaFlag {
    MajorVersion,
    MinorVersion,
    ApiComponent,
    ExecutionEnvironment,
    Type,
    ApiType,
    TypeVisibility,
    ReexportedType,
    ReexportedApiType,
    TypeMember,
    Method,
    Field,
    Constructor,
}

impl fmt::Display for DeltaFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeltaFlag::MajorVersion => "major_version",
            DeltaFlag::MinorVersion => "minor_version",
            DeltaFlag::ApiComponent => "api_component",
            DeltaFlag::ExecutionEnvironment => "execution_environment",
            DeltaFlag::Type => "type",
            DeltaFlag::ApiType => "api_type",
            DeltaFlag::TypeVisibility => "type_visibility",
            DeltaFlag::ReexportedType => "reexported_type",
            DeltaFlag::ReexportedApiType => "reexported_api_type",
            DeltaFlag::TypeMember => "type_member",
            DeltaFlag::Method => "method",
            DeltaFlag::Field => "field",
            DeltaFlag::Constructor => "constructor",
        };
        write!(f, "{}", name)
    }
}

/// One compatibility finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leaf {
    /// Versioned id of the owning component; absent for baseline-scope
    /// deltas (component additions/removals).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    pub element_type: ElementType,
    pub kind: DeltaKind,
    pub flag: DeltaFlag,
    /// Declared usage restrictions at the time of the event.
    pub restrictions: Restrictions,
    /// Raw access-modifier bits of the affected element; drives message
    /// formatting, never comparison.
    pub modifiers: AccessFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Stable identity string for sorting and deduplication.
    pub key: String,
    /// Ordered message-template arguments (0-3 entries).
    pub arguments: Vec<String>,
}

/// A node of the delta tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Delta {
    Group { children: Vec<Delta> },
    Leaf(Leaf),
}

impl Delta {
    /// Aggregate child deltas into a group; `None` when there is nothing to
    /// aggregate, so "no difference" composes through.
    pub fn group(children: Vec<Delta>) -> Option<Delta> {
        if children.is_empty() {
            None
        } else {
            Some(Delta::Group { children })
        }
    }

    /// True when the subtree holds no findings at all. A group of empty
    /// groups is itself empty; a leaf never is.
    pub fn is_empty(&self) -> bool {
        match self {
            Delta::Group { children } => children.iter().all(Delta::is_empty),
            Delta::Leaf(_) => false,
        }
    }

    pub fn children(&self) -> &[Delta] {
        match self {
            Delta::Group { children } => children,
            Delta::Leaf(_) => &[],
        }
    }

    /// All leaves of the subtree, depth-first.
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        match self {
            Delta::Group { children } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
            Delta::Leaf(leaf) => out.push(leaf),
        }
    }

    /// Leaves sorted by `(kind, flag, key)` — the deterministic order
    /// consumers use for reporting. The tree itself is accumulated in an
    /// order-independent container and is not sorted.
    pub fn sorted_leaves(&self) -> Vec<&Leaf> {
        let mut leaves = self.leaves();
        leaves.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.flag.cmp(&b.flag))
                .then_with(|| a.key.cmp(&b.key))
        });
        leaves
    }
}
