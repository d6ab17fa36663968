//! strata-model: read-only structural model of API baselines.
//!
//! A baseline is a snapshot of a modular system's components; each component
//! exposes versioned metadata, required-component edges, execution
//! environments, and type containers holding structural type descriptors.
//! Visibility and usage-restriction annotations live in a per-component API
//! description, resolved by `(package, type name)`.
//!
//! The model is immutable once built and carries no comparison logic; the
//! delta engine lives in `strata-compare`. Baselines are normally loaded from
//! interchange JSON documents via [`document::from_document`].

pub mod access;
pub mod baseline;
pub mod component;
pub mod document;
pub mod error;
pub mod types;
pub mod version;
pub mod visibility;

pub use access::AccessFlags;
pub use baseline::Baseline;
pub use component::{ApiDescription, Component, RequiredComponent};
pub use document::{from_document, from_str};
pub use error::ModelError;
pub use types::{Member, MemberKind, TypeContainer, TypeDescriptor, TypeForm};
pub use version::Version;
pub use visibility::{Annotations, Restrictions, Visibility};
