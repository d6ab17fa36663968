//! Type descriptors, members, and origin-scoped type containers.

use crate::access::AccessFlags;
use std::collections::BTreeMap;

/// Where a type sits in its enclosing source: only top-level types take part
/// in component comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeForm {
    TopLevel,
    Member,
    Local,
    Anonymous,
}

/// Kind of a type member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemberKind {
    Method,
    Constructor,
    Field,
    /// A nested type declared as a member of this type.
    Type,
}

impl MemberKind {
    pub fn from_name(name: &str) -> Option<MemberKind> {
        match name {
            "method" => Some(MemberKind::Method),
            "constructor" => Some(MemberKind::Constructor),
            "field" => Some(MemberKind::Field),
            "type" => Some(MemberKind::Type),
            _ => None,
        }
    }
}

/// One declared member of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    /// Descriptor-style signature; present for methods and constructors.
    pub signature: Option<String>,
    pub modifiers: AccessFlags,
}

/// Structural descriptor of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Fully qualified name, e.g. `com.example.core.Widget`.
    pub name: String,
    pub form: TypeForm,
    pub modifiers: AccessFlags,
    pub members: Vec<Member>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, modifiers: AccessFlags) -> TypeDescriptor {
        TypeDescriptor {
            name: name.into(),
            form: TypeForm::TopLevel,
            modifiers,
            members: Vec::new(),
        }
    }

    /// The package portion of the qualified name; empty for unqualified names.
    pub fn package(&self) -> &str {
        match self.name.rfind('.') {
            Some(index) => &self.name[..index],
            None => "",
        }
    }

    /// Member, local, and anonymous types are skipped by every comparison.
    pub fn is_nested(&self) -> bool {
        self.form != TypeForm::TopLevel
    }
}

/// A group of packages holding type descriptors, tagged with the component
/// id the content originates from. Scoped lookups filter containers by
/// origin; unscoped lookups search all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeContainer {
    pub origin: String,
    pub packages: BTreeMap<String, Vec<TypeDescriptor>>,
}

impl TypeContainer {
    pub fn new(origin: impl Into<String>) -> TypeContainer {
        TypeContainer {
            origin: origin.into(),
            packages: BTreeMap::new(),
        }
    }

    /// Insert a descriptor under the package derived from its name.
    pub fn push_type(&mut self, descriptor: TypeDescriptor) {
        let package = descriptor.package().to_string();
        self.packages.entry(package).or_default().push(descriptor);
    }

    /// All types held by this container as `(package, descriptor)` pairs,
    /// in deterministic package order.
    pub fn types(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.packages
            .iter()
            .flat_map(|(package, types)| types.iter().map(move |t| (package.as_str(), t)))
    }

    pub fn has_package(&self, package: &str) -> bool {
        self.packages.contains_key(package)
    }

    /// Direct lookup of a type by qualified name.
    pub fn find_type(&self, name: &str) -> Option<&TypeDescriptor> {
        let package = match name.rfind('.') {
            Some(index) => &name[..index],
            None => "",
        };
        self.packages
            .get(package)
            .and_then(|types| types.iter().find(|t| t.name == name))
    }
}
