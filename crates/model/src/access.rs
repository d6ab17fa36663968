//! Raw access-modifier bits for types and members.
//!
//! The bit layout follows the class-file convention so that modifiers read
//! from an external model can be carried through unchanged. Deltas store the
//! raw bits; they drive message formatting, never comparison decisions.

use serde::Serialize;
use std::ops::{BitOr, BitOrAssign};

/// Access-modifier bit set of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct AccessFlags(pub u32);

impl AccessFlags {
    pub const NONE: AccessFlags = AccessFlags(0);
    pub const PUBLIC: AccessFlags = AccessFlags(0x0001);
    pub const PRIVATE: AccessFlags = AccessFlags(0x0002);
    pub const PROTECTED: AccessFlags = AccessFlags(0x0004);
    pub const STATIC: AccessFlags = AccessFlags(0x0008);
    pub const FINAL: AccessFlags = AccessFlags(0x0010);
    pub const ABSTRACT: AccessFlags = AccessFlags(0x0400);

    /// Returns true if all bits of `other` are set in `self`.
    pub fn contains(self, other: AccessFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_public(self) -> bool {
        self.contains(AccessFlags::PUBLIC)
    }

    pub fn is_protected(self) -> bool {
        self.contains(AccessFlags::PROTECTED)
    }

    pub fn is_private(self) -> bool {
        self.contains(AccessFlags::PRIVATE)
    }

    /// Default (package) access: none of public, protected or private.
    pub fn is_default(self) -> bool {
        !self.is_public() && !self.is_protected() && !self.is_private()
    }

    /// Parse a single modifier name as written in baseline documents.
    pub fn from_name(name: &str) -> Option<AccessFlags> {
        match name {
            "public" => Some(AccessFlags::PUBLIC),
            "private" => Some(AccessFlags::PRIVATE),
            "protected" => Some(AccessFlags::PROTECTED),
            "static" => Some(AccessFlags::STATIC),
            "final" => Some(AccessFlags::FINAL),
            "abstract" => Some(AccessFlags::ABSTRACT),
            _ => None,
        }
    }
}

impl BitOr for AccessFlags {
    type Output = AccessFlags;

    fn bitor(self, rhs: AccessFlags) -> AccessFlags {
        AccessFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for AccessFlags {
    fn bitor_assign(&mut self, rhs: AccessFlags) {
        self.0 |= rhs.0;
    }
}
