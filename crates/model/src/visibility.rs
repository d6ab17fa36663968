//! Visibility and usage-restriction masks.
//!
//! Visibility describes whether an element is part of the intended API
//! surface; restrictions describe declared usage contracts (no-extend,
//! no-instantiate, ...). Both are small bit sets resolved from a component's
//! API description. Restrictions are carried on leaf deltas for downstream
//! severity classification but never decide comparability.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::ops::{BitOr, BitOrAssign};

/// Declared visibility of an element, and the mask selecting which
/// visibilities participate in a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility(pub u16);

impl Visibility {
    pub const NONE: Visibility = Visibility(0);
    /// Intended for external consumers.
    pub const API: Visibility = Visibility(0x0001);
    /// Service-provider surface: for implementors, not general callers.
    pub const SPI: Visibility = Visibility(0x0002);
    /// Not intended for consumption outside the owning component.
    pub const INTERNAL: Visibility = Visibility(0x0004);
    /// Mask accepting every visibility.
    pub const ALL: Visibility = Visibility(0xFFFF);

    /// Returns true if any bit is shared with `mask`.
    pub fn intersects(self, mask: Visibility) -> bool {
        self.0 & mask.0 != 0
    }

    pub fn is_api(self) -> bool {
        self.0 & Visibility::API.0 != 0
    }

    /// Parse a visibility name as written in baseline documents.
    pub fn from_name(name: &str) -> Option<Visibility> {
        match name {
            "api" => Some(Visibility::API),
            "spi" => Some(Visibility::SPI),
            "internal" => Some(Visibility::INTERNAL),
            _ => None,
        }
    }
}

impl BitOr for Visibility {
    type Output = Visibility;

    fn bitor(self, rhs: Visibility) -> Visibility {
        Visibility(self.0 | rhs.0)
    }
}

/// Declared API-usage restrictions of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Restrictions(pub u16);

impl Restrictions {
    pub const NONE: Restrictions = Restrictions(0);
    pub const NO_EXTEND: Restrictions = Restrictions(0x0001);
    pub const NO_IMPLEMENT: Restrictions = Restrictions(0x0002);
    pub const NO_INSTANTIATE: Restrictions = Restrictions(0x0004);
    pub const NO_REFERENCE: Restrictions = Restrictions(0x0008);
    pub const NO_OVERRIDE: Restrictions = Restrictions(0x0010);

    const NAMED: [(Restrictions, &'static str); 5] = [
        (Restrictions::NO_EXTEND, "no_extend"),
        (Restrictions::NO_IMPLEMENT, "no_implement"),
        (Restrictions::NO_INSTANTIATE, "no_instantiate"),
        (Restrictions::NO_REFERENCE, "no_reference"),
        (Restrictions::NO_OVERRIDE, "no_override"),
    ];

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Restrictions) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parse a restriction name as written in baseline documents.
    pub fn from_name(name: &str) -> Option<Restrictions> {
        Restrictions::NAMED
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(r, _)| *r)
    }

    /// The names of all set restriction bits, in declaration order.
    pub fn names(self) -> Vec<&'static str> {
        Restrictions::NAMED
            .iter()
            .filter(|(r, _)| self.contains(*r))
            .map(|(_, n)| *n)
            .collect()
    }
}

impl BitOr for Restrictions {
    type Output = Restrictions;

    fn bitor(self, rhs: Restrictions) -> Restrictions {
        Restrictions(self.0 | rhs.0)
    }
}

impl BitOrAssign for Restrictions {
    fn bitor_assign(&mut self, rhs: Restrictions) {
        self.0 |= rhs.0;
    }
}

// Restrictions appear in serialized delta trees; emit names, not raw bits.
impl Serialize for Restrictions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let names = self.names();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

/// Visibility and restrictions of one element, as resolved from a
/// component's API description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Annotations {
    pub visibility: Visibility,
    pub restrictions: Restrictions,
}

impl Annotations {
    pub fn new(visibility: Visibility, restrictions: Restrictions) -> Annotations {
        Annotations {
            visibility,
            restrictions,
        }
    }
}
