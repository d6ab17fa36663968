//! Tolerant structured version parsing.

/// A `major.minor.micro` version. Parsing is tolerant: callers treat an
/// unparseable version as "no version information" and emit no version
/// delta for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
}

impl Version {
    /// Parse `major[.minor[.micro[.qualifier]]]`. Missing segments default
    /// to zero; a trailing qualifier segment is ignored; any non-numeric
    /// required segment makes the whole version unparseable.
    pub fn parse(value: &str) -> Option<Version> {
        let mut segments = value.trim().splitn(4, '.');
        let major = segments.next()?.parse().ok()?;
        let minor = match segments.next() {
            Some(segment) => segment.parse().ok()?,
            None => 0,
        };
        let micro = match segments.next() {
            Some(segment) => segment.parse().ok()?,
            None => 0,
        };
        Some(Version {
            major,
            minor,
            micro,
        })
    }
}
