//! Static field exclusion policies.

/// A named, immutable set of fields to omit from serialized output.
///
/// Policies are built in `const` context and shared read-only by every
/// request. Naming a field the entity does not have is allowed and simply
/// excludes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionPolicy {
    name: &'static str,
    excluded: &'static [&'static str],
}

impl ProjectionPolicy {
    /// A policy that serializes every field except the named ones.
    pub const fn serialize_all_except(
        name: &'static str,
        excluded: &'static [&'static str],
    ) -> Self {
        Self { name, excluded }
    }

    /// A policy that exposes every field.
    pub const fn serialize_all(name: &'static str) -> Self {
        Self { name, excluded: &[] }
    }

    /// Returns the policy name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the excluded field names.
    pub fn excluded(&self) -> &'static [&'static str] {
        self.excluded
    }

    /// Returns true when `field` must be omitted.
    pub fn excludes(&self, field: &str) -> bool {
        self.excluded.contains(&field)
    }
}

impl std::fmt::Display for ProjectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
