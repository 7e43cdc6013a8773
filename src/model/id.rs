//! Section identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, runtime-only identifier of a section.
///
/// Ids are used for selection and reordering and are never parsed for
/// meaning. Fresh ids are random UUIDv4 tokens, so two sections created in
/// the same clock tick still get distinct ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Generate a new collision-resistant id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for SectionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_unique_in_tight_loop() {
        let ids: HashSet<SectionId> = (0..1000).map(|_| SectionId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = SectionId::from("1700000000000");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1700000000000\"");
    }
}
