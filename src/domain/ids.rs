//! Identifier newtypes
//!
//! Point reads need both the document id and the partition key value; these
//! types keep the two from being swapped at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Family document identifier
///
/// Unique within a partition. Sample families use `{LastName}-{uuid}`.
///
/// # Examples
///
/// ```
/// use hearth::domain::ids::FamilyId;
/// use std::str::FromStr;
///
/// let id = FamilyId::from_str("Andersen-1").unwrap();
/// assert_eq!(id.as_str(), "Andersen-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct FamilyId(String);

impl FamilyId {
    /// Creates a new FamilyId, rejecting blank ids
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Family ID cannot be empty".to_string());
        }
        // Cosmos DB rejects these characters in resource ids
        if id.contains(['/', '\\', '?', '#']) {
            return Err(format!(
                "Family ID '{id}' cannot contain '/', '\\', '?' or '#'"
            ));
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FamilyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FamilyId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl AsRef<str> for FamilyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Address of a single item: document id plus partition key value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    /// Document id
    pub id: FamilyId,

    /// Partition key value (the family's last name)
    pub partition_key: String,
}

impl ItemKey {
    /// Creates a new item key
    pub fn new(id: FamilyId, partition_key: impl Into<String>) -> Self {
        Self {
            id,
            partition_key: partition_key.into(),
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.partition_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_id_valid() {
        let id = FamilyId::new("Wakefield-7").unwrap();
        assert_eq!(id.as_str(), "Wakefield-7");
        assert_eq!(id.to_string(), "Wakefield-7");
        assert_eq!(id.into_inner(), "Wakefield-7".to_string());
    }

    #[test]
    fn test_family_id_empty() {
        assert!(FamilyId::new("").is_err());
        assert!(FamilyId::new("   ").is_err());
    }

    #[test]
    fn test_family_id_reserved_characters() {
        assert!(FamilyId::new("a/b").is_err());
        assert!(FamilyId::new("a?b").is_err());
        assert!(FamilyId::new("a#b").is_err());
        assert!(FamilyId::new("a\\b").is_err());
    }

    #[test]
    fn test_family_id_serializes_as_string() {
        let id = FamilyId::new("Smith-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Smith-1\"");
    }

    #[test]
    fn test_family_id_deserialize_validates() {
        let id: FamilyId = serde_json::from_str("\"Smith-1\"").unwrap();
        assert_eq!(id.as_str(), "Smith-1");

        assert!(serde_json::from_str::<FamilyId>("\"\"").is_err());
        assert!(serde_json::from_str::<FamilyId>("\"a/b\"").is_err());
    }

    #[test]
    fn test_item_key_display() {
        let key = ItemKey::new(FamilyId::new("Johnson-1").unwrap(), "Johnson");
        assert_eq!(key.to_string(), "Johnson-1@Johnson");
    }
}
