//! Family document model
//!
//! A family is the single record type Hearth writes. It is stored as camelCase
//! JSON and partitioned on `/lastName`.

use super::ids::{FamilyId, ItemKey};
use crate::domain::{HearthError, Result};
use serde::{Deserialize, Serialize};

/// A family document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    /// Document id, unique within the partition
    pub id: FamilyId,

    /// Last name, used as the partition key value
    pub last_name: String,

    /// District the family lives in (`{state}-{county}`)
    #[serde(default)]
    pub district: String,

    /// Parents
    #[serde(default)]
    pub parents: Vec<Parent>,

    /// Children
    #[serde(default)]
    pub children: Vec<Child>,

    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Whether the family has completed registration
    #[serde(default)]
    pub is_registered: bool,
}

impl Family {
    /// Partition key value for this family
    pub fn partition_key(&self) -> &str {
        &self.last_name
    }

    /// The id + partition key pair needed for a point read
    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.id.clone(), self.last_name.clone())
    }

    /// Checks the fields the store relies on
    pub fn validate(&self) -> Result<()> {
        if self.last_name.trim().is_empty() {
            return Err(HearthError::Validation(format!(
                "Family {} has an empty last name (partition key)",
                self.id
            )));
        }
        Ok(())
    }
}

/// A parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    /// Family name, when it differs from the family's last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// First name
    pub first_name: String,
}

/// A child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    /// Family name, when it differs from the family's last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,

    /// First name
    pub first_name: String,

    /// Gender
    pub gender: String,

    /// School grade
    pub grade: u32,

    /// Pets
    #[serde(default)]
    pub pets: Vec<Pet>,
}

/// A pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Name the pet answers to
    pub given_name: String,
}

/// A postal address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// State
    pub state: String,

    /// County
    pub county: String,

    /// City
    pub city: String,
}

impl Address {
    /// District string derived from the address
    pub fn district(&self) -> String {
        format!("{}-{}", self.state, self.county)
    }
}

/// Builder for [`Family`]
///
/// # Examples
///
/// ```
/// use hearth::domain::family::{Address, FamilyBuilder};
///
/// let family = FamilyBuilder::new("Andersen-1", "Andersen")
///     .parent(None, "Thomas")
///     .address(Address {
///         state: "WA".to_string(),
///         county: "King".to_string(),
///         city: "Seattle".to_string(),
///     })
///     .registered(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(family.district, "WA-King");
/// ```
#[derive(Debug, Default)]
pub struct FamilyBuilder {
    id: String,
    last_name: String,
    parents: Vec<Parent>,
    children: Vec<Child>,
    address: Option<Address>,
    is_registered: bool,
}

impl FamilyBuilder {
    /// Starts a family with its id and last name
    pub fn new(id: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            last_name: last_name.into(),
            ..Default::default()
        }
    }

    /// Adds a parent
    pub fn parent(mut self, family_name: Option<&str>, first_name: &str) -> Self {
        self.parents.push(Parent {
            family_name: family_name.map(str::to_string),
            first_name: first_name.to_string(),
        });
        self
    }

    /// Adds a child
    pub fn child(mut self, child: Child) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the address; the district is derived from it
    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Sets the registration flag
    pub fn registered(mut self, is_registered: bool) -> Self {
        self.is_registered = is_registered;
        self
    }

    /// Builds and validates the family
    pub fn build(self) -> Result<Family> {
        let id = FamilyId::new(self.id).map_err(HearthError::Validation)?;
        let district = self
            .address
            .as_ref()
            .map(Address::district)
            .unwrap_or_default();

        let family = Family {
            id,
            last_name: self.last_name,
            district,
            parents: self.parents,
            children: self.children,
            address: self.address,
            is_registered: self.is_registered,
        };
        family.validate()?;
        Ok(family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seattle() -> Address {
        Address {
            state: "WA".to_string(),
            county: "King".to_string(),
            city: "Seattle".to_string(),
        }
    }

    #[test]
    fn test_builder_derives_district() {
        let family = FamilyBuilder::new("Andersen-1", "Andersen")
            .address(seattle())
            .build()
            .unwrap();

        assert_eq!(family.district, "WA-King");
        assert_eq!(family.partition_key(), "Andersen");
    }

    #[test]
    fn test_builder_rejects_empty_last_name() {
        let result = FamilyBuilder::new("x-1", "  ").build();
        assert!(matches!(result, Err(HearthError::Validation(_))));
    }

    #[test]
    fn test_builder_rejects_empty_id() {
        let result = FamilyBuilder::new("", "Smith").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_key_uses_last_name_as_partition() {
        let family = FamilyBuilder::new("Smith-9", "Smith").build().unwrap();
        let key = family.key();
        assert_eq!(key.id.as_str(), "Smith-9");
        assert_eq!(key.partition_key, "Smith");
    }

    #[test]
    fn test_serializes_camel_case() {
        let family = FamilyBuilder::new("Wakefield-1", "Wakefield")
            .parent(Some("Miller"), "Ben")
            .child(Child {
                family_name: None,
                first_name: "Jesse".to_string(),
                gender: "female".to_string(),
                grade: 8,
                pets: vec![Pet {
                    given_name: "Goofy".to_string(),
                }],
            })
            .registered(true)
            .build()
            .unwrap();

        let json = serde_json::to_value(&family).unwrap();
        assert_eq!(json["id"], "Wakefield-1");
        assert_eq!(json["lastName"], "Wakefield");
        assert_eq!(json["isRegistered"], true);
        assert_eq!(json["parents"][0]["familyName"], "Miller");
        assert_eq!(json["children"][0]["pets"][0]["givenName"], "Goofy");
        assert!(json.get("address").is_none());
    }

    #[test]
    fn test_deserializes_with_missing_optional_fields() {
        let json = serde_json::json!({
            "id": "Johnson-1",
            "lastName": "Johnson",
            "_rid": "abc",
            "_etag": "\"0000\""
        });

        let family: Family = serde_json::from_value(json).unwrap();
        assert_eq!(family.last_name, "Johnson");
        assert!(family.parents.is_empty());
        assert!(!family.is_registered);
    }

    #[test]
    fn test_deserialize_rejects_empty_id() {
        let json = serde_json::json!({
            "id": "",
            "lastName": "Johnson"
        });

        assert!(serde_json::from_value::<Family>(json).is_err());
    }
}
