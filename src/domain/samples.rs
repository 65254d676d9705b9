//! Sample family records
//!
//! Four families inserted by `hearth run`. Ids carry a fresh UUID suffix so a
//! second run against the same container never collides with the first.

use super::family::{Address, Child, Family, FamilyBuilder, Pet};
use crate::domain::Result;
use uuid::Uuid;

/// Last names of the sample families, in insert order
pub const SAMPLE_LAST_NAMES: [&str; 4] = ["Andersen", "Wakefield", "Johnson", "Smith"];

/// Last names the sample query filters on
pub const SAMPLE_QUERY_LAST_NAMES: [&str; 3] = ["Andersen", "Wakefield", "Johnson"];

fn sample_id(last_name: &str) -> String {
    format!("{last_name}-{}", Uuid::new_v4())
}

fn child(first_name: &str, family_name: Option<&str>, gender: &str, grade: u32, pets: &[&str]) -> Child {
    Child {
        family_name: family_name.map(str::to_string),
        first_name: first_name.to_string(),
        gender: gender.to_string(),
        grade,
        pets: pets
            .iter()
            .map(|name| Pet {
                given_name: name.to_string(),
            })
            .collect(),
    }
}

fn address(state: &str, county: &str, city: &str) -> Address {
    Address {
        state: state.to_string(),
        county: county.to_string(),
        city: city.to_string(),
    }
}

/// The Andersen family
pub fn andersen() -> Result<Family> {
    FamilyBuilder::new(sample_id("Andersen"), "Andersen")
        .parent(None, "Thomas")
        .parent(None, "Mary Kay")
        .child(child("Henriette Thaulow", None, "female", 5, &["Fluffy"]))
        .address(address("WA", "King", "Seattle"))
        .registered(true)
        .build()
}

/// The Wakefield family
pub fn wakefield() -> Result<Family> {
    FamilyBuilder::new(sample_id("Wakefield"), "Wakefield")
        .parent(Some("Wakefield"), "Robin")
        .parent(Some("Miller"), "Ben")
        .child(child("Jesse", Some("Merriam"), "female", 8, &["Goofy", "Shadow"]))
        .child(child("Lisa", Some("Miller"), "female", 1, &[]))
        .address(address("NY", "Manhattan", "NY"))
        .registered(false)
        .build()
}

/// The Johnson family
pub fn johnson() -> Result<Family> {
    FamilyBuilder::new(sample_id("Johnson"), "Johnson")
        .parent(None, "John")
        .parent(None, "Lili")
        .address(address("MA", "Middlesex", "Cambridge"))
        .registered(true)
        .build()
}

/// The Smith family
pub fn smith() -> Result<Family> {
    FamilyBuilder::new(sample_id("Smith"), "Smith")
        .parent(None, "Jim")
        .parent(None, "Jane")
        .child(child("Tom", None, "male", 3, &["Rex"]))
        .address(address("TX", "Travis", "Austin"))
        .registered(false)
        .build()
}

/// All sample families, in [`SAMPLE_LAST_NAMES`] order
pub fn sample_families() -> Result<Vec<Family>> {
    Ok(vec![andersen()?, wakefield()?, johnson()?, smith()?])
}
