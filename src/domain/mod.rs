//! Domain models and types for Hearth.
//!
//! - **Identifiers** ([`FamilyId`], [`ItemKey`])
//! - **Documents** ([`Family`] and its parts) plus the sample data in [`samples`]
//! - **Error types** ([`HearthError`], [`CosmosDbError`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use hearth::domain::samples;
//!
//! # fn example() -> hearth::domain::Result<()> {
//! let families = samples::sample_families()?;
//! for family in &families {
//!     println!("{} -> partition {}", family.id, family.partition_key());
//! }
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod family;
pub mod ids;
pub mod result;
pub mod samples;

pub use errors::{CosmosDbError, HearthError};
pub use family::{Address, Child, Family, FamilyBuilder, Parent, Pet};
pub use ids::{FamilyId, ItemKey};
pub use result::Result;
