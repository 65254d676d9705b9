//! Azure Cosmos DB integration
//!
//! [`CosmosDbClient`] owns the SDK client and the create-if-absent logic;
//! [`CosmosFamilyStore`] implements the store trait on top of it.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::CosmosFamilyStore;
pub use client::CosmosDbClient;
