//! Store abstraction layer
//!
//! This module provides a trait-based abstraction over the document store,
//! allowing Hearth to run the same workload against Azure Cosmos DB or an
//! in-memory store.

pub mod factory;
pub mod traits;

pub use factory::create_family_store;
pub use traits::{
    ContainerHandle, ContainerSpec, DatabaseHandle, FamilyQuery, FamilyStore, QueryPage,
    QueryPageStream, ReadReceipt, RequestCost, WriteReceipt,
};
