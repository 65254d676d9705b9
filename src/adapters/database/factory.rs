//! Store factory
//!
//! This module provides a factory function to create a family store based on configuration.

use crate::adapters::cosmosdb::{CosmosDbClient, CosmosFamilyStore};
use crate::adapters::database::traits::FamilyStore;
use crate::adapters::memory::InMemoryFamilyStore;
use crate::config::schema::{DatabaseTarget, HearthConfig};
use crate::domain::{HearthError, Result};
use std::sync::Arc;

/// Create a family store based on the configuration
///
/// Examines `database_target` and builds the matching implementation.
/// Building the Cosmos DB store does not contact the account; the first
/// request does.
///
/// # Errors
///
/// Returns an error if the target is `cosmosdb` and the `[cosmosdb]` section
/// is missing, or if the SDK client cannot be constructed.
pub fn create_family_store(config: &HearthConfig) -> Result<Arc<dyn FamilyStore>> {
    match config.database_target {
        DatabaseTarget::CosmosDB => {
            let cosmos_config = config.cosmosdb.as_ref().ok_or_else(|| {
                HearthError::Configuration(
                    "cosmosdb configuration is required when database_target is 'cosmosdb'"
                        .to_string(),
                )
            })?;

            tracing::info!(endpoint = %cosmos_config.endpoint, "Creating CosmosDB client");
            let client = CosmosDbClient::new(cosmos_config.clone())?;

            Ok(Arc::new(CosmosFamilyStore::new(client)) as Arc<dyn FamilyStore>)
        }
        DatabaseTarget::Memory => {
            tracing::info!("Creating in-memory store");
            Ok(Arc::new(InMemoryFamilyStore::new()) as Arc<dyn FamilyStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_target() {
        let store = create_family_store(&HearthConfig::in_memory()).unwrap();
        assert_eq!(store.backend(), "memory");
    }

    #[test]
    fn test_cosmos_target_without_section() {
        let mut config = HearthConfig::in_memory();
        config.database_target = DatabaseTarget::CosmosDB;

        let err = create_family_store(&config).err().unwrap();
        assert!(matches!(err, HearthError::Configuration(_)));
    }
}
