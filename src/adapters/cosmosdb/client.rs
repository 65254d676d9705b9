//! Cosmos DB client implementation
//!
//! Thin wrapper over `azure_data_cosmos` that builds the account client from
//! configuration and performs the create-if-absent calls for databases and
//! containers.

use super::models::{container_properties, sdk_consistency, sdk_error};
use crate::adapters::database::{ContainerHandle, ContainerSpec, DatabaseHandle};
use crate::config::CosmosDbConfig;
use crate::domain::{CosmosDbError, HearthError, Result};
use azure_core::credentials::Secret;
use azure_data_cosmos::clients::{ContainerClient, DatabaseClient};
use azure_data_cosmos::models::ThroughputProperties;
use azure_data_cosmos::{CosmosClient, CosmosClientOptions, CreateContainerOptions};

/// Cosmos DB account client for Hearth
pub struct CosmosDbClient {
    /// SDK account client
    client: CosmosClient,

    /// Configuration
    config: CosmosDbConfig,
}

impl CosmosDbClient {
    /// Create a new Cosmos DB client with key authentication
    ///
    /// No request is sent; the first ensure call is the first round trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the SDK rejects the endpoint or key.
    pub fn new(config: CosmosDbConfig) -> Result<Self> {
        use secrecy::ExposeSecret;

        let key_str: String = config.key.expose_secret().clone().into();
        let key = Secret::new(key_str);

        // TODO: pass preferred_regions through CosmosClientOptions once the
        // pinned azure_data_cosmos exposes application region routing.
        let options = Some(CosmosClientOptions::default());

        let client = CosmosClient::with_key(&config.endpoint, key, options).map_err(|e| {
            HearthError::CosmosDb(CosmosDbError::ConnectionFailed(format!(
                "Failed to create Cosmos client: {e}"
            )))
        })?;

        tracing::info!(
            endpoint = %config.endpoint,
            preferred_regions = ?config.preferred_regions,
            consistency_level = %config.consistency_level,
            "Cosmos DB client created"
        );

        Ok(Self { client, config })
    }

    /// Ensure the database exists, creating it if necessary
    pub async fn ensure_database(&self, name: &str) -> Result<DatabaseHandle> {
        let database = self.client.database_client(name);

        match database.read(None).await {
            Ok(_) => {
                tracing::info!(database = %name, "Database already exists");
            }
            Err(read_err) => {
                tracing::debug!(database = %name, error = %read_err, "Database read failed, creating");
                tracing::info!(database = %name, "Creating database");

                if let Err(e) = self.client.create_database(name, None).await {
                    match sdk_error(&e, e.to_string(), CosmosDbError::DatabaseCreationFailed) {
                        // Created by someone else between our read and create
                        CosmosDbError::Conflict(_) => {
                            tracing::info!(database = %name, "Database created concurrently");
                        }
                        CosmosDbError::DatabaseCreationFailed(msg) => {
                            return Err(CosmosDbError::DatabaseCreationFailed(format!(
                                "Failed to create database {name}: {msg}"
                            ))
                            .into());
                        }
                        other => return Err(other.into()),
                    }
                } else {
                    tracing::info!(database = %name, "Database created successfully");
                }
            }
        }

        Ok(DatabaseHandle {
            id: name.to_string(),
        })
    }

    /// Ensure a container exists, creating it with `spec` if necessary
    ///
    /// The returned handle carries the partition key path the workload was
    /// configured with; an existing container is not altered.
    pub async fn ensure_container(
        &self,
        database: &DatabaseHandle,
        spec: &ContainerSpec,
    ) -> Result<ContainerHandle> {
        let database_client = self.database_client(database);
        let container = database_client.container_client(&spec.name);

        match container.read(None).await {
            Ok(_) => {
                tracing::info!(container = %spec.name, "Container already exists");
            }
            Err(read_err) => {
                tracing::debug!(container = %spec.name, error = %read_err, "Container read failed, creating");
                tracing::info!(
                    container = %spec.name,
                    partition_key = %spec.partition_key_path,
                    throughput = spec.throughput,
                    "Creating container"
                );

                let options = CreateContainerOptions {
                    throughput: Some(ThroughputProperties::manual(spec.throughput as usize)),
                    ..Default::default()
                };

                if let Err(e) = database_client
                    .create_container(container_properties(spec), Some(options))
                    .await
                {
                    match sdk_error(&e, e.to_string(), CosmosDbError::ContainerCreationFailed) {
                        CosmosDbError::Conflict(_) => {
                            tracing::info!(container = %spec.name, "Container created concurrently");
                        }
                        CosmosDbError::ContainerCreationFailed(msg) => {
                            return Err(CosmosDbError::ContainerCreationFailed(format!(
                                "Failed to create container {}: {msg}",
                                spec.name
                            ))
                            .into());
                        }
                        other => return Err(other.into()),
                    }
                } else {
                    tracing::info!(container = %spec.name, "Container created successfully");
                }
            }
        }

        Ok(ContainerHandle {
            database: database.id.clone(),
            id: spec.name.clone(),
            partition_key_path: spec.partition_key_path.clone(),
        })
    }

    /// SDK database client for a handle
    pub fn database_client(&self, database: &DatabaseHandle) -> DatabaseClient {
        self.client.database_client(&database.id)
    }

    /// SDK container client for a handle
    pub fn container_client(&self, container: &ContainerHandle) -> ContainerClient {
        self.client
            .database_client(&container.database)
            .container_client(&container.id)
    }

    /// Read consistency to request, in SDK form
    pub fn read_consistency(&self) -> azure_data_cosmos::ConsistencyLevel {
        sdk_consistency(self.config.consistency_level)
    }
}
