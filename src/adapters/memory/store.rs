//! Process-local family store
//!
//! Honours the same contract as the Cosmos store: idempotent ensure calls,
//! ids unique within a partition, point reads by id and partition key, and
//! paged filtered queries. Documents are kept as JSON so a read hands back
//! exactly what was written.

use crate::adapters::database::{
    ContainerHandle, ContainerSpec, DatabaseHandle, FamilyQuery, FamilyStore, QueryPage,
    QueryPageStream, ReadReceipt, RequestCost, WriteReceipt,
};
use crate::domain::family::Family;
use crate::domain::ids::ItemKey;
use crate::domain::{CosmosDbError, HearthError, Result};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;
use tokio::sync::RwLock;

/// Nominal request charge reported for every point operation
pub const NOMINAL_REQUEST_CHARGE: f64 = 1.0;

#[derive(Debug, Default)]
struct MemoryDatabase {
    containers: HashMap<String, MemoryContainer>,
}

#[derive(Debug)]
struct MemoryContainer {
    partition_key_path: String,
    // (partition key value, id) -> document
    items: BTreeMap<(String, String), Value>,
}

/// In-memory [`FamilyStore`]
#[derive(Debug, Default)]
pub struct InMemoryFamilyStore {
    databases: RwLock<HashMap<String, MemoryDatabase>>,
}

impl InMemoryFamilyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a container, `None` if it does not exist
    pub async fn item_count(&self, container: &ContainerHandle) -> Option<usize> {
        let databases = self.databases.read().await;
        databases
            .get(&container.database)
            .and_then(|db| db.containers.get(&container.id))
            .map(|c| c.items.len())
    }
}

/// Value at a `/a/b` path inside a document, as a string partition key
fn partition_value(document: &Value, path: &str) -> Option<String> {
    match document.pointer(path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn container_not_found(container: &ContainerHandle) -> HearthError {
    HearthError::CosmosDb(CosmosDbError::ContainerNotFound(format!(
        "{}/{}",
        container.database, container.id
    )))
}

#[async_trait]
impl FamilyStore for InMemoryFamilyStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ensure_database(&self, name: &str) -> Result<DatabaseHandle> {
        if name.is_empty() {
            return Err(HearthError::Validation("Database name cannot be empty".to_string()));
        }

        let mut databases = self.databases.write().await;
        if databases.contains_key(name) {
            tracing::info!(database = %name, "Database already exists");
        } else {
            databases.insert(name.to_string(), MemoryDatabase::default());
            tracing::info!(database = %name, "Database created successfully");
        }

        Ok(DatabaseHandle {
            id: name.to_string(),
        })
    }

    async fn ensure_container(
        &self,
        database: &DatabaseHandle,
        spec: &ContainerSpec,
    ) -> Result<ContainerHandle> {
        let mut databases = self.databases.write().await;
        let db = databases.get_mut(&database.id).ok_or_else(|| {
            HearthError::CosmosDb(CosmosDbError::DatabaseNotFound(database.id.clone()))
        })?;

        let container = db
            .containers
            .entry(spec.name.clone())
            .or_insert_with(|| {
                tracing::info!(
                    container = %spec.name,
                    partition_key = %spec.partition_key_path,
                    "Container created successfully"
                );
                MemoryContainer {
                    partition_key_path: spec.partition_key_path.clone(),
                    items: BTreeMap::new(),
                }
            });

        Ok(ContainerHandle {
            database: database.id.clone(),
            id: spec.name.clone(),
            partition_key_path: container.partition_key_path.clone(),
        })
    }

    async fn create_family(
        &self,
        container: &ContainerHandle,
        family: &Family,
    ) -> Result<WriteReceipt> {
        family.validate()?;
        let started = Instant::now();
        let document = serde_json::to_value(family)?;

        let mut databases = self.databases.write().await;
        let target = databases
            .get_mut(&container.database)
            .and_then(|db| db.containers.get_mut(&container.id))
            .ok_or_else(|| container_not_found(container))?;

        let partition = partition_value(&document, &target.partition_key_path).ok_or_else(|| {
            HearthError::Store(format!(
                "Family {} has no value at partition key path {}",
                family.id, target.partition_key_path
            ))
        })?;

        // Same rule the service applies: the value at the path must be the key sent
        if partition != family.partition_key() {
            return Err(HearthError::Store(format!(
                "Family {} has '{}' at {} but is keyed by '{}'",
                family.id,
                partition,
                target.partition_key_path,
                family.partition_key()
            )));
        }

        let slot = (partition, family.id.as_str().to_string());
        if target.items.contains_key(&slot) {
            return Err(HearthError::CosmosDb(CosmosDbError::Conflict(format!(
                "Family {} already exists in partition {}",
                family.id, slot.0
            ))));
        }
        target.items.insert(slot, document);

        Ok(WriteReceipt {
            key: family.key(),
            cost: RequestCost {
                request_charge: NOMINAL_REQUEST_CHARGE,
                latency: started.elapsed(),
            },
        })
    }

    async fn read_family(&self, container: &ContainerHandle, key: &ItemKey) -> Result<ReadReceipt> {
        let started = Instant::now();

        let databases = self.databases.read().await;
        let target = databases
            .get(&container.database)
            .and_then(|db| db.containers.get(&container.id))
            .ok_or_else(|| container_not_found(container))?;

        let document = target
            .items
            .get(&(key.partition_key.clone(), key.id.as_str().to_string()))
            .ok_or_else(|| HearthError::CosmosDb(CosmosDbError::DocumentNotFound(key.to_string())))?;

        let family: Family = serde_json::from_value(document.clone()).map_err(|e| {
            HearthError::CosmosDb(CosmosDbError::DeserializationFailed(format!(
                "Failed to deserialize family {key}: {e}"
            )))
        })?;

        Ok(ReadReceipt {
            family,
            cost: RequestCost {
                request_charge: NOMINAL_REQUEST_CHARGE,
                latency: started.elapsed(),
            },
        })
    }

    async fn query_families(
        &self,
        container: &ContainerHandle,
        query: &FamilyQuery,
        page_size: usize,
    ) -> Result<QueryPageStream> {
        let page_size = page_size.max(1);

        let databases = self.databases.read().await;
        let target = databases
            .get(&container.database)
            .and_then(|db| db.containers.get(&container.id))
            .ok_or_else(|| container_not_found(container))?;

        let mut matches = Vec::new();
        for document in target.items.values() {
            let family: Family = serde_json::from_value(document.clone())?;
            if query.matches(&family) {
                matches.push(family);
            }
        }

        let pages: Vec<Result<QueryPage>> = matches
            .chunks(page_size)
            .map(|chunk| {
                Ok(QueryPage {
                    items: chunk.to_vec(),
                    request_charge: NOMINAL_REQUEST_CHARGE * chunk.len() as f64,
                })
            })
            .collect();

        Ok(stream::iter(pages).boxed())
    }
}
