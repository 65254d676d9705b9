//! Cosmos DB implementation of [`FamilyStore`]

use super::client::CosmosDbClient;
use super::models::{request_charge, sdk_error};
use crate::adapters::database::{
    ContainerHandle, ContainerSpec, DatabaseHandle, FamilyQuery, FamilyStore, QueryPage,
    QueryPageStream, ReadReceipt, RequestCost, WriteReceipt,
};
use crate::domain::family::Family;
use crate::domain::ids::ItemKey;
use crate::domain::{CosmosDbError, HearthError, Result};
use async_trait::async_trait;
use azure_data_cosmos::{ItemOptions, PartitionKey};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// Family store backed by an Azure Cosmos DB account
pub struct CosmosFamilyStore {
    client: Arc<CosmosDbClient>,
}

impl CosmosFamilyStore {
    /// Create a new store around a client
    pub fn new(client: CosmosDbClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl FamilyStore for CosmosFamilyStore {
    fn backend(&self) -> &'static str {
        "cosmosdb"
    }

    async fn ensure_database(&self, name: &str) -> Result<DatabaseHandle> {
        self.client.ensure_database(name).await
    }

    async fn ensure_container(
        &self,
        database: &DatabaseHandle,
        spec: &ContainerSpec,
    ) -> Result<ContainerHandle> {
        self.client.ensure_container(database, spec).await
    }

    async fn create_family(
        &self,
        container: &ContainerHandle,
        family: &Family,
    ) -> Result<WriteReceipt> {
        family.validate()?;

        let container_client = self.client.container_client(container);
        let partition_key = PartitionKey::from(family.partition_key().to_string());

        let started = Instant::now();
        let response = container_client
            .create_item(partition_key, family, None)
            .await
            .map_err(|e| {
                HearthError::from(sdk_error(
                    &e,
                    format!("Failed to insert {}: {e}", family.id),
                    CosmosDbError::InsertFailed,
                ))
            })?;
        let latency = started.elapsed();

        Ok(WriteReceipt {
            key: family.key(),
            cost: RequestCost {
                request_charge: request_charge(response.headers()),
                latency,
            },
        })
    }

    async fn read_family(&self, container: &ContainerHandle, key: &ItemKey) -> Result<ReadReceipt> {
        let container_client = self.client.container_client(container);
        let partition_key = PartitionKey::from(key.partition_key.clone());
        let options = ItemOptions {
            consistency_level: Some(self.client.read_consistency()),
            ..Default::default()
        };

        let started = Instant::now();
        let response = container_client
            .read_item::<Family>(partition_key, key.id.as_str(), Some(options))
            .await
            .map_err(|e| {
                HearthError::from(sdk_error(
                    &e,
                    format!("Failed to read {key}: {e}"),
                    CosmosDbError::ReadFailed,
                ))
            })?;
        let latency = started.elapsed();

        let request_charge = request_charge(response.headers());
        let family = response.into_body().map_err(|e| {
            HearthError::CosmosDb(CosmosDbError::DeserializationFailed(format!(
                "Failed to deserialize family {key}: {e}"
            )))
        })?;

        Ok(ReadReceipt {
            family,
            cost: RequestCost {
                request_charge,
                latency,
            },
        })
    }

    /// Runs the query once per last name in the filter, each scoped to that
    /// partition, and regroups the service pages into pages of `page_size`.
    async fn query_families(
        &self,
        container: &ContainerHandle,
        query: &FamilyQuery,
        page_size: usize,
    ) -> Result<QueryPageStream> {
        let container_client = self.client.container_client(container);
        let sql = query.to_sql();

        tracing::debug!(
            container = %container.id,
            query = %sql,
            partitions = query.last_names().len(),
            "Starting partition-scoped query"
        );

        let mut service_pages = Vec::with_capacity(query.last_names().len());
        for last_name in query.last_names() {
            let pager = container_client
                .query_items::<Family>(sql.clone(), PartitionKey::from(last_name.clone()), None)
                .map_err(|e| {
                    HearthError::CosmosDb(CosmosDbError::QueryFailed(format!(
                        "Failed to create query for partition {last_name}: {e}"
                    )))
                })?;

            let pages = pager
                .into_pages()
                .map(|page| match page {
                    Ok(page) => {
                        let request_charge = request_charge(page.headers());
                        Ok(QueryPage {
                            items: page.into_items(),
                            request_charge,
                        })
                    }
                    Err(e) => Err(HearthError::from(sdk_error(
                        &e,
                        format!("Failed to fetch query results: {e}"),
                        CosmosDbError::QueryFailed,
                    ))),
                })
                .boxed();
            service_pages.push(pages);
        }

        Ok(regroup_pages(stream::iter(service_pages).flatten().boxed(), page_size))
    }
}

struct Regroup {
    pages: QueryPageStream,
    items: Vec<Family>,
    request_charge: f64,
    exhausted: bool,
}

/// Regroup a stream of pages into pages of exactly `page_size` items, the
/// last one possibly shorter
///
/// Each emitted page carries the charge of the input pages consumed since
/// the previous one. A first error ends the stream.
fn regroup_pages(pages: QueryPageStream, page_size: usize) -> QueryPageStream {
    let page_size = page_size.max(1);
    let state = Regroup {
        pages,
        items: Vec::new(),
        request_charge: 0.0,
        exhausted: false,
    };

    stream::unfold(state, move |mut state| async move {
        loop {
            if state.items.len() >= page_size || (state.exhausted && !state.items.is_empty()) {
                let rest = state.items.split_off(page_size.min(state.items.len()));
                let items = std::mem::replace(&mut state.items, rest);
                let page = QueryPage {
                    items,
                    request_charge: std::mem::take(&mut state.request_charge),
                };
                return Some((Ok(page), state));
            }
            if state.exhausted {
                // Charge of trailing empty pages still gets reported
                if state.request_charge > 0.0 {
                    let page = QueryPage {
                        items: Vec::new(),
                        request_charge: std::mem::take(&mut state.request_charge),
                    };
                    return Some((Ok(page), state));
                }
                return None;
            }

            match state.pages.next().await {
                Some(Ok(page)) => {
                    state.request_charge += page.request_charge;
                    state.items.extend(page.items);
                }
                Some(Err(e)) => {
                    state.exhausted = true;
                    state.items.clear();
                    state.request_charge = 0.0;
                    return Some((Err(e), state));
                }
                None => state.exhausted = true,
            }
        }
    })
    .boxed()
}
