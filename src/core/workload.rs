//! Getting-started workload
//!
//! Ensures the database and container, inserts the sample families, then
//! point-reads them back in a loop printing the latency of every read.

use crate::adapters::database::{
    create_family_store, ContainerHandle, ContainerSpec, FamilyQuery, FamilyStore,
};
use crate::config::HearthConfig;
use crate::core::summary::{QuerySummary, RunSummary};
use crate::domain::family::Family;
use crate::domain::samples::sample_families;
use crate::domain::{HearthError, Result};
use crate::log_request_cost;
use chrono::Utc;
use futures::StreamExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Drives the sample workload against a [`FamilyStore`]
pub struct Workload {
    store: Arc<dyn FamilyStore>,
    config: HearthConfig,
    families: Option<Vec<Family>>,
    with_query: bool,
}

impl Workload {
    /// Create a workload over an existing store
    pub fn new(store: Arc<dyn FamilyStore>, config: HearthConfig) -> Self {
        Self {
            store,
            config,
            families: None,
            with_query: false,
        }
    }

    /// Create a workload with the store selected by `database_target`
    pub fn from_config(config: HearthConfig) -> Result<Self> {
        let store = create_family_store(&config)?;
        Ok(Self::new(store, config))
    }

    /// Insert these families instead of the built-in samples
    pub fn with_families(mut self, families: Vec<Family>) -> Self {
        self.families = Some(families);
        self
    }

    /// Run the sample query after the inserts
    pub fn with_query(mut self, enabled: bool) -> Self {
        self.with_query = enabled;
        self
    }

    /// The store this workload runs against
    pub fn store(&self) -> &Arc<dyn FamilyStore> {
        &self.store
    }

    /// Ensure the configured database and container exist
    pub async fn prepare(&self) -> Result<ContainerHandle> {
        let database = self.store.ensure_database(self.config.database_name()).await?;

        let spec = ContainerSpec {
            name: self.config.container_name().to_string(),
            partition_key_path: self.config.partition_key_path().to_string(),
            throughput: self.config.throughput(),
        };
        let container = self.store.ensure_container(&database, &spec).await?;

        tracing::info!(
            backend = self.store.backend(),
            database = %database.id,
            container = %container.id,
            partition_key = %container.partition_key_path,
            "Database and container ready"
        );

        Ok(container)
    }

    /// Insert every family, returning the total request charge
    ///
    /// The first failed insert aborts and propagates.
    pub async fn insert_families(
        &self,
        container: &ContainerHandle,
        families: &[Family],
    ) -> Result<f64> {
        let mut total_charge = 0.0;

        for family in families {
            let receipt = self.store.create_family(container, family).await?;
            log_request_cost!(
                "create",
                receipt.key,
                receipt.cost.request_charge,
                receipt.cost.latency
            );
            total_charge += receipt.cost.request_charge;
        }

        tracing::info!(
            count = families.len(),
            request_charge = total_charge,
            "Inserted families"
        );

        Ok(total_charge)
    }

    /// Run the full workload
    ///
    /// Setup and insert errors propagate. Read errors are logged and counted;
    /// the loop ends after `read_iterations` passes, or on shutdown.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new();
        summary.started_at = Utc::now();

        let container = self.prepare().await?;

        let families = match &self.families {
            Some(families) => families.clone(),
            None => sample_families()?,
        };
        summary.insert_charge = self.insert_families(&container, &families).await?;
        summary.inserted = families.len();

        if self.with_query {
            let query = FamilyQuery::by_last_names(&self.config.workload.query_last_names);
            let page_size = self.config.workload.query_page_size;
            summary.query = Some(self.run_query(&container, &query, page_size).await?);
        }

        self.read_loop(&container, &families, &mut shutdown, &mut summary)
            .await;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn read_loop(
        &self,
        container: &ContainerHandle,
        families: &[Family],
        shutdown: &mut watch::Receiver<bool>,
        summary: &mut RunSummary,
    ) {
        let iterations = self.config.workload.read_iterations;
        let delay = Duration::from_millis(self.config.workload.read_delay_ms);

        match iterations {
            Some(n) => tracing::info!(iterations = n, "Starting read loop"),
            None => tracing::info!("Starting read loop, press Ctrl+C to stop"),
        }

        'passes: loop {
            if iterations.is_some_and(|n| summary.passes >= n) {
                break;
            }

            for family in families {
                if *shutdown.borrow() {
                    summary.interrupted = true;
                    break 'passes;
                }
                self.read_one(container, family, summary).await;
            }
            summary.passes += 1;

            if iterations.is_some_and(|n| summary.passes >= n) {
                break;
            }

            if delay.is_zero() {
                tokio::task::yield_now().await;
            } else if wait_or_shutdown(delay, shutdown).await {
                summary.interrupted = true;
                break;
            }
        }

        if summary.interrupted {
            tracing::info!(passes = summary.passes, "Read loop stopped by shutdown signal");
        }
    }

    async fn read_one(&self, container: &ContainerHandle, family: &Family, summary: &mut RunSummary) {
        let key = family.key();

        match self.store.read_family(container, &key).await {
            Ok(receipt) if receipt.family == *family => {
                println!("{}", receipt.cost.latency.as_millis());
                log_request_cost!(
                    "read",
                    key,
                    receipt.cost.request_charge,
                    receipt.cost.latency
                );
                summary.reads_succeeded += 1;
                summary.read_charge += receipt.cost.request_charge;
            }
            Ok(_) => {
                tracing::error!(item = %key, "Point read returned a different payload than inserted");
                summary.reads_failed += 1;
            }
            Err(e) => {
                tracing::error!(
                    item = %key,
                    error = %e,
                    not_found = e.is_not_found(),
                    transient = e.is_transient(),
                    "Point read failed"
                );
                summary.reads_failed += 1;
            }
        }
    }

    /// Ensure the database and container, then run a paged query
    pub async fn query(&self, query: &FamilyQuery, page_size: usize) -> Result<QuerySummary> {
        let container = self.prepare().await?;
        self.run_query(&container, query, page_size).await
    }

    async fn run_query(
        &self,
        container: &ContainerHandle,
        query: &FamilyQuery,
        page_size: usize,
    ) -> Result<QuerySummary> {
        if query.last_names().is_empty() {
            return Err(HearthError::Validation(
                "Query needs at least one last name".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(HearthError::Validation(
                "Query page size must be greater than 0".to_string(),
            ));
        }

        tracing::info!(
            last_names = ?query.last_names(),
            page_size,
            "Running query"
        );

        let mut summary = QuerySummary::default();
        let mut pages = self
            .store
            .query_families(container, query, page_size)
            .await?;

        while let Some(page) = pages.next().await {
            let page = page?;
            let ids: Vec<&str> = page.items.iter().map(|f| f.id.as_str()).collect();

            println!(
                "Got a page of query result with {} item(s) and request charge of {}",
                page.items.len(),
                page.request_charge
            );
            println!("Item Ids {ids:?}");

            summary.pages += 1;
            summary.items += page.items.len();
            summary.request_charge += page.request_charge;
            summary
                .item_ids
                .extend(ids.into_iter().map(str::to_string));
        }

        summary.log_summary();
        Ok(summary)
    }
}

/// Sleep for `delay`, returning early with `true` if shutdown is signalled
async fn wait_or_shutdown(delay: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return false,
            changed = shutdown.changed() => match changed {
                Ok(()) if *shutdown.borrow() => return true,
                Ok(()) => continue,
                // Sender gone, no signal can arrive any more
                Err(_) => {
                    sleep.await;
                    return false;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryFamilyStore;

    fn config(iterations: u64) -> HearthConfig {
        let mut config = HearthConfig::in_memory();
        config.workload.read_iterations = Some(iterations);
        config
    }

    #[tokio::test]
    async fn test_run_reads_every_family_each_pass() {
        let workload = Workload::new(Arc::new(InMemoryFamilyStore::new()), config(3));
        let (_tx, rx) = watch::channel(false);

        let summary = workload.run(rx).await.unwrap();

        assert_eq!(summary.inserted, 4);
        assert_eq!(summary.passes, 3);
        assert_eq!(summary.reads_succeeded, 12);
        assert_eq!(summary.reads_failed, 0);
        assert!(!summary.interrupted);
        assert!(summary.query.is_none());
    }

    #[tokio::test]
    async fn test_zero_iterations_skips_reads() {
        let workload = Workload::new(Arc::new(InMemoryFamilyStore::new()), config(0));
        let (_tx, rx) = watch::channel(false);

        let summary = workload.run(rx).await.unwrap();
        assert_eq!(summary.inserted, 4);
        assert_eq!(summary.total_reads(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_before_reads() {
        let mut config = HearthConfig::in_memory();
        config.workload.read_iterations = None;
        let workload = Workload::new(Arc::new(InMemoryFamilyStore::new()), config);
        let (_tx, rx) = watch::channel(true);

        let summary = workload.run(rx).await.unwrap();
        assert!(summary.interrupted);
        assert_eq!(summary.passes, 0);
    }

    #[tokio::test]
    async fn test_with_query_runs_after_inserts() {
        let workload =
            Workload::new(Arc::new(InMemoryFamilyStore::new()), config(1)).with_query(true);
        let (_tx, rx) = watch::channel(false);

        let summary = workload.run(rx).await.unwrap();
        let query = summary.query.unwrap();
        assert_eq!(query.items, 3);
        assert!(query.item_ids.iter().all(|id| !id.starts_with("Smith")));
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let workload = Workload::new(Arc::new(InMemoryFamilyStore::new()), config(1));
        let query = FamilyQuery::by_last_names(Vec::<String>::new());

        let err = workload.query(&query, 10).await.unwrap_err();
        assert!(matches!(err, HearthError::Validation(_)));
    }

    #[tokio::test]
    async fn test_wait_or_shutdown() {
        let (tx, mut rx) = watch::channel(false);
        assert!(!wait_or_shutdown(Duration::from_millis(10), &mut rx).await);

        let waiter = tokio::spawn(async move {
            wait_or_shutdown(Duration::from_secs(3600), &mut rx).await
        });
        tx.send(true).unwrap();
        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_wait_survives_dropped_sender() {
        let (tx, mut rx) = watch::channel(false);
        drop(tx);
        assert!(!wait_or_shutdown(Duration::from_millis(10), &mut rx).await);
    }
}
