//! Query command implementation
//!
//! This module implements the `query` command: ensure the database and
//! container, then page through families filtered by last name.

use super::load_workload_config;
use crate::adapters::database::FamilyQuery;
use crate::core::{QuerySummary, Workload};
use clap::Args;

/// Arguments for the query command
#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// Last name to match, repeatable (default: from configuration)
    #[arg(long = "last-name", value_name = "NAME")]
    pub last_names: Vec<String>,

    /// Items per page (default: from configuration)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub page_size: Option<u64>,

    /// Use the in-memory store instead of Cosmos DB
    #[arg(long)]
    pub memory: bool,
}

impl QueryArgs {
    /// Execute the query command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<QuerySummary> {
        tracing::info!("Starting query command");

        let config = load_workload_config(config_path, self.memory)?;

        let query = if self.last_names.is_empty() {
            FamilyQuery::by_last_names(&config.workload.query_last_names)
        } else {
            FamilyQuery::by_last_names(&self.last_names)
        };
        let page_size = self
            .page_size
            .map_or(config.workload.query_page_size, |n| n as usize);

        let workload = Workload::from_config(config)?;
        let summary = workload.query(&query, page_size).await?;

        println!();
        if summary.pages == 0 {
            println!("No families matched {:?}", query.last_names());
        } else {
            println!(
                "✅ {} item(s) in {} page(s), request charge {:.2} RU",
                summary.items, summary.pages, summary.request_charge
            );
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_query_fresh_memory_store_is_empty() {
        let args = QueryArgs {
            last_names: vec!["Smith".to_string()],
            page_size: Some(5),
            memory: true,
        };

        let summary = args.execute("no-such-hearth.toml").await.unwrap();
        assert_eq!(summary.pages, 0);
        assert_eq!(summary.items, 0);
    }
}
