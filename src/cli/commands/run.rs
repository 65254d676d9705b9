//! Run command implementation
//!
//! This module implements the `run` command: ensure the database and
//! container, insert the sample families, then point-read them in a loop.

use super::load_workload_config;
use crate::core::{RunSummary, Workload};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Passes over the inserted families (default: until Ctrl+C)
    #[arg(long, value_name = "N")]
    pub iterations: Option<u64>,

    /// Pause between passes in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Run the sample query after the inserts
    #[arg(long)]
    pub with_query: bool,

    /// Use the in-memory store instead of Cosmos DB
    #[arg(long)]
    pub memory: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<RunSummary> {
        tracing::info!("Starting run command");

        let mut config = load_workload_config(config_path, self.memory)?;

        if let Some(iterations) = self.iterations {
            tracing::info!(iterations, "Overriding read iterations from CLI");
            config.workload.read_iterations = Some(iterations);
        }
        if let Some(delay_ms) = self.delay_ms {
            tracing::info!(delay_ms, "Overriding read delay from CLI");
            config.workload.read_delay_ms = delay_ms;
        }

        let workload = Workload::from_config(config)?.with_query(self.with_query);

        println!(
            "🚀 Starting workload against {} store...",
            workload.store().backend()
        );
        println!();

        let summary = workload.run(shutdown_signal).await?;
        print_summary(&summary);

        Ok(summary)
    }
}

fn print_summary(summary: &RunSummary) {
    println!();
    if summary.interrupted {
        println!("⚠️  Workload interrupted by shutdown signal");
    } else {
        println!("✅ Workload completed");
    }
    println!();
    println!("Summary:");
    println!("  Families inserted: {}", summary.inserted);
    println!("  Read passes: {}", summary.passes);
    println!(
        "  Reads: {} succeeded, {} failed ({:.2}%)",
        summary.reads_succeeded,
        summary.reads_failed,
        summary.success_rate()
    );
    if let Some(ref query) = summary.query {
        println!(
            "  Query: {} item(s) in {} page(s)",
            query.items, query.pages
        );
    }
    println!("  Total request charge: {:.2} RU", summary.total_charge());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
}
