//! Core workload logic for Hearth.
//!
//! - [`workload`] - Ensure, insert, read loop and query orchestration
//! - [`summary`] - Run and query summaries
//!
//! # Example
//!
//! ```rust,no_run
//! use hearth::config::HearthConfig;
//! use hearth::core::Workload;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = HearthConfig::in_memory();
//! config.workload.read_iterations = Some(5);
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let workload = Workload::from_config(config)?;
//! let summary = workload.run(shutdown_rx).await?;
//!
//! println!("Reads: {}", summary.total_reads());
//! # Ok(())
//! # }
//! ```

pub mod summary;
pub mod workload;

pub use summary::{QuerySummary, RunSummary};
pub use workload::Workload;
