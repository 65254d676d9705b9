// Hearth - Azure Cosmos DB getting-started workload
// Copyright (c) 2025 Hearth Contributors
// Licensed under the MIT License

//! # Hearth - Azure Cosmos DB getting-started workload
//!
//! Hearth walks through the basic operations of an Azure Cosmos DB account:
//! it ensures a database and a container exist, inserts a handful of sample
//! family documents, point-reads them back in a loop printing the latency of
//! each read, and optionally pages through a filtered query.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Workload orchestration and summaries
//! - [`adapters`] - Store trait with Cosmos DB and in-memory implementations
//! - [`domain`] - Family documents, sample data, identifiers and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hearth::config::load_config;
//! use hearth::core::Workload;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("hearth.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let summary = Workload::from_config(config)?.run(shutdown_rx).await?;
//!
//!     println!("Read {} families", summary.reads_succeeded);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`] with [`domain::HearthError`].
//! Point-read failures inside the read loop are logged and counted, never
//! propagated; setup and insert failures end the command. The binary exits
//! with status 0 either way.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
