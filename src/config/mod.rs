//! Configuration management for Hearth.
//!
//! Hearth reads a TOML file (default `hearth.toml`) with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HEARTH_*` environment overrides
//! - Default values for everything except the Cosmos DB endpoint and key
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! database_target = "cosmosdb"
//!
//! [cosmosdb]
//! endpoint = "https://your-account.documents.azure.com:443/"
//! key = "${HEARTH_COSMOSDB_KEY}"
//! preferred_regions = ["West US"]
//! consistency_level = "eventual"
//!
//! [workload]
//! read_iterations = 10
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use hearth::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("hearth.toml")?;
//! println!("Database: {}", config.database_name());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_from_str, load_config_with_target};
pub use schema::{
    ApplicationConfig, ConsistencyLevel, CosmosDbConfig, DatabaseTarget, HearthConfig,
    LoggingConfig, WorkloadConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
