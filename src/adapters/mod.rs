//! Document store integrations for Hearth.
//!
//! - [`database`] - Store abstraction layer (trait-based)
//! - [`cosmosdb`] - Azure Cosmos DB implementation
//! - [`memory`] - In-memory implementation
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the Cosmos DB SDK and
//! enable testing without an account. The workload only sees
//! [`database::FamilyStore`].
//!
//! ```rust,no_run
//! use hearth::adapters::database::create_family_store;
//! use hearth::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("hearth.toml")?;
//! let store = create_family_store(&config)?;
//! let database = store.ensure_database(config.database_name()).await?;
//! println!("Using database {}", database.id);
//! # Ok(())
//! # }
//! ```

pub mod cosmosdb;
pub mod database;
pub mod memory;
