//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `hearth.toml`.

use crate::config::SecretString;
use crate::domain::samples::SAMPLE_QUERY_LAST_NAMES;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which store the workload runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseTarget {
    /// Azure Cosmos DB
    #[default]
    CosmosDB,
    /// Process-local store, nothing leaves the machine
    Memory,
}

impl FromStr for DatabaseTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cosmosdb" => Ok(DatabaseTarget::CosmosDB),
            "memory" => Ok(DatabaseTarget::Memory),
            other => Err(format!(
                "Invalid database_target '{other}'. Must be one of: cosmosdb, memory"
            )),
        }
    }
}

impl fmt::Display for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseTarget::CosmosDB => write!(f, "cosmosdb"),
            DatabaseTarget::Memory => write!(f, "memory"),
        }
    }
}

/// Read consistency requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyLevel {
    /// Linearizable reads
    Strong,
    /// Reads lag writes by a bounded window
    BoundedStaleness,
    /// Read-your-writes within a session
    Session,
    /// Reads never see out-of-order writes
    ConsistentPrefix,
    /// No ordering guarantee
    #[default]
    Eventual,
}

impl FromStr for ConsistencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "strong" => Ok(ConsistencyLevel::Strong),
            "bounded_staleness" => Ok(ConsistencyLevel::BoundedStaleness),
            "session" => Ok(ConsistencyLevel::Session),
            "consistent_prefix" => Ok(ConsistencyLevel::ConsistentPrefix),
            "eventual" => Ok(ConsistencyLevel::Eventual),
            other => Err(format!(
                "Invalid consistency_level '{other}'. Must be one of: strong, bounded_staleness, session, consistent_prefix, eventual"
            )),
        }
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConsistencyLevel::Strong => "strong",
            ConsistencyLevel::BoundedStaleness => "bounded_staleness",
            ConsistencyLevel::Session => "session",
            ConsistencyLevel::ConsistentPrefix => "consistent_prefix",
            ConsistencyLevel::Eventual => "eventual",
        };
        write!(f, "{s}")
    }
}

/// Main Hearth configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HearthConfig {
    /// Store the workload runs against
    #[serde(default)]
    pub database_target: DatabaseTarget,

    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Azure Cosmos DB configuration (required if database_target = cosmosdb)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cosmosdb: Option<CosmosDbConfig>,

    /// Read loop and query settings
    #[serde(default)]
    pub workload: WorkloadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HearthConfig {
    /// Configuration for the in-memory store with every other setting at its default
    pub fn in_memory() -> Self {
        Self {
            database_target: DatabaseTarget::Memory,
            application: ApplicationConfig::default(),
            cosmosdb: None,
            workload: WorkloadConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Database name the workload ensures
    pub fn database_name(&self) -> &str {
        self.cosmosdb
            .as_ref()
            .map(|c| c.database_name.as_str())
            .unwrap_or(DEFAULT_DATABASE_NAME)
    }

    /// Container name the workload ensures
    pub fn container_name(&self) -> &str {
        self.cosmosdb
            .as_ref()
            .map(|c| c.container_name.as_str())
            .unwrap_or(DEFAULT_CONTAINER_NAME)
    }

    /// Partition key path of the container
    pub fn partition_key_path(&self) -> &str {
        self.cosmosdb
            .as_ref()
            .map(|c| c.partition_key_path.as_str())
            .unwrap_or(DEFAULT_PARTITION_KEY_PATH)
    }

    /// Manual throughput (RU/s) provisioned on container creation
    pub fn throughput(&self) -> u32 {
        self.cosmosdb
            .as_ref()
            .map(|c| c.throughput)
            .unwrap_or_else(default_throughput)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;

        match self.database_target {
            DatabaseTarget::CosmosDB => match self.cosmosdb {
                Some(ref config) => config.validate()?,
                None => {
                    return Err(
                        "cosmosdb configuration is required when database_target = 'cosmosdb'"
                            .to_string(),
                    )
                }
            },
            // Only the names are used by the in-memory store
            DatabaseTarget::Memory => {
                if let Some(ref config) = self.cosmosdb {
                    config.validate_names()?;
                }
            }
        }

        self.workload.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Azure Cosmos DB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmosDbConfig {
    /// Account endpoint URL
    pub endpoint: String,

    /// Account key
    /// Stored securely in memory and automatically zeroized on drop
    pub key: SecretString,

    /// Database name
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Container name
    #[serde(default = "default_container_name")]
    pub container_name: String,

    /// Partition key path of the container
    #[serde(default = "default_partition_key_path")]
    pub partition_key_path: String,

    /// Manual throughput (RU/s) used when the container is created
    #[serde(default = "default_throughput")]
    pub throughput: u32,

    /// Regions to prefer, closest first
    #[serde(default = "default_preferred_regions")]
    pub preferred_regions: Vec<String>,

    /// Read consistency level
    #[serde(default)]
    pub consistency_level: ConsistencyLevel,
}

impl CosmosDbConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.endpoint.is_empty() {
            return Err("cosmosdb.endpoint cannot be empty".to_string());
        }

        if !self.endpoint.starts_with("https://") {
            return Err("cosmosdb.endpoint must start with https://".to_string());
        }

        url::Url::parse(&self.endpoint)
            .map_err(|e| format!("cosmosdb.endpoint is not a valid URL: {e}"))?;

        if self.key.expose_secret().is_empty() {
            return Err("cosmosdb.key cannot be empty".to_string());
        }

        self.validate_names()?;

        if !(400..=1_000_000).contains(&self.throughput) || self.throughput % 100 != 0 {
            return Err(format!(
                "cosmosdb.throughput must be a multiple of 100 between 400 and 1000000, got {}",
                self.throughput
            ));
        }

        if self.preferred_regions.iter().any(|r| r.trim().is_empty()) {
            return Err("cosmosdb.preferred_regions cannot contain empty entries".to_string());
        }

        Ok(())
    }

    fn validate_names(&self) -> Result<(), String> {
        if self.database_name.is_empty() {
            return Err("cosmosdb.database_name cannot be empty".to_string());
        }

        if self.container_name.is_empty() {
            return Err("cosmosdb.container_name cannot be empty".to_string());
        }

        if !self.partition_key_path.starts_with('/') || self.partition_key_path.len() < 2 {
            return Err(format!(
                "cosmosdb.partition_key_path must look like '/field', got '{}'",
                self.partition_key_path
            ));
        }

        Ok(())
    }
}

/// Read loop and query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Number of read passes over the inserted families; unset means until Ctrl+C
    #[serde(default)]
    pub read_iterations: Option<u64>,

    /// Pause between read passes in milliseconds
    #[serde(default)]
    pub read_delay_ms: u64,

    /// Items per query page
    #[serde(default = "default_query_page_size")]
    pub query_page_size: usize,

    /// Last names the sample query filters on
    #[serde(default = "default_query_last_names")]
    pub query_last_names: Vec<String>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            read_iterations: None,
            read_delay_ms: 0,
            query_page_size: default_query_page_size(),
            query_last_names: default_query_last_names(),
        }
    }
}

impl WorkloadConfig {
    fn validate(&self) -> Result<(), String> {
        if self.query_page_size == 0 || self.query_page_size > 1000 {
            return Err(format!(
                "workload.query_page_size must be between 1 and 1000, got {}",
                self.query_page_size
            ));
        }

        if self.query_last_names.is_empty() {
            return Err("workload.query_last_names cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging next to console output
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

pub(crate) const DEFAULT_DATABASE_NAME: &str = "AzureSampleFamilyDB";
pub(crate) const DEFAULT_CONTAINER_NAME: &str = "FamilyContainer";
pub(crate) const DEFAULT_PARTITION_KEY_PATH: &str = "/lastName";

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_name() -> String {
    DEFAULT_DATABASE_NAME.to_string()
}

fn default_container_name() -> String {
    DEFAULT_CONTAINER_NAME.to_string()
}

fn default_partition_key_path() -> String {
    DEFAULT_PARTITION_KEY_PATH.to_string()
}

fn default_throughput() -> u32 {
    20_000
}

fn default_preferred_regions() -> Vec<String> {
    vec!["West US".to_string()]
}

fn default_query_page_size() -> usize {
    10
}

fn default_query_last_names() -> Vec<String> {
    SAMPLE_QUERY_LAST_NAMES.iter().map(|s| s.to_string()).collect()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
