//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod init;
pub mod query;
pub mod run;
pub mod validate;

use crate::config::schema::{DatabaseTarget, HearthConfig};
use crate::config::{load_config, load_config_with_target};
use crate::domain::Result;
use std::path::Path;

/// Load the configuration for a workload command
///
/// With `memory` set the in-memory target is forced, and a missing file
/// falls back to in-memory defaults.
pub(crate) fn load_workload_config(config_path: &str, memory: bool) -> Result<HearthConfig> {
    if !memory {
        return load_config(config_path);
    }

    if Path::new(config_path).exists() {
        load_config_with_target(config_path, Some(DatabaseTarget::Memory))
    } else {
        tracing::info!(
            config_path = %config_path,
            "Configuration file not found, using in-memory defaults"
        );
        Ok(HearthConfig::in_memory())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_without_file_uses_defaults() {
        let config = load_workload_config("no-such-hearth.toml", true).unwrap();
        assert_eq!(config.database_target, DatabaseTarget::Memory);
        assert!(config.cosmosdb.is_none());
    }

    #[test]
    fn test_missing_file_without_memory_fails() {
        assert!(load_workload_config("no-such-hearth.toml", false).is_err());
    }
}
