//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Hearth configuration file.

use crate::config::schema::DatabaseTarget;
use crate::config::{load_config, HearthConfig};
use anyhow::Context;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<()> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates as well
        let config = load_config(config_path)
            .with_context(|| format!("Configuration file {config_path} is not valid"))?;

        println!("✅ Configuration is valid");
        println!();
        for line in summary_lines(&config) {
            println!("{line}");
        }
        println!();
        Ok(())
    }
}

/// Human-readable configuration summary, without the key
fn summary_lines(config: &HearthConfig) -> Vec<String> {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Database Target: {}", config.database_target),
    ];

    if config.database_target == DatabaseTarget::CosmosDB {
        if let Some(ref cosmos_config) = config.cosmosdb {
            lines.push(format!("  Cosmos DB Endpoint: {}", cosmos_config.endpoint));
            lines.push(format!(
                "  Preferred Regions: {:?}",
                cosmos_config.preferred_regions
            ));
            lines.push(format!(
                "  Consistency Level: {}",
                cosmos_config.consistency_level
            ));
        }
    }

    lines.push(format!("  Database: {}", config.database_name()));
    lines.push(format!(
        "  Container: {} (partition key {})",
        config.container_name(),
        config.partition_key_path()
    ));
    lines.push(format!("  Throughput: {} RU/s", config.throughput()));
    lines.push(format!(
        "  Read Iterations: {}",
        config
            .workload
            .read_iterations
            .map_or_else(|| "until Ctrl+C".to_string(), |n| n.to_string())
    ));
    lines.push(format!("  Read Delay: {} ms", config.workload.read_delay_ms));
    lines.push(format!(
        "  Query: {:?}, page size {}",
        config.workload.query_last_names, config.workload.query_page_size
    ));
    lines.push(format!(
        "  File Logging: {}",
        if config.logging.local_enabled {
            format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
        } else {
            "disabled".to_string()
        }
    ));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lines_in_memory() {
        let lines = summary_lines(&HearthConfig::in_memory());
        assert!(lines.contains(&"  Database Target: memory".to_string()));
        assert!(lines.contains(&"  Database: AzureSampleFamilyDB".to_string()));
        assert!(lines.contains(&"  Read Iterations: until Ctrl+C".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Endpoint")));
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs {};
        assert!(args.execute("does-not-exist.toml").await.is_err());
    }
}
