//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use anyhow::bail;
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "hearth.toml")]
    pub output: String,

    /// Include every setting with its default and a comment
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<()> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Hearth configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            bail!(
                "Configuration file already exists: {} (use --force to overwrite)",
                self.output
            );
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        fs::write(&self.output, config_content)?;

        println!("✅ Configuration file created: {}", self.output);
        println!();
        println!("Next steps:");
        println!("  1. Set endpoint in {} to your account URI", self.output);
        println!("  2. Export HEARTH_COSMOSDB_KEY or put it in a .env file");
        println!("  3. Validate configuration: hearth validate-config");
        println!("  4. Run the workload: hearth run --iterations 10");
        println!();
        println!("To try it without an account: hearth run --memory --iterations 3");
        println!();
        Ok(())
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Hearth Configuration File

database_target = "cosmosdb"  # cosmosdb | memory

[application]
log_level = "info"

[cosmosdb]
endpoint = "https://your-account.documents.azure.com:443/"
key = "${HEARTH_COSMOSDB_KEY}"
preferred_regions = ["West US"]

[workload]
read_iterations = 10
"#
        .to_string()
    }

    /// Generate configuration with every setting spelled out
    fn generate_config_with_examples() -> String {
        r#"# Hearth Configuration File
# Every setting is shown with its default value.

# Store to run against
#   cosmosdb - Azure Cosmos DB account configured below
#   memory   - in-process store, nothing leaves the machine
database_target = "cosmosdb"

[application]
# trace | debug | info | warn | error (RUST_LOG takes precedence)
log_level = "info"

[cosmosdb]
# Account URI, must be https
endpoint = "https://your-account.documents.azure.com:443/"

# Primary or secondary key. Keep it out of the file:
# export HEARTH_COSMOSDB_KEY=... or put it in .env
key = "${HEARTH_COSMOSDB_KEY}"

database_name = "AzureSampleFamilyDB"
container_name = "FamilyContainer"
partition_key_path = "/lastName"

# Manual RU/s provisioned when the container is created
# (400 to 1000000, multiple of 100)
throughput = 20000

preferred_regions = ["West US"]

# strong | bounded_staleness | session | consistent_prefix | eventual
consistency_level = "eventual"

[workload]
# Passes over the inserted families; remove to read until Ctrl+C
read_iterations = 10

# Pause between passes
read_delay_ms = 0

# Query run by `hearth query` and `hearth run --with-query`
query_page_size = 10
query_last_names = ["Andersen", "Wakefield", "Johnson"]

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
