//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Hearth using clap.

pub mod commands;

use clap::{Parser, Subcommand};
use tokio::sync::watch;

/// Exit status of every command, whatever its outcome
pub const EXIT_CODE: i32 = 0;

/// Hearth - Azure Cosmos DB getting-started workload
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(version, about, long_about = None)]
#[command(author = "Hearth Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "hearth.toml", env = "HEARTH_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HEARTH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ensure database and container, insert sample families, read them in a loop
    Run(commands::run::RunArgs),

    /// Page through families filtered by last name
    Query(commands::query::QueryArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Parse command-line arguments
///
/// Usage errors, `--help` and `--version` are printed here; `None` means
/// the process should exit with [`EXIT_CODE`] without running a command.
pub fn parse_args<I, T>(args: I) -> Option<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Some(cli),
        Err(e) => {
            let _ = e.print();
            None
        }
    }
}

/// Execute the parsed command and map its outcome to the process exit code
///
/// Failures are logged and printed to stderr; the exit code is always
/// [`EXIT_CODE`].
pub async fn execute(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> i32 {
    let result = match &cli.command {
        Commands::Run(args) => args.execute(&cli.config, shutdown_signal).await.map(drop),
        Commands::Query(args) => args.execute(&cli.config).await.map(drop),
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    };

    if let Err(e) = result {
        crate::log_error_with_context!(e, "Command execution failed");
        eprintln!("Error: {e:#}");
    }

    EXIT_CODE
}
