// Hearth - Azure Cosmos DB getting-started workload
// Copyright (c) 2025 Hearth Contributors
// Licensed under the MIT License

use hearth::cli;
use hearth::config::{load_config, LoggingConfig};
use hearth::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Usage errors exit with the same status as every command
    let Some(cli) = cli::parse_args(std::env::args_os()) else {
        process::exit(cli::EXIT_CODE);
    };

    // File logging and the level come from the config when it loads;
    // the command reports load errors itself
    let file_config = load_config(&cli.config).ok();
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| file_config.as_ref().map(|c| c.application.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    let logging_config = file_config
        .map(|c| c.logging)
        .unwrap_or_else(LoggingConfig::default);

    let _logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            None
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Hearth - Azure Cosmos DB getting-started workload"
    );

    // Create shutdown signal channel for graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        wait_for_signal().await;
        eprintln!("\n⚠️  Shutdown signal received, finishing current read...");
        let _ = shutdown_tx.send(true);
    });

    let exit_code = cli::execute(&cli, shutdown_rx).await;

    process::exit(exit_code);
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install SIGTERM handler, listening for Ctrl+C only");
            ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown...");
        }
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received SIGINT (Ctrl+C), initiating graceful shutdown..."),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            // Never signal shutdown if the handler could not be installed
            std::future::pending::<()>().await;
        }
    }
}
