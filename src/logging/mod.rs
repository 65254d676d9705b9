//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use hearth::logging::init_logging;
//! use hearth::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the cost of a single store request
///
/// # Example
///
/// ```no_run
/// use hearth::log_request_cost;
/// use std::time::Duration;
///
/// log_request_cost!("read", "Andersen-1@Andersen", 1.0, Duration::from_millis(4));
/// ```
#[macro_export]
macro_rules! log_request_cost {
    ($operation:expr, $item:expr, $charge:expr, $latency:expr) => {
        tracing::debug!(
            operation = $operation,
            item = %$item,
            request_charge = $charge,
            latency_ms = $latency.as_millis() as u64,
            "Request completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use hearth::log_error_with_context;
/// use hearth::domain::HearthError;
///
/// let error = HearthError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    #[test]
    fn test_macros_expand() {
        let error = crate::domain::HearthError::Other("boom".to_string());
        log_error_with_context!(&error, "testing");
        log_request_cost!("read", "id@pk", 1.0, Duration::from_millis(3));
    }
}
