//! Domain error types
//!
//! This module defines the error hierarchy for Hearth. Errors coming out of
//! the Cosmos DB SDK are converted to [`CosmosDbError`] at the adapter
//! boundary so that no third-party error type leaks into the rest of the crate.

use thiserror::Error;

/// Main Hearth error type
#[derive(Debug, Error)]
pub enum HearthError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Cosmos DB-related errors
    #[error("Cosmos DB error: {0}")]
    CosmosDb(#[from] CosmosDbError),

    /// Errors raised by a non-Cosmos store implementation
    #[error("Store error: {0}")]
    Store(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl HearthError {
    /// Whether the error means the requested item, container or database does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            HearthError::CosmosDb(
                CosmosDbError::DocumentNotFound(_)
                    | CosmosDbError::ContainerNotFound(_)
                    | CosmosDbError::DatabaseNotFound(_)
            )
        )
    }

    /// Whether the error is one the service reports as worth retrying later.
    ///
    /// Only used to pick the log level; nothing in Hearth retries.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            HearthError::CosmosDb(CosmosDbError::Throttled(_) | CosmosDbError::Timeout(_))
        )
    }
}

/// Cosmos DB-specific errors
///
/// Errors that occur when interacting with Azure Cosmos DB.
#[derive(Debug, Error)]
pub enum CosmosDbError {
    /// Failed to build the client or reach the account
    #[error("Failed to connect to Cosmos DB: {0}")]
    ConnectionFailed(String),

    /// Database not found
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    /// Container not found
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Failed to create database
    #[error("Failed to create database: {0}")]
    DatabaseCreationFailed(String),

    /// Failed to create container
    #[error("Failed to create container: {0}")]
    ContainerCreationFailed(String),

    /// Failed to insert document
    #[error("Failed to insert document: {0}")]
    InsertFailed(String),

    /// Failed to read document
    #[error("Failed to read document: {0}")]
    ReadFailed(String),

    /// Failed to query documents
    #[error("Failed to query documents: {0}")]
    QueryFailed(String),

    /// Throttling error (429)
    #[error("Request rate too large (429): {0}")]
    Throttled(String),

    /// Conflict error (409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Failed to deserialize response
    #[error("Failed to deserialize response: {0}")]
    DeserializationFailed(String),
}

impl CosmosDbError {
    /// Classify a failed request by the HTTP status the service returned.
    ///
    /// `fallback` builds the error when there is no status (transport
    /// failures) or the status has no dedicated variant.
    pub fn from_status(
        status: Option<u16>,
        message: String,
        fallback: fn(String) -> CosmosDbError,
    ) -> CosmosDbError {
        match status {
            Some(404) => CosmosDbError::DocumentNotFound(message),
            Some(408) => CosmosDbError::Timeout(message),
            Some(409) => CosmosDbError::Conflict(message),
            Some(429) => CosmosDbError::Throttled(message),
            _ => fallback(message),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for HearthError {
    fn from(err: std::io::Error) -> Self {
        HearthError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for HearthError {
    fn from(err: serde_json::Error) -> Self {
        HearthError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for HearthError {
    fn from(err: toml::de::Error) -> Self {
        HearthError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hearth_error_display() {
        let err = HearthError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_cosmosdb_error_conversion() {
        let cosmos_err = CosmosDbError::Throttled("5 seconds".to_string());
        let err: HearthError = cosmos_err.into();
        assert!(matches!(err, HearthError::CosmosDb(_)));
        assert!(err.is_transient());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_status_not_found() {
        let err = CosmosDbError::from_status(
            Some(404),
            "Entity with the specified id does not exist".to_string(),
            CosmosDbError::ReadFailed,
        );
        assert!(matches!(err, CosmosDbError::DocumentNotFound(_)));
        assert!(HearthError::from(err).is_not_found());
    }

    #[test]
    fn test_from_status_conflict_and_throttle() {
        let conflict =
            CosmosDbError::from_status(Some(409), "exists".to_string(), CosmosDbError::InsertFailed);
        assert!(matches!(conflict, CosmosDbError::Conflict(_)));

        let throttled =
            CosmosDbError::from_status(Some(429), "slow down".to_string(), CosmosDbError::InsertFailed);
        assert!(HearthError::from(throttled).is_transient());
    }

    #[test]
    fn test_from_status_ignores_digits_in_message() {
        let message =
            "Failed to read Andersen-4f0a4047-9409-4290-a429-404a1b2c3d4e@Andersen: Internal Server Error"
                .to_string();
        let err = CosmosDbError::from_status(Some(500), message, CosmosDbError::ReadFailed);
        assert!(matches!(err, CosmosDbError::ReadFailed(_)));
        assert!(!HearthError::from(err).is_not_found());
    }

    #[test]
    fn test_from_status_without_status() {
        let err =
            CosmosDbError::from_status(None, "socket closed".to_string(), CosmosDbError::QueryFailed);
        assert!(matches!(err, CosmosDbError::QueryFailed(ref m) if m == "socket closed"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: HearthError = io_err.into();
        assert!(matches!(err, HearthError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: HearthError = json_err.into();
        assert!(matches!(err, HearthError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: HearthError = toml_err.into();
        assert!(matches!(err, HearthError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_hearth_error_implements_std_error() {
        let err = HearthError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
