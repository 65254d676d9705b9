//! Conversions between Hearth types and `azure_data_cosmos` request/response models

use crate::adapters::database::ContainerSpec;
use crate::config::ConsistencyLevel;
use crate::domain::CosmosDbError;
use azure_core::http::headers::{HeaderName, Headers};
use azure_data_cosmos::models::{ContainerProperties, IndexingPolicy, PartitionKeyDefinition};
use std::borrow::Cow;

/// Header carrying the request units an operation consumed
pub const REQUEST_CHARGE: HeaderName = HeaderName::from_static("x-ms-request-charge");

/// Request charge reported in `headers`, 0.0 if missing or malformed
pub fn request_charge(headers: &Headers) -> f64 {
    parse_request_charge(headers.get_optional_str(&REQUEST_CHARGE))
}

fn parse_request_charge(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Map an SDK error onto [`CosmosDbError`] by the HTTP status it carries
pub fn sdk_error(
    err: &azure_core::Error,
    message: String,
    fallback: fn(String) -> CosmosDbError,
) -> CosmosDbError {
    CosmosDbError::from_status(err.http_status().map(u16::from), message, fallback)
}

/// Container properties for a hash-partitioned container
pub fn container_properties(spec: &ContainerSpec) -> ContainerProperties {
    let partition_key_def = PartitionKeyDefinition {
        paths: vec![spec.partition_key_path.clone()],
        kind: azure_data_cosmos::models::PartitionKeyKind::Hash,
        version: None,
    };

    ContainerProperties {
        id: Cow::Owned(spec.name.clone()),
        partition_key: partition_key_def,
        indexing_policy: Some(IndexingPolicy::default()),
        ..Default::default()
    }
}

/// Map the configured consistency level onto the SDK enum
pub fn sdk_consistency(level: ConsistencyLevel) -> azure_data_cosmos::ConsistencyLevel {
    use azure_data_cosmos::ConsistencyLevel as Sdk;

    match level {
        ConsistencyLevel::Strong => Sdk::Strong,
        ConsistencyLevel::BoundedStaleness => Sdk::BoundedStaleness,
        ConsistencyLevel::Session => Sdk::Session,
        ConsistencyLevel::ConsistentPrefix => Sdk::ConsistentPrefix,
        ConsistencyLevel::Eventual => Sdk::Eventual,
    }
}
