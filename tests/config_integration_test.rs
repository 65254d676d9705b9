//! Integration tests for configuration loading and validation
//!
//! Tests that touch `HEARTH_*` variables hold `ENV_MUTEX`, since overrides
//! are read from the process environment.

use hearth::config::{load_config, load_config_from_str, ConsistencyLevel, DatabaseTarget};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use test_case::test_case;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDE_VARS: &[&str] = &[
    "HEARTH_DATABASE_TARGET",
    "HEARTH_APPLICATION_LOG_LEVEL",
    "HEARTH_COSMOSDB_ENDPOINT",
    "HEARTH_COSMOSDB_KEY",
    "HEARTH_COSMOSDB_DATABASE_NAME",
    "HEARTH_COSMOSDB_CONTAINER_NAME",
    "HEARTH_COSMOSDB_THROUGHPUT",
    "HEARTH_COSMOSDB_PREFERRED_REGIONS",
    "HEARTH_COSMOSDB_CONSISTENCY_LEVEL",
    "HEARTH_WORKLOAD_READ_ITERATIONS",
    "HEARTH_WORKLOAD_READ_DELAY_MS",
    "HEARTH_LOGGING_LOCAL_ENABLED",
    "HEARTH_LOGGING_LOCAL_PATH",
    "TEST_HEARTH_COSMOS_KEY",
];

fn cleanup_env_vars() {
    for var in OVERRIDE_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

const COMPLETE_CONFIG: &str = r#"
database_target = "cosmosdb"

[application]
log_level = "debug"

[cosmosdb]
endpoint = "https://test.documents.azure.com:443/"
key = "test-key"
database_name = "FamilyDB"
container_name = "Families"
partition_key_path = "/lastName"
throughput = 400
preferred_regions = ["West US", "East US"]
consistency_level = "session"

[workload]
read_iterations = 3
read_delay_ms = 100
query_page_size = 2
query_last_names = ["Andersen"]

[logging]
local_enabled = true
local_path = "/tmp/hearth-logs"
local_rotation = "hourly"
"#;

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(COMPLETE_CONFIG);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.database_target, DatabaseTarget::CosmosDB);
    assert_eq!(config.application.log_level, "debug");

    let cosmos = config.cosmosdb.as_ref().unwrap();
    assert_eq!(cosmos.endpoint, "https://test.documents.azure.com:443/");
    assert!(cosmos.key.expose_secret() == "test-key");
    assert_eq!(cosmos.preferred_regions, vec!["West US", "East US"]);
    assert_eq!(cosmos.consistency_level, ConsistencyLevel::Session);

    assert_eq!(config.database_name(), "FamilyDB");
    assert_eq!(config.container_name(), "Families");
    assert_eq!(config.throughput(), 400);

    assert_eq!(config.workload.read_iterations, Some(3));
    assert_eq!(config.workload.read_delay_ms, 100);
    assert_eq!(config.workload.query_page_size, 2);
    assert_eq!(config.workload.query_last_names, vec!["Andersen"]);

    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let config = load_config_from_str(
        r#"
[cosmosdb]
endpoint = "https://test.documents.azure.com:443/"
key = "test-key"
"#,
    )
    .unwrap();

    assert_eq!(config.database_target, DatabaseTarget::CosmosDB);
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.database_name(), "AzureSampleFamilyDB");
    assert_eq!(config.container_name(), "FamilyContainer");
    assert_eq!(config.partition_key_path(), "/lastName");
    assert_eq!(config.throughput(), 20000);

    let cosmos = config.cosmosdb.as_ref().unwrap();
    assert_eq!(cosmos.preferred_regions, vec!["West US"]);
    assert_eq!(cosmos.consistency_level, ConsistencyLevel::Eventual);

    assert_eq!(config.workload.read_iterations, None);
    assert_eq!(config.workload.query_page_size, 10);
    assert_eq!(
        config.workload.query_last_names,
        vec!["Andersen", "Wakefield", "Johnson"]
    );
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_HEARTH_COSMOS_KEY", "substituted-key");

    let config = load_config_from_str(
        r#"
[cosmosdb]
endpoint = "https://test.documents.azure.com:443/"
key = "${TEST_HEARTH_COSMOS_KEY}"
"#,
    )
    .unwrap();

    assert!(config.cosmosdb.unwrap().key.expose_secret() == "substituted-key");
    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let result = load_config_from_str(
        r#"
[cosmosdb]
endpoint = "https://test.documents.azure.com:443/"
key = "${TEST_HEARTH_COSMOS_KEY}"
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("HEARTH_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("HEARTH_COSMOSDB_THROUGHPUT", "1000");
    std::env::set_var("HEARTH_COSMOSDB_PREFERRED_REGIONS", "North Europe, West Europe");
    std::env::set_var("HEARTH_COSMOSDB_CONSISTENCY_LEVEL", "bounded-staleness");
    std::env::set_var("HEARTH_WORKLOAD_READ_ITERATIONS", "7");
    std::env::set_var("HEARTH_WORKLOAD_READ_DELAY_MS", "50");

    let temp_file = write_config(COMPLETE_CONFIG);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.throughput(), 1000);
    let cosmos = config.cosmosdb.as_ref().unwrap();
    assert_eq!(cosmos.preferred_regions, vec!["North Europe", "West Europe"]);
    assert_eq!(cosmos.consistency_level, ConsistencyLevel::BoundedStaleness);
    assert_eq!(config.workload.read_iterations, Some(7));
    assert_eq!(config.workload.read_delay_ms, 50);

    cleanup_env_vars();
}

#[test]
fn test_env_creates_cosmos_section() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("HEARTH_COSMOSDB_ENDPOINT", "https://env.documents.azure.com:443/");
    std::env::set_var("HEARTH_COSMOSDB_KEY", "env-key");

    let config = load_config_from_str("").unwrap();

    let cosmos = config.cosmosdb.unwrap();
    assert_eq!(cosmos.endpoint, "https://env.documents.azure.com:443/");
    assert!(cosmos.key.expose_secret() == "env-key");
    assert_eq!(cosmos.database_name, "AzureSampleFamilyDB");

    cleanup_env_vars();
}

#[test]
fn test_memory_target_needs_no_cosmos_section() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let config = load_config_from_str("database_target = \"memory\"").unwrap();
    assert_eq!(config.database_target, DatabaseTarget::Memory);
    assert!(config.cosmosdb.is_none());
}

#[test_case("[application]\nlog_level = \"loud\"" ; "invalid log level")]
#[test_case("database_target = \"cosmosdb\"" ; "missing cosmos section")]
#[test_case("database_target = \"mongodb\"" ; "unknown target")]
#[test_case("[cosmosdb]\nendpoint = \"http://test.documents.azure.com\"\nkey = \"k\"" ; "plain http endpoint")]
#[test_case("[cosmosdb]\nendpoint = \"https://test.documents.azure.com\"\nkey = \"\"" ; "empty key")]
#[test_case("[cosmosdb]\nendpoint = \"https://test.documents.azure.com\"\nkey = \"k\"\nthroughput = 450" ; "throughput not a multiple of 100")]
#[test_case("[cosmosdb]\nendpoint = \"https://test.documents.azure.com\"\nkey = \"k\"\nthroughput = 300" ; "throughput too low")]
#[test_case("[cosmosdb]\nendpoint = \"https://test.documents.azure.com\"\nkey = \"k\"\npartition_key_path = \"lastName\"" ; "partition key path without slash")]
#[test_case("[cosmosdb]\nendpoint = \"https://test.documents.azure.com\"\nkey = \"k\"\nconsistency_level = \"linearizable\"" ; "unknown consistency level")]
#[test_case("database_target = \"memory\"\n[workload]\nquery_page_size = 0" ; "zero page size")]
#[test_case("database_target = \"memory\"\n[logging]\nlocal_rotation = \"weekly\"" ; "unknown rotation")]
fn test_invalid_config_rejected(contents: &str) {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    assert!(load_config_from_str(contents).is_err());
}
