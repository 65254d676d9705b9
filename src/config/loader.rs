//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CosmosDbConfig, DatabaseTarget, HearthConfig};
use super::secret_string;
use crate::domain::errors::HearthError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`HearthConfig`]
/// 4. Applies environment variable overrides (`HEARTH_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use hearth::config::loader::load_config;
///
/// let config = load_config("hearth.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<HearthConfig> {
    load_config_with_target(path, None)
}

/// Loads configuration like [`load_config`], forcing `database_target` before validation
///
/// A forced `memory` target accepts files whose `[cosmosdb]` section is
/// missing or has invalid connection settings; only its names are checked,
/// and unset `${VAR}` references inside it are left as written.
pub fn load_config_with_target(
    path: impl AsRef<Path>,
    target: Option<DatabaseTarget>,
) -> Result<HearthConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HearthError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        HearthError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents, target)
}

/// Parses configuration from TOML text, applying substitution, overrides and validation
pub fn load_config_from_str(contents: &str) -> Result<HearthConfig> {
    parse_config(contents, None)
}

fn parse_config(contents: &str, target: Option<DatabaseTarget>) -> Result<HearthConfig> {
    // The in-memory store never uses the connection settings
    let optional_section = match target {
        Some(DatabaseTarget::Memory) => Some("cosmosdb"),
        _ => None,
    };
    let contents = substitute_env_vars(contents, optional_section)?;

    let mut config: HearthConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    if let Some(target) = target {
        config.database_target = target;
    }

    config.validate().map_err(|e| {
        HearthError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied through untouched. Unset variables inside
/// `optional_section` are left as written.
///
/// # Errors
///
/// Returns an error listing every other referenced variable that is not set
fn substitute_env_vars(input: &str, optional_section: Option<&str>) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();
    let mut section = String::new();

    for line in input.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }
        if let Some(header) = trimmed.strip_prefix('[') {
            section = header
                .trim_start_matches('[')
                .split(']')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
        }
        let tolerate_missing = optional_section == Some(section.as_str());

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) if tolerate_missing => {
                    tracing::debug!(
                        variable = %var_name,
                        section = %section,
                        "Leaving unset variable in unused section"
                    );
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(HearthError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        HearthError::Configuration(format!("Invalid value '{value}' for {name}: {e}"))
    })
}

/// Applies environment variable overrides using the `HEARTH_*` prefix
///
/// Variables follow the pattern `HEARTH_<SECTION>_<KEY>`, for example
/// `HEARTH_COSMOSDB_ENDPOINT` or `HEARTH_WORKLOAD_READ_ITERATIONS`.
/// Setting an endpoint or key through the environment creates the
/// `[cosmosdb]` section if the file has none.
fn apply_env_overrides(config: &mut HearthConfig) -> Result<()> {
    if let Ok(val) = std::env::var("HEARTH_DATABASE_TARGET") {
        config.database_target = parse_override("HEARTH_DATABASE_TARGET", &val)?;
    }

    // Application overrides
    if let Ok(val) = std::env::var("HEARTH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Cosmos DB overrides
    let endpoint = std::env::var("HEARTH_COSMOSDB_ENDPOINT").ok();
    let key = std::env::var("HEARTH_COSMOSDB_KEY").ok();
    if config.cosmosdb.is_none() {
        if let (Some(endpoint), Some(key)) = (&endpoint, &key) {
            config.cosmosdb = Some(cosmos_section(endpoint.clone(), key.clone())?);
        }
    }

    if let Some(ref mut cosmos_config) = config.cosmosdb {
        if let Some(val) = endpoint {
            cosmos_config.endpoint = val;
        }
        if let Some(val) = key {
            cosmos_config.key = secret_string(val);
        }
        if let Ok(val) = std::env::var("HEARTH_COSMOSDB_DATABASE_NAME") {
            cosmos_config.database_name = val;
        }
        if let Ok(val) = std::env::var("HEARTH_COSMOSDB_CONTAINER_NAME") {
            cosmos_config.container_name = val;
        }
        if let Ok(val) = std::env::var("HEARTH_COSMOSDB_THROUGHPUT") {
            cosmos_config.throughput = parse_override("HEARTH_COSMOSDB_THROUGHPUT", &val)?;
        }
        if let Ok(val) = std::env::var("HEARTH_COSMOSDB_PREFERRED_REGIONS") {
            cosmos_config.preferred_regions = split_list(&val);
        }
        if let Ok(val) = std::env::var("HEARTH_COSMOSDB_CONSISTENCY_LEVEL") {
            cosmos_config.consistency_level =
                parse_override("HEARTH_COSMOSDB_CONSISTENCY_LEVEL", &val)?;
        }
    }

    // Workload overrides
    if let Ok(val) = std::env::var("HEARTH_WORKLOAD_READ_ITERATIONS") {
        config.workload.read_iterations =
            Some(parse_override("HEARTH_WORKLOAD_READ_ITERATIONS", &val)?);
    }
    if let Ok(val) = std::env::var("HEARTH_WORKLOAD_READ_DELAY_MS") {
        config.workload.read_delay_ms = parse_override("HEARTH_WORKLOAD_READ_DELAY_MS", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("HEARTH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("HEARTH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

/// A `[cosmosdb]` section with defaults for everything but endpoint and key
fn cosmos_section(endpoint: String, key: String) -> Result<CosmosDbConfig> {
    let mut table = toml::Table::new();
    table.insert("endpoint".to_string(), toml::Value::String(endpoint));
    table.insert("key".to_string(), toml::Value::String(key));
    Ok(toml::Value::Table(table).try_into()?)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("HEARTH_LOADER_TEST_VAR", "test_value");
        let input = "key = \"${HEARTH_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input, None).unwrap();
        assert_eq!(result, "key = \"test_value\"\n");
        std::env::remove_var("HEARTH_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("HEARTH_LOADER_MISSING_VAR");
        let input = "key = \"${HEARTH_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input, None).unwrap_err();
        assert!(err.to_string().contains("HEARTH_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("HEARTH_LOADER_COMMENTED_VAR");
        let input = "# key = \"${HEARTH_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input, None).unwrap();
        assert!(result.contains("${HEARTH_LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_substitute_tolerates_unset_vars_in_optional_section() {
        std::env::remove_var("HEARTH_LOADER_OPTIONAL_VAR");
        let input = "[cosmosdb]\nkey = \"${HEARTH_LOADER_OPTIONAL_VAR}\"\n";

        assert!(substitute_env_vars(input, None).is_err());

        let result = substitute_env_vars(input, Some("cosmosdb")).unwrap();
        assert!(result.contains("key = \"${HEARTH_LOADER_OPTIONAL_VAR}\""));
    }

    #[test]
    fn test_substitute_optional_section_is_scoped() {
        std::env::remove_var("HEARTH_LOADER_SCOPED_VAR");
        let input = "[cosmosdb]\nendpoint = \"x\"\n\n[logging]\nlocal_path = \"${HEARTH_LOADER_SCOPED_VAR}\"\n";

        let err = substitute_env_vars(input, Some("cosmosdb")).unwrap_err();
        assert!(err.to_string().contains("HEARTH_LOADER_SCOPED_VAR"));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list("West US, East US 2,,"),
            vec!["West US".to_string(), "East US 2".to_string()]
        );
    }

    #[test]
    fn test_cosmos_section_defaults() {
        let section = cosmos_section(
            "https://acct.documents.azure.com:443/".to_string(),
            "k".to_string(),
        )
        .unwrap();
        assert_eq!(section.database_name, "AzureSampleFamilyDB");
        assert_eq!(section.partition_key_path, "/lastName");
        assert!(section.key.expose_secret() == "k");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-hearth.toml");
        assert!(matches!(result, Err(HearthError::Configuration(_))));
    }

    #[test]
    fn test_load_config_memory_target() {
        let toml_content = r#"
database_target = "memory"

[application]
log_level = "debug"

[workload]
read_iterations = 3
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.workload.read_iterations, Some(3));
        assert_eq!(config.workload.query_page_size, 10);
        assert!(config.cosmosdb.is_none());
    }

    #[test]
    fn test_forced_memory_target_skips_cosmos_requirements() {
        let toml_content = r#"
database_target = "cosmosdb"

[workload]
read_iterations = 1
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path()).is_err());

        let config =
            load_config_with_target(temp_file.path(), Some(DatabaseTarget::Memory)).unwrap();
        assert_eq!(config.database_target, DatabaseTarget::Memory);
        assert_eq!(config.database_name(), "AzureSampleFamilyDB");
    }
}
