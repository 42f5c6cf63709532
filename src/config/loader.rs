//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ItemSyncConfig;
use crate::domain::errors::PipelineError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ItemSyncConfig`]
/// 4. Applies environment variable overrides (`ITEMSYNC_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`PipelineError::Configuration`] if the file cannot be read, a
/// referenced variable is unset, parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use itemsync::config::loader::load_config;
///
/// let config = load_config("itemsync.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ItemSyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PipelineError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PipelineError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ItemSyncConfig = toml::from_str(&contents)
        .map_err(|e| PipelineError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        PipelineError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PipelineError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
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
        return Err(PipelineError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Parses a typed override, rejecting garbage instead of silently ignoring it
fn parse_override<T: std::str::FromStr>(name: &str, val: &str) -> Result<T> {
    val.trim().parse().map_err(|_| {
        PipelineError::Configuration(format!("Environment override {name}='{val}' is not valid"))
    })
}

/// Applies environment variable overrides using the `ITEMSYNC_*` prefix
///
/// Variables follow the pattern `ITEMSYNC_<SECTION>_<KEY>`, for example
/// `ITEMSYNC_UPSTREAM_BASE_URL` or `ITEMSYNC_EXTRACT_BATCH_SIZE`.
fn apply_env_overrides(config: &mut ItemSyncConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("ITEMSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("ITEMSYNC_APPLICATION_DRY_RUN") {
        config.application.dry_run = parse_override("ITEMSYNC_APPLICATION_DRY_RUN", &val)?;
    }

    // Upstream overrides
    if let Ok(val) = std::env::var("ITEMSYNC_UPSTREAM_BASE_URL") {
        config.upstream.base_url = val;
    }
    if let Ok(val) = std::env::var("ITEMSYNC_UPSTREAM_TIMEOUT_SECONDS") {
        config.upstream.timeout_seconds =
            parse_override("ITEMSYNC_UPSTREAM_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("ITEMSYNC_UPSTREAM_TLS_VERIFY") {
        config.upstream.tls_verify = parse_override("ITEMSYNC_UPSTREAM_TLS_VERIFY", &val)?;
    }

    // Extract overrides
    if let Ok(val) = std::env::var("ITEMSYNC_EXTRACT_BATCH_SIZE") {
        config.extract.batch_size = parse_override("ITEMSYNC_EXTRACT_BATCH_SIZE", &val)?;
    }
    if let Ok(val) = std::env::var("ITEMSYNC_EXTRACT_START_OVERRIDE") {
        config.extract.start_override =
            Some(parse_override("ITEMSYNC_EXTRACT_START_OVERRIDE", &val)?);
    }

    // Checkpoint overrides
    if let Ok(val) = std::env::var("ITEMSYNC_CHECKPOINT_DIRECTORY") {
        config.checkpoint.directory = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ITEMSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("ITEMSYNC_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("ITEMSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
