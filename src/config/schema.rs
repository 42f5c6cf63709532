//! Configuration schema types
//!
//! This module defines the configuration structure for itemsync. Every
//! component receives the section it needs at construction time.

use serde::{Deserialize, Serialize};

/// Main itemsync configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSyncConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Upstream API configuration
    pub upstream: UpstreamConfig,

    /// Extraction run parameters
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Checkpoint directory configuration
    #[serde(default)]
    pub checkpoint: CheckpointConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ItemSyncConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.upstream.validate()?;
        self.extract.validate()?;
        self.checkpoint.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (extract but don't write a checkpoint)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Upstream item API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the API, e.g. `https://hacker-news.firebaseio.com/v0`
    pub base_url: String,

    /// Path (relative to `base_url`) returning the current maximum item id
    #[serde(default = "default_max_item_path")]
    pub max_item_path: String,

    /// Path template (relative to `base_url`) for a single item; `{id}` is
    /// replaced with the item id
    #[serde(default = "default_item_path")]
    pub item_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,
}

impl UpstreamConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("upstream.base_url cannot be empty".to_string());
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| format!("upstream.base_url is not a valid URL: {e}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("upstream.base_url must start with http:// or https://".to_string());
        }

        if self.max_item_path.trim().is_empty() {
            return Err("upstream.max_item_path cannot be empty".to_string());
        }

        if !self.item_path.contains("{id}") {
            return Err(format!(
                "upstream.item_path must contain an {{id}} placeholder, got '{}'",
                self.item_path
            ));
        }

        if self.timeout_seconds == 0 {
            return Err("upstream.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_item_path: default_max_item_path(),
            item_path: default_item_path(),
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
        }
    }
}

/// Extraction run parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Maximum number of item fetches per run
    #[serde(default = "default_batch_size")]
    pub batch_size: u64,

    /// Explicit first item id to fetch, bypassing checkpoint-derived bounds
    #[serde(default)]
    pub start_override: Option<u64>,
}

impl ExtractConfig {
    fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(format!(
                "extract.batch_size must be between 1 and {MAX_BATCH_SIZE}, got {}",
                self.batch_size
            ));
        }

        if self.start_override == Some(0) {
            return Err("extract.start_override must be >= 1".to_string());
        }

        Ok(())
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            start_override: None,
        }
    }
}

/// Upper bound on `extract.batch_size`
pub const MAX_BATCH_SIZE: u64 = 100_000;

/// Checkpoint directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointConfig {
    /// Directory holding checkpoint files
    #[serde(default = "default_checkpoint_directory")]
    pub directory: String,

    /// Fixed trailing token of every checkpoint filename
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,
}

impl CheckpointConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.trim().is_empty() {
            return Err("checkpoint.directory cannot be empty".to_string());
        }

        if self.file_suffix.is_empty() {
            return Err("checkpoint.file_suffix cannot be empty".to_string());
        }

        if self
            .file_suffix
            .chars()
            .any(|c| c == '_' || c == '/' || c == '\\')
        {
            return Err(format!(
                "checkpoint.file_suffix must not contain '_' or path separators, got '{}'",
                self.file_suffix
            ));
        }

        Ok(())
    }
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            directory: default_checkpoint_directory(),
            file_suffix: default_file_suffix(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://hacker-news.firebaseio.com/v0".to_string()
}

fn default_max_item_path() -> String {
    "maxitem.json".to_string()
}

fn default_item_path() -> String {
    "item/{id}.json".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_batch_size() -> u64 {
    500
}

fn default_checkpoint_directory() -> String {
    "checkpoints".to_string()
}

fn default_file_suffix() -> String {
    "items.jsonl".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_upstream_config_validation() {
        let mut config = UpstreamConfig::default();
        assert!(config.validate().is_ok());

        config.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = "http://localhost:8080/v0".to_string();
        config.item_path = "item.json".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("{id}"));

        config.item_path = "item/{id}.json".to_string();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extract_config_validation() {
        let mut config = ExtractConfig::default();
        assert!(config.validate().is_ok());

        config.batch_size = 0;
        assert!(config.validate().is_err());

        config.batch_size = MAX_BATCH_SIZE + 1;
        assert!(config.validate().is_err());

        config.batch_size = 1;
        config.start_override = Some(0);
        assert!(config.validate().is_err());

        config.start_override = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_checkpoint_config_validation() {
        let mut config = CheckpointConfig::default();
        assert!(config.validate().is_ok());

        config.file_suffix = "hn_items.jsonl".to_string();
        assert!(config.validate().is_err());

        config.file_suffix = "a/b.jsonl".to_string();
        assert!(config.validate().is_err());

        config.file_suffix = "items.jsonl".to_string();
        config.directory = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_batch_size(), 500);
        assert_eq!(default_max_item_path(), "maxitem.json");
        assert_eq!(default_item_path(), "item/{id}.json");
        assert_eq!(default_file_suffix(), "items.jsonl");
    }
}
