//! Init command implementation
//!
//! Writes a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "itemsync.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate: itemsync --config {} validate-config", self.output);
                println!("  3. Run once to record the upstream maximum: itemsync run");
                println!("  4. Schedule 'itemsync run' to extract new items incrementally");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file: {e}");
                Ok(5)
            }
        }
    }

    fn generate_minimal_config() -> String {
        r#"# itemsync configuration

[upstream]
base_url = "https://hacker-news.firebaseio.com/v0"

[extract]
batch_size = 500

[checkpoint]
directory = "checkpoints"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# itemsync configuration
#
# Values of the form ${VAR_NAME} are replaced with environment variables.
# Any key can also be overridden with ITEMSYNC_<SECTION>_<KEY>.

[application]
# trace, debug, info, warn, error
log_level = "info"
# Extract but don't write checkpoints
dry_run = false

[upstream]
base_url = "https://hacker-news.firebaseio.com/v0"
# Returns the current maximum item id as a bare integer
max_item_path = "maxitem.json"
# {id} is replaced with the item id; a null body marks a missing item
item_path = "item/{id}.json"
timeout_seconds = 30
tls_verify = true

[extract]
# Maximum number of item fetches per run
batch_size = 500
# First id to fetch, ignoring checkpoint history
# start_override = 1

[checkpoint]
# Files are named <timestamp>_<min_id>_<max_id>_<file_suffix>
directory = "checkpoints"
file_suffix = "items.jsonl"

[logging]
local_enabled = false
local_path = "logs"
# daily, hourly, never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ItemSyncConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_configs_parse_and_validate() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config: ItemSyncConfig = toml::from_str(&content).unwrap();
            assert!(config.validate().is_ok());
            assert_eq!(config.checkpoint.directory, "checkpoints");
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("itemsync.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[upstream]"));
    }
}
