//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Upstream: {}", config.upstream.base_url);
        println!("  Max Item Path: {}", config.upstream.max_item_path);
        println!("  Item Path: {}", config.upstream.item_path);
        println!("  Timeout: {}s", config.upstream.timeout_seconds);
        println!("  Batch Size: {}", config.extract.batch_size);
        match config.extract.start_override {
            Some(start) => println!("  Start Override: {start}"),
            None => println!("  Start Override: none (resume from checkpoints)"),
        }
        println!("  Checkpoint Directory: {}", config.checkpoint.directory);
        println!("  Checkpoint Suffix: {}", config.checkpoint.file_suffix);

        if !config.upstream.tls_verify {
            println!();
            println!("⚠️  TLS certificate verification is disabled");
        }

        Ok(0)
    }
}
