//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// itemsync - incremental, checkpointed item extractor
#[derive(Parser, Debug)]
#[command(name = "itemsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "itemsync.toml", env = "ITEMSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ITEMSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the next batch of items and write a checkpoint
    Run(commands::run::RunArgs),

    /// Show checkpoint history and where the next run resumes
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["itemsync", "run"]);
        assert_eq!(cli.config, "itemsync.toml");
        assert!(matches!(cli.command, Commands::Run(_)));
    }

    #[test]
    fn test_cli_parse_run_overrides() {
        let cli = Cli::parse_from([
            "itemsync",
            "--config",
            "custom.toml",
            "run",
            "--batch-size",
            "50",
            "--start",
            "101",
            "--dry-run",
        ]);
        assert_eq!(cli.config, "custom.toml");
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.batch_size, Some(50));
                assert_eq!(args.start, Some(101));
                assert!(args.dry_run);
            }
            other => panic!("Expected run command, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_batch_size() {
        assert!(Cli::try_parse_from(["itemsync", "run", "--batch-size", "0"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["itemsync", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["itemsync", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["itemsync", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
