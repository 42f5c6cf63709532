//! Run command implementation
//!
//! This module implements the `run` command: one bounded extraction run.

use crate::config::load_config;
use crate::core::run::RunCoordinator;
use clap::Args;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the maximum number of items fetched by this run
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: Option<u64>,

    /// First item id to fetch, ignoring checkpoint history
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub start: Option<u64>,

    /// Extract but don't write a checkpoint
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting run command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(e.exit_code());
            }
        };

        if let Some(batch_size) = self.batch_size {
            tracing::info!(batch_size, "Overriding batch size from CLI");
            config.extract.batch_size = batch_size;
        }

        if let Some(start) = self.start {
            tracing::info!(start, "Overriding start id from CLI");
            config.extract.start_override = Some(start);
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Err(e) = config.validate() {
            eprintln!("❌ Invalid configuration: {e}");
            return Ok(2);
        }

        let coordinator = RunCoordinator::new(&config)?;

        let summary = match coordinator.execute_run().await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Run failed; no checkpoint written");
                eprintln!("❌ Run failed: {e}");
                return Ok(e.exit_code());
            }
        };

        summary.log_summary();

        println!("📦 Run Summary");
        println!("  Resumed from:   {}", summary.origin);
        println!("  Previous max:   {}", summary.previous_max_id);
        println!("  Upstream max:   {}", summary.live_max_id);
        match summary.realized {
            Some((min, max)) => {
                println!("  Extracted:      {min}..={max} ({} items)", summary.records_fetched);
                println!("  Empty items:    {}", summary.empty_items);
            }
            None => println!("  Extracted:      nothing new"),
        }
        match (&summary.checkpoint, summary.dry_run) {
            (Some(path), _) => println!("  Checkpoint:     {}", path.display()),
            (None, true) => println!("  Checkpoint:     skipped (dry run)"),
            (None, false) => println!("  Checkpoint:     none"),
        }
        println!("  Remaining:      {}", summary.remaining());
        println!("  Duration:       {:.2}s", summary.duration.as_secs_f64());

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_args_defaults() {
        let args = RunArgs {
            batch_size: None,
            start: None,
            dry_run: false,
        };
        assert!(args.batch_size.is_none());
        assert!(args.start.is_none());
    }

    #[tokio::test]
    async fn test_missing_config_exits_with_config_code() {
        let args = RunArgs {
            batch_size: None,
            start: None,
            dry_run: true,
        };
        let code = args.execute("does-not-exist.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
