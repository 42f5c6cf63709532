//! Status command implementation
//!
//! Lists the checkpoint history and the id the next run starts from.

use crate::adapters::upstream::{HttpItemSource, ItemSource};
use crate::config::load_config;
use crate::core::checkpoint::CheckpointStore;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Only show the most recent N checkpoints
    #[arg(long)]
    pub last: Option<usize>,

    /// Also query the upstream maximum and report how far behind we are
    #[arg(long)]
    pub live: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking checkpoint status");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let store = CheckpointStore::new(&config.checkpoint);
        let history = match store.history().await {
            Ok(h) => h,
            Err(e) => {
                println!("❌ Failed to read checkpoint history");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        println!("📊 Checkpoint Status ({})", store.directory().display());
        println!();

        if history.is_empty() {
            println!("No checkpoints found.");
            println!("The next 'itemsync run' records the upstream maximum and extracts nothing.");
        } else {
            let skip = self
                .last
                .map(|n| history.len().saturating_sub(n))
                .unwrap_or(0);

            println!("Found {} checkpoint(s):", history.len());
            println!();
            println!(
                "{:<30} {:>12} {:>12} {:>10}",
                "Created (UTC)", "Min ID", "Max ID", "Items"
            );
            println!("{}", "-".repeat(68));

            for name in history.iter().skip(skip) {
                println!(
                    "{:<30} {:>12} {:>12} {:>10}",
                    name.timestamp().format("%Y-%m-%d %H:%M:%S%.3f"),
                    name.min_id(),
                    name.max_id(),
                    name.record_count()
                );
            }
            println!();
        }

        let resume_from = history.last().map(|latest| latest.max_id().next());
        if let Some(next) = resume_from {
            println!("Next run starts at item {next}");
        }

        if self.live {
            let source = HttpItemSource::new(config.upstream.clone())?;
            match source.max_item_id().await {
                Ok(live) => {
                    println!("Upstream maximum: {live}");
                    if let Some(latest) = history.last() {
                        println!(
                            "Behind by: {} item(s)",
                            live.value().saturating_sub(latest.max_id().value())
                        );
                    }
                }
                Err(e) => {
                    println!("❌ Upstream unavailable: {e}");
                    return Ok(4);
                }
            }
        }

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_args_defaults() {
        let args = StatusArgs {
            last: None,
            live: false,
        };
        assert!(args.last.is_none());
        assert!(!args.live);
    }
}
