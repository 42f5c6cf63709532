//! Configuration management for itemsync.
//!
//! # Overview
//!
//! itemsync uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ITEMSYNC_<SECTION>_<KEY>` environment overrides
//! - Default values for everything except the upstream base URL
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [upstream]
//! base_url = "https://hacker-news.firebaseio.com/v0"
//! max_item_path = "maxitem.json"
//! item_path = "item/{id}.json"
//!
//! [extract]
//! batch_size = 500
//!
//! [checkpoint]
//! directory = "checkpoints"
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use itemsync::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("itemsync.toml")?;
//! println!("Upstream: {}", config.upstream.base_url);
//! println!("Checkpoints: {}", config.checkpoint.directory);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CheckpointConfig, ExtractConfig, ItemSyncConfig, LoggingConfig,
    UpstreamConfig,
};
