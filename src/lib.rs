//! # itemsync - incremental, checkpointed item extraction
//!
//! itemsync pulls contiguous ranges of numbered items from an item-by-ID HTTP
//! API (such as the Hacker News Firebase API) and writes them to JSON Lines
//! checkpoint files. The checkpoint filenames are the only state: the next run
//! reads the last filename to learn where to resume, so no database or lock
//! file is needed.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Bounds resolution, extraction, checkpointing, run orchestration
//! - [`adapters`] - The upstream HTTP API
//! - [`domain`] - Ids, records and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itemsync::config::load_config;
//! use itemsync::core::run::RunCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("itemsync.toml")?;
//!     let coordinator = RunCoordinator::new(&config)?;
//!
//!     let summary = coordinator.execute_run().await?;
//!     println!("Fetched {} items", summary.records_fetched);
//!     Ok(())
//! }
//! ```
//!
//! ## Checkpoints
//!
//! Each run that fetched at least one item writes
//! `<timestamp>_<min_id>_<max_id>_items.jsonl`, one JSON value per line. A run
//! that fails for any reason writes nothing, so every checkpoint on disk covers
//! a complete, gap-free id span.
//!
//! ```rust,no_run
//! use itemsync::config::CheckpointConfig;
//! use itemsync::core::checkpoint::CheckpointStore;
//!
//! # async fn example() -> itemsync::domain::Result<()> {
//! let store = CheckpointStore::new(&CheckpointConfig::default());
//! for name in store.history().await? {
//!     println!("{} .. {}", name.min_id(), name.max_id());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
