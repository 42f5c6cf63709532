//! Core business logic for itemsync.
//!
//! # Modules
//!
//! - [`bounds`] - Decide which ids a run covers
//! - [`extract`] - Sequential, batch-capped fetch of an id range
//! - [`checkpoint`] - JSON Lines checkpoints whose filenames are the resume log
//! - [`run`] - Orchestration and run summaries
//!
//! # Run Workflow
//!
//! 1. **Resolve bounds**: query the upstream maximum; take the previous
//!    maximum from the latest checkpoint filename (or the start override)
//! 2. **Extract**: fetch `previous + 1 ..= min(live, previous + batch_size)`
//! 3. **Checkpoint**: write the records as one JSON value per line, named
//!    `<timestamp>_<min>_<max>_<suffix>`
//!
//! # Example
//!
//! ```rust,no_run
//! use itemsync::config::load_config;
//! use itemsync::core::run::RunCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("itemsync.toml")?;
//! let coordinator = RunCoordinator::new(&config)?;
//!
//! let summary = coordinator.execute_run().await?;
//! println!("Fetched {} items", summary.records_fetched);
//! # Ok(())
//! # }
//! ```

pub mod bounds;
pub mod checkpoint;
pub mod extract;
pub mod run;
