//! Domain models and types for itemsync.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Item identifiers** ([`ItemId`])
//! - **Fetched records** ([`Record`])
//! - **Error types** ([`PipelineError`], [`UpstreamError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, PipelineError>`]:
//!
//! ```rust,no_run
//! use itemsync::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = itemsync::config::load_config("itemsync.toml")?;
//!     println!("batch size: {}", config.extract.batch_size);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

pub use errors::{PipelineError, UpstreamError};
pub use ids::ItemId;
pub use record::Record;
pub use result::Result;
