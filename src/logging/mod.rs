//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels (`RUST_LOG` wins when set)
//! - Console output on stderr
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use itemsync::logging::init_logging;
//! use itemsync::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the resolved bounds at the start of a run
///
/// # Example
///
/// ```no_run
/// use itemsync::log_run_start;
/// use itemsync::domain::ItemId;
///
/// log_run_start!(ItemId::new(150), ItemId::new(200), 50u64);
/// ```
#[macro_export]
macro_rules! log_run_start {
    ($previous_max:expr, $live_max:expr, $batch_size:expr) => {
        tracing::info!(
            previous_max_id = %$previous_max,
            live_max_id = %$live_max,
            batch_size = $batch_size,
            "Starting extraction run"
        );
    };
}

/// Log extraction progress every so often
///
/// # Example
///
/// ```no_run
/// use itemsync::log_extract_progress;
///
/// log_extract_progress!(100u64, 500u64);
/// ```
#[macro_export]
macro_rules! log_extract_progress {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Extracting items"
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand() {
        log_run_start!(
            crate::domain::ItemId::new(1),
            crate::domain::ItemId::new(2),
            1u64
        );
        log_extract_progress!(1u64, 2u64);
    }
}
