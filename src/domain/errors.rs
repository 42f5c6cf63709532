//! Domain error types
//!
//! This module defines the error hierarchy for itemsync. Run-level failures are
//! expressed as [`PipelineError`]; failures talking to the upstream API are
//! expressed as [`UpstreamError`] and wrapped with the context of *which* call
//! failed (the bounds query or an individual item fetch).
//!
//! Errors don't expose third-party types such as `reqwest::Error`.

use super::ids::ItemId;
use thiserror::Error;

/// Main itemsync error type
///
/// Every variant except [`PipelineError::Configuration`] aborts a run without
/// writing a checkpoint, so a checkpoint on disk always covers a complete span.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The live maximum id could not be queried; nothing was extracted
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] UpstreamError),

    /// An in-range item fetch failed; partial results were discarded
    #[error("Failed to fetch item {id}: {source}")]
    Fetch {
        /// Id of the item whose fetch failed
        id: ItemId,
        /// Underlying upstream failure
        #[source]
        source: UpstreamError,
    },

    /// Checkpoint directory could not be created, written or read
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PipelineError {
    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Configuration(_) => 2,
            PipelineError::UpstreamUnavailable(_) => 4,
            _ => 5,
        }
    }
}

/// Upstream API errors
///
/// A successful response carrying `null` or an empty body is *not* an error;
/// it is an empty item and is handled by the extractor.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Transport-level failure (DNS, connection refused, TLS, ...)
    #[error("Failed to connect to upstream: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Body could not be decoded
    #[error("Invalid response from upstream: {0}")]
    InvalidResponse(String),
}

impl UpstreamError {
    /// Classifies a non-success HTTP status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if (400..500).contains(&status) {
            UpstreamError::ClientError { status, message }
        } else {
            UpstreamError::ServerError { status, message }
        }
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PipelineError {
    fn from(err: toml::de::Error) -> Self {
        PipelineError::Configuration(format!("TOML parse error: {err}"))
    }
}
