//! Result type alias for itemsync

use super::errors::PipelineError;

/// Result type alias for itemsync operations
///
/// # Examples
///
/// ```
/// use itemsync::domain::result::Result;
/// use itemsync::domain::errors::PipelineError;
///
/// fn example_function() -> Result<u64> {
///     Ok(42)
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PipelineError::Storage("read-only".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PipelineError>;
