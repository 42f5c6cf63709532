//! Upstream item source trait
//!
//! Abstracts the two read-only operations the extractor needs from an
//! item-by-ID API, so the bounds resolver and the extractor can be driven by
//! the HTTP client in production and by in-memory sources in tests.

use crate::domain::{ItemId, UpstreamError};
use async_trait::async_trait;
use serde_json::Value;

/// A remote, numbered collection of items
///
/// Implementations must report transport failures and non-2xx statuses as
/// errors, and report a successful-but-empty response (`null`, empty body)
/// as `Ok(Value::Null)` so callers can tell the two apart.
///
/// # Example
///
/// ```no_run
/// use itemsync::adapters::upstream::{HttpItemSource, ItemSource};
/// use itemsync::config::UpstreamConfig;
/// use itemsync::domain::ItemId;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let source = HttpItemSource::new(UpstreamConfig::default())?;
/// let live_max = source.max_item_id().await?;
/// let item = source.fetch_item(ItemId::new(8863)).await?;
/// println!("max={live_max} item={item}");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Current maximum item id known to the upstream
    async fn max_item_id(&self) -> Result<ItemId, UpstreamError>;

    /// Fetch a single item by id
    async fn fetch_item(&self, id: ItemId) -> Result<Value, UpstreamError>;

    /// Human-readable location of the source, for logging
    fn base_url(&self) -> &str;
}
