//! Extraction bounds resolution
//!
//! Decides which ids a run covers: everything after `previous_max_id` up to
//! and including the upstream's live maximum.

use crate::adapters::upstream::ItemSource;
use crate::core::checkpoint::{CheckpointName, CheckpointStore};
use crate::domain::{ItemId, PipelineError, Result};
use std::fmt;
use std::sync::Arc;

/// Where `previous_max_id` came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundsOrigin {
    /// No checkpoints yet; the run starts at the live maximum
    ColdStart,
    /// Resumed from the most recent checkpoint
    Checkpoint(CheckpointName),
    /// Explicit start id from configuration or the command line
    StartOverride(ItemId),
}

impl fmt::Display for BoundsOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundsOrigin::ColdStart => write!(f, "cold start"),
            BoundsOrigin::Checkpoint(name) => write!(f, "checkpoint {name}"),
            BoundsOrigin::StartOverride(start) => write!(f, "start override {start}"),
        }
    }
}

/// Resolved `(previous_max_id, live_max_id)` pair for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    /// Exclusive lower bound
    pub previous_max_id: ItemId,
    /// Inclusive upper bound
    pub live_max_id: ItemId,
    /// How the lower bound was derived
    pub origin: BoundsOrigin,
}

impl Bounds {
    /// True when there is nothing to extract
    pub fn is_empty(&self) -> bool {
        self.previous_max_id >= self.live_max_id
    }

    /// Number of ids between the bounds
    pub fn pending(&self) -> u64 {
        self.live_max_id
            .value()
            .saturating_sub(self.previous_max_id.value())
    }
}

/// Computes [`Bounds`] from checkpoint history and the live upstream maximum
pub struct BoundsResolver {
    source: Arc<dyn ItemSource>,
    store: Arc<CheckpointStore>,
    start_override: Option<ItemId>,
}

impl BoundsResolver {
    /// Create a resolver
    ///
    /// `start_override` is the first id to fetch; when set, checkpoint
    /// history is not consulted.
    pub fn new(
        source: Arc<dyn ItemSource>,
        store: Arc<CheckpointStore>,
        start_override: Option<ItemId>,
    ) -> Self {
        Self {
            source,
            store,
            start_override,
        }
    }

    /// Resolve the bounds for this run
    ///
    /// # Errors
    ///
    /// - [`PipelineError::UpstreamUnavailable`] if the live maximum can't be
    ///   queried. Not retried.
    /// - [`PipelineError::Storage`] if the checkpoint directory exists but
    ///   can't be listed.
    pub async fn resolve(&self) -> Result<Bounds> {
        let live_max_id = self.source.max_item_id().await.map_err(|e| {
            tracing::error!(
                base_url = self.source.base_url(),
                error = %e,
                "Failed to query upstream maximum item id"
            );
            PipelineError::UpstreamUnavailable(e)
        })?;

        if let Some(start) = self.start_override {
            let requested = start.prev();
            if requested > live_max_id {
                tracing::warn!(
                    start = %start,
                    live_max_id = %live_max_id,
                    "Start override is beyond the upstream maximum; nothing to extract"
                );
            }
            return Ok(Bounds {
                previous_max_id: requested.min(live_max_id),
                live_max_id,
                origin: BoundsOrigin::StartOverride(start),
            });
        }

        match self.store.latest().await? {
            Some(latest) => {
                tracing::debug!(checkpoint = %latest, "Resuming from latest checkpoint");
                Ok(Bounds {
                    previous_max_id: latest.max_id(),
                    live_max_id,
                    origin: BoundsOrigin::Checkpoint(latest),
                })
            }
            None => {
                tracing::info!(
                    live_max_id = %live_max_id,
                    directory = %self.store.directory().display(),
                    "No checkpoints found; first run records the live maximum only"
                );
                Ok(Bounds {
                    previous_max_id: live_max_id,
                    live_max_id,
                    origin: BoundsOrigin::ColdStart,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckpointConfig;
    use crate::domain::{Record, UpstreamError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use test_case::test_case;

    struct FixedMax(std::result::Result<u64, u16>);

    #[async_trait]
    impl ItemSource for FixedMax {
        async fn max_item_id(&self) -> std::result::Result<ItemId, UpstreamError> {
            match self.0 {
                Ok(max) => Ok(ItemId::new(max)),
                Err(status) => Err(UpstreamError::from_status(status, "down")),
            }
        }

        async fn fetch_item(&self, _id: ItemId) -> std::result::Result<Value, UpstreamError> {
            unreachable!("bounds resolution never fetches items")
        }

        fn base_url(&self) -> &str {
            "memory://fixed"
        }
    }

    fn store_in(dir: &TempDir) -> Arc<CheckpointStore> {
        Arc::new(CheckpointStore::new(&CheckpointConfig {
            directory: dir.path().to_string_lossy().to_string(),
            file_suffix: "items.jsonl".to_string(),
        }))
    }

    fn resolver(max: std::result::Result<u64, u16>, store: Arc<CheckpointStore>) -> BoundsResolver {
        BoundsResolver::new(Arc::new(FixedMax(max)), store, None)
    }

    async fn write_checkpoint(store: &CheckpointStore, min: u64, max: u64) {
        let records: Vec<Record> = (min..=max)
            .map(|id| Record::new(ItemId::new(id), json!({ "id": id })))
            .collect();
        store
            .persist(&records, ItemId::new(min), ItemId::new(max))
            .await
            .unwrap();
    }

    #[test_case(0 ; "zero")]
    #[test_case(1 ; "one")]
    #[test_case(41_234_567 ; "large")]
    #[tokio::test]
    async fn test_cold_start_is_empty_range(live: u64) {
        let dir = TempDir::new().unwrap();
        let bounds = resolver(Ok(live), store_in(&dir)).resolve().await.unwrap();

        assert_eq!(bounds.previous_max_id, ItemId::new(live));
        assert_eq!(bounds.live_max_id, ItemId::new(live));
        assert_eq!(bounds.origin, BoundsOrigin::ColdStart);
        assert!(bounds.is_empty());
    }

    #[tokio::test]
    async fn test_resumes_from_latest_checkpoint() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        write_checkpoint(&store, 1, 100).await;
        write_checkpoint(&store, 101, 150).await;

        let bounds = resolver(Ok(200), store).resolve().await.unwrap();
        assert_eq!(bounds.previous_max_id, ItemId::new(150));
        assert_eq!(bounds.live_max_id, ItemId::new(200));
        assert_eq!(bounds.pending(), 50);
        assert!(matches!(bounds.origin, BoundsOrigin::Checkpoint(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = resolver(Err(503), store_in(&dir)).resolve().await.unwrap_err();
        assert!(matches!(err, PipelineError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_start_override_bypasses_history() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        write_checkpoint(&store, 1, 100).await;

        let resolver = BoundsResolver::new(
            Arc::new(FixedMax(Ok(500))),
            store,
            Some(ItemId::new(42)),
        );
        let bounds = resolver.resolve().await.unwrap();
        assert_eq!(bounds.previous_max_id, ItemId::new(41));
        assert_eq!(bounds.live_max_id, ItemId::new(500));
        assert_eq!(bounds.origin, BoundsOrigin::StartOverride(ItemId::new(42)));
    }

    #[tokio::test]
    async fn test_start_override_beyond_live_max_is_clamped() {
        let dir = TempDir::new().unwrap();
        let resolver = BoundsResolver::new(
            Arc::new(FixedMax(Ok(10))),
            store_in(&dir),
            Some(ItemId::new(50)),
        );
        let bounds = resolver.resolve().await.unwrap();
        assert_eq!(bounds.previous_max_id, ItemId::new(10));
        assert!(bounds.is_empty());
    }
}
