//! Run coordinator - wires bounds resolution, extraction and persistence
//!
//! A run is strictly sequential: resolve bounds, extract, persist. Any fatal
//! error aborts the run before a checkpoint is written.

use crate::adapters::upstream::{HttpItemSource, ItemSource};
use crate::config::ItemSyncConfig;
use crate::core::bounds::BoundsResolver;
use crate::core::checkpoint::CheckpointStore;
use crate::core::extract::RangeExtractor;
use crate::core::run::summary::RunSummary;
use crate::domain::{ItemId, Result};
use crate::log_run_start;
use std::sync::Arc;
use std::time::Instant;

/// Executes one extraction run
pub struct RunCoordinator {
    batch_size: u64,
    dry_run: bool,
    store: Arc<CheckpointStore>,
    resolver: BoundsResolver,
    extractor: RangeExtractor,
}

impl RunCoordinator {
    /// Create a coordinator talking to the configured HTTP upstream
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client can't be built.
    pub fn new(config: &ItemSyncConfig) -> Result<Self> {
        let source: Arc<dyn ItemSource> = Arc::new(HttpItemSource::new(config.upstream.clone())?);
        Ok(Self::with_source(config, source))
    }

    /// Create a coordinator over an arbitrary item source
    pub fn with_source(config: &ItemSyncConfig, source: Arc<dyn ItemSource>) -> Self {
        let store = Arc::new(CheckpointStore::new(&config.checkpoint));
        let start_override = config.extract.start_override.map(ItemId::new);

        Self {
            batch_size: config.extract.batch_size,
            dry_run: config.application.dry_run,
            resolver: BoundsResolver::new(source.clone(), store.clone(), start_override),
            extractor: RangeExtractor::new(source),
            store,
        }
    }

    /// Checkpoint store this coordinator writes to
    pub fn store(&self) -> &CheckpointStore {
        &self.store
    }

    /// Execute the run
    ///
    /// # Errors
    ///
    /// Propagates [`UpstreamUnavailable`](crate::domain::PipelineError::UpstreamUnavailable),
    /// [`Fetch`](crate::domain::PipelineError::Fetch) and
    /// [`Storage`](crate::domain::PipelineError::Storage) failures unchanged.
    pub async fn execute_run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();

        let bounds = self.resolver.resolve().await?;
        log_run_start!(bounds.previous_max_id, bounds.live_max_id, self.batch_size);

        let mut summary = RunSummary::idle(
            bounds.previous_max_id,
            bounds.live_max_id,
            bounds.origin.clone(),
        );
        summary.dry_run = self.dry_run;

        if bounds.is_empty() {
            tracing::info!(
                previous_max_id = %bounds.previous_max_id,
                origin = %bounds.origin,
                "No new items upstream"
            );
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        let extraction = self
            .extractor
            .extract(bounds.previous_max_id, bounds.live_max_id, self.batch_size)
            .await?;

        summary.records_fetched = extraction.records.len();
        summary.empty_items = extraction.empty_items;

        if extraction.is_empty() {
            return Ok(summary.with_duration(start_time.elapsed()));
        }
        summary.realized = Some((extraction.min_id, extraction.max_id));

        if self.dry_run {
            tracing::info!(
                min_id = %extraction.min_id,
                max_id = %extraction.max_id,
                records = extraction.records.len(),
                "Dry run: skipping checkpoint write"
            );
        } else {
            let path = self
                .store
                .persist(&extraction.records, extraction.min_id, extraction.max_id)
                .await?;
            summary.checkpoint = Some(path);
        }

        Ok(summary.with_duration(start_time.elapsed()))
    }
}
