//! Range extraction
//!
//! Walks `previous_max_id + 1 ..= live_max_id` one id at a time, capped at
//! `batch_size` fetches per run. Each request is awaited before the next is
//! issued.

use crate::adapters::upstream::ItemSource;
use crate::config::schema::MAX_BATCH_SIZE;
use crate::domain::{ItemId, PipelineError, Record, Result};
use crate::log_extract_progress;
use std::sync::Arc;

const PROGRESS_EVERY: u64 = 100;

/// Records obtained by one run and the id span they cover
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Records in id order, one per processed id, including empty ones
    pub records: Vec<Record>,
    /// First processed id (`previous_max_id + 1`), or `previous_max_id` when
    /// nothing was processed
    pub min_id: ItemId,
    /// Last processed id, or `live_max_id` when nothing was processed
    pub max_id: ItemId,
    /// How many processed ids came back null or empty
    pub empty_items: usize,
}

impl Extraction {
    fn nothing(previous_max_id: ItemId, live_max_id: ItemId) -> Self {
        Self {
            records: Vec::new(),
            min_id: previous_max_id,
            max_id: live_max_id,
            empty_items: 0,
        }
    }

    /// True when no ids were processed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Sequential, batch-capped extractor over an [`ItemSource`]
pub struct RangeExtractor {
    source: Arc<dyn ItemSource>,
}

impl RangeExtractor {
    /// Create an extractor reading from `source`
    pub fn new(source: Arc<dyn ItemSource>) -> Self {
        Self { source }
    }

    /// Fetch at most `batch_size` items after `previous_max_id`, never going
    /// past `live_max_id`
    ///
    /// Items that come back null or empty are kept (the id is consumed) and
    /// logged.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Configuration`] if `batch_size` is zero.
    /// - [`PipelineError::Fetch`] on the first item whose request fails; the
    ///   records gathered so far are dropped.
    pub async fn extract(
        &self,
        previous_max_id: ItemId,
        live_max_id: ItemId,
        batch_size: u64,
    ) -> Result<Extraction> {
        if batch_size == 0 {
            return Err(PipelineError::Configuration(
                "batch_size must be >= 1".to_string(),
            ));
        }

        if previous_max_id >= live_max_id {
            if previous_max_id > live_max_id {
                tracing::warn!(
                    previous_max_id = %previous_max_id,
                    live_max_id = %live_max_id,
                    "Upstream maximum is below the last checkpoint; nothing to extract"
                );
            }
            return Ok(Extraction::nothing(previous_max_id, live_max_id));
        }

        let start = previous_max_id.next();
        let end = ItemId::new(
            live_max_id
                .value()
                .min(start.value().saturating_add(batch_size - 1)),
        );
        let total = end.value() - start.value() + 1;

        tracing::info!(
            start = %start,
            end = %end,
            total = total,
            capped = end < live_max_id,
            "Extracting item range"
        );

        let mut records = Vec::with_capacity(preallocate(total));
        let mut empty_items = 0;

        for id in start.value()..=end.value() {
            let current = ItemId::new(id);
            let payload = self
                .source
                .fetch_item(current)
                .await
                .map_err(|source| {
                    tracing::error!(
                        item_id = %current,
                        fetched = records.len(),
                        error = %source,
                        "Item fetch failed; aborting run"
                    );
                    PipelineError::Fetch {
                        id: current,
                        source,
                    }
                })?;

            let record = Record::new(current, payload);
            if record.is_empty() {
                tracing::warn!(item_id = %current, "Upstream returned an empty item");
                empty_items += 1;
            }
            records.push(record);

            let done = records.len() as u64;
            if done % PROGRESS_EVERY == 0 {
                log_extract_progress!(done, total);
            }
        }

        Ok(Extraction {
            records,
            min_id: start,
            max_id: end,
            empty_items,
        })
    }
}

/// Capacity hint for the record buffer; a huge batch grows on demand instead
fn preallocate(total: u64) -> usize {
    usize::try_from(total.min(MAX_BATCH_SIZE)).unwrap_or(0)
}
