//! Run summary and reporting

use crate::core::bounds::BoundsOrigin;
use crate::domain::ItemId;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a single extraction run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Exclusive lower bound the run started from
    pub previous_max_id: ItemId,

    /// Upstream maximum at the start of the run
    pub live_max_id: ItemId,

    /// How the lower bound was derived
    pub origin: BoundsOrigin,

    /// Realized `(min_id, max_id)`, `None` when nothing was extracted
    pub realized: Option<(ItemId, ItemId)>,

    /// Number of ids processed
    pub records_fetched: usize,

    /// Processed ids that came back null or empty
    pub empty_items: usize,

    /// Checkpoint written by this run
    pub checkpoint: Option<PathBuf>,

    /// Dry run: extracted but not persisted
    pub dry_run: bool,

    /// Wall time of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Summary of a run that had nothing to do
    pub fn idle(previous_max_id: ItemId, live_max_id: ItemId, origin: BoundsOrigin) -> Self {
        Self {
            previous_max_id,
            live_max_id,
            origin,
            realized: None,
            records_fetched: 0,
            empty_items: 0,
            checkpoint: None,
            dry_run: false,
            duration: Duration::ZERO,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Ids still pending upstream after this run
    pub fn remaining(&self) -> u64 {
        let reached = self
            .realized
            .map(|(_, max)| max)
            .unwrap_or(self.previous_max_id);
        self.live_max_id.value().saturating_sub(reached.value())
    }

    /// True when the run caught up with the upstream maximum
    pub fn caught_up(&self) -> bool {
        self.remaining() == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            origin = %self.origin,
            previous_max_id = %self.previous_max_id,
            live_max_id = %self.live_max_id,
            min_id = self.realized.map(|(min, _)| min.value()),
            max_id = self.realized.map(|(_, max)| max.value()),
            records = self.records_fetched,
            empty_items = self.empty_items,
            remaining = self.remaining(),
            checkpoint = self.checkpoint.as_ref().map(|p| p.display().to_string()),
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            "Run completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_summary() {
        let summary = RunSummary::idle(ItemId::new(10), ItemId::new(10), BoundsOrigin::ColdStart);
        assert_eq!(summary.records_fetched, 0);
        assert!(summary.caught_up());
        assert!(summary.checkpoint.is_none());
    }

    #[test]
    fn test_remaining_after_capped_run() {
        let mut summary =
            RunSummary::idle(ItemId::new(100), ItemId::new(1000), BoundsOrigin::ColdStart)
                .with_duration(Duration::from_millis(1500));
        assert_eq!(summary.remaining(), 900);

        summary.realized = Some((ItemId::new(101), ItemId::new(200)));
        summary.records_fetched = 100;
        assert_eq!(summary.remaining(), 800);
        assert!(!summary.caught_up());
        assert_eq!(summary.duration, Duration::from_millis(1500));
    }
}
