use tracing::{debug, warn};

use super::derive::{DashboardView, DataSource, derive_view};
use super::sample::sample_snapshot;
use crate::error::ConsoleError;
use crate::models::StatisticsSnapshot;
use crate::store::{RequestSequencer, Ticket};

/// What happened to a completed statistics fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Live,
    /// The fetch failed and the built-in sample is shown instead
    Sample,
    /// A newer fetch was issued; this result was dropped
    Stale,
}

/// Owns the current dashboard view and sequences snapshot fetches
#[derive(Debug, Default)]
pub struct DashboardAggregator {
    sequencer: RequestSequencer,
    view: Option<DashboardView>,
    loading: bool,
}

impl DashboardAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) -> Ticket {
        self.loading = true;
        let ticket = self.sequencer.issue();
        debug!("dashboard fetch #{} issued", ticket.value());
        ticket
    }

    /// Apply a fetch result. The previous view is replaced wholesale, never merged.
    pub fn complete_fetch(
        &mut self,
        ticket: Ticket,
        result: Result<StatisticsSnapshot, ConsoleError>,
    ) -> FetchOutcome {
        if !self.sequencer.is_current(ticket) {
            debug!("dropping stale dashboard fetch #{}", ticket.value());
            return FetchOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(snapshot) => {
                self.view = Some(derive_view(&snapshot, DataSource::Live));
                FetchOutcome::Live
            }
            Err(e) => {
                warn!("statistics unavailable, showing sample data: {}", e);
                self.view = Some(derive_view(&sample_snapshot(), DataSource::Sample));
                FetchOutcome::Sample
            }
        }
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(total: u64) -> StatisticsSnapshot {
        StatisticsSnapshot { total_commands: total, ..Default::default() }
    }

    #[test]
    fn test_live_fetch_replaces_view() {
        let mut aggregator = DashboardAggregator::new();
        let ticket = aggregator.begin_fetch();
        assert!(aggregator.is_loading());

        assert_eq!(aggregator.complete_fetch(ticket, Ok(snapshot(1200))), FetchOutcome::Live);
        let view = aggregator.view().unwrap();
        assert_eq!(view.source, DataSource::Live);
        assert_eq!(view.summary.total_commands, "1,200");
        assert!(!aggregator.is_loading());
    }

    #[test]
    fn test_failure_falls_back_to_sample() {
        let mut aggregator = DashboardAggregator::new();
        let ticket = aggregator.begin_fetch();
        let err = ConsoleError::Transport { status: 500, message: "down".to_string() };

        assert_eq!(aggregator.complete_fetch(ticket, Err(err)), FetchOutcome::Sample);
        let view = aggregator.view().unwrap();
        assert_eq!(view.source, DataSource::Sample);
        assert_eq!(view.summary.total_commands, "15");
        assert_eq!(view.popular_commands[0].cells().join(" | "), "reproduce | 5 | 33.3%");
    }

    #[test]
    fn test_older_fetch_cannot_overwrite_newer() {
        let mut aggregator = DashboardAggregator::new();
        let first = aggregator.begin_fetch();
        let second = aggregator.begin_fetch();

        assert_eq!(aggregator.complete_fetch(second, Ok(snapshot(2))), FetchOutcome::Live);
        assert_eq!(aggregator.complete_fetch(first, Ok(snapshot(1))), FetchOutcome::Stale);
        assert_eq!(aggregator.view().unwrap().summary.total_commands, "2");
    }
}
