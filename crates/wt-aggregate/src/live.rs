//! Periodic refresh of the aggregated view.
//!
//! A failed fetch never blanks the map: the last successful view is kept
//! and flagged stale until a later refresh succeeds.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{AggregatedView, DEFAULT_RECENT_LIMIT, ReadingSource, aggregate};

/// What a consumer renders after a refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiveSnapshot {
    pub view:     AggregatedView,
    /// `true` while the view is left over from an earlier successful refresh.
    pub stale:    bool,
    /// Refreshes failed in a row since the last success.
    pub failures: u32,
}

/// Fetch-then-aggregate loop over a [`ReadingSource`].
pub struct LiveView<S: ReadingSource + ?Sized> {
    source:   Arc<S>,
    limit:    usize,
    snapshot: LiveSnapshot,
}

impl<S: ReadingSource + ?Sized> LiveView<S> {
    /// Window defaults to [`DEFAULT_RECENT_LIMIT`] readings.
    pub fn new(source: Arc<S>) -> Self {
        Self { source, limit: DEFAULT_RECENT_LIMIT, snapshot: LiveSnapshot::default() }
    }

    /// How many recent readings each refresh fetches.  A sensor with no
    /// reading inside the window is absent from the view.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn snapshot(&self) -> &LiveSnapshot {
        &self.snapshot
    }

    /// Fetch the recent window and recompute the view.
    ///
    /// On a source error the previous view is returned flagged stale.
    pub async fn refresh(&mut self) -> &LiveSnapshot {
        match self.source.fetch_recent(self.limit).await {
            Ok(readings) => {
                let fetched = readings.len();
                self.snapshot = LiveSnapshot { view: aggregate(readings), stale: false, failures: 0 };
                debug!(fetched, sensors = self.snapshot.view.len(), "live view refreshed");
            }
            Err(e) => {
                self.snapshot.stale = true;
                self.snapshot.failures += 1;
                warn!(
                    error = %e,
                    failures = self.snapshot.failures,
                    "refresh failed; keeping last known positions",
                );
            }
        }
        &self.snapshot
    }

    /// Refresh immediately, then every `period`, handing each snapshot to
    /// `on_refresh` until `stop` is cancelled.  Returns the number of
    /// refreshes performed.
    pub async fn watch<F>(&mut self, period: Duration, stop: &CancellationToken, mut on_refresh: F) -> u64
    where
        F: FnMut(&LiveSnapshot) + Send,
    {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut refreshes = 0;
        loop {
            tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                _ = ticker.tick() => {}
            }
            let snapshot = self.refresh().await;
            on_refresh(snapshot);
            refreshes += 1;
        }
        refreshes
    }
}
