//! In-memory reading log.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::RwLock;
use wt_aggregate::{ReadingSource, SourceError};
use wt_core::{Reading, SensorId};
use wt_sim::{ReadingSink, SinkError};

/// Append-only log of readings held in memory.
///
/// With a capacity, the oldest readings are evicted once it is exceeded.
/// Readers take the lock only long enough to copy the window they asked for,
/// so a refresh never observes a half-appended reading.
#[derive(Debug, Default)]
pub struct MemoryStore {
    log:      RwLock<VecDeque<Reading>>,
    capacity: Option<usize>,
}

impl MemoryStore {
    /// Unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that keeps at most `capacity` readings.
    pub fn bounded(capacity: usize) -> Self {
        Self { log: RwLock::new(VecDeque::with_capacity(capacity)), capacity: Some(capacity) }
    }

    pub fn len(&self) -> usize {
        self.log.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.read().is_empty()
    }

    /// Everything retained, oldest first.
    pub fn snapshot(&self) -> Vec<Reading> {
        self.log.read().iter().cloned().collect()
    }

    pub fn push(&self, reading: Reading) {
        let mut log = self.log.write();
        log.push_back(reading);
        if let Some(cap) = self.capacity {
            while log.len() > cap {
                log.pop_front();
            }
        }
    }

    /// Newest-first window over the readings accepted by `keep`.  Equal
    /// timestamps come out latest-appended first.
    fn newest<F>(&self, limit: usize, keep: F) -> Vec<Reading>
    where
        F: Fn(&Reading) -> bool,
    {
        let log = self.log.read();
        let mut window: Vec<&Reading> = log.iter().rev().filter(|r| keep(r)).collect();
        window.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        window.into_iter().take(limit).cloned().collect()
    }
}

#[async_trait]
impl ReadingSink for MemoryStore {
    async fn append(&self, reading: Reading) -> Result<(), SinkError> {
        self.push(reading);
        Ok(())
    }
}

#[async_trait]
impl ReadingSource for MemoryStore {
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Reading>, SourceError> {
        Ok(self.newest(limit, |_| true))
    }

    async fn fetch_sensor(&self, sensor: &SensorId, limit: usize) -> Result<Vec<Reading>, SourceError> {
        Ok(self.newest(limit, |r| &r.sensor_id == sensor))
    }
}
