use parking_lot::RwLock;

use crate::engine::dataset::{CellRecord, DatasetSnapshot, EventRecord, MetricsSnapshot};
use crate::shared::time::now_ms;

/// Read-only collaborator supplying the point-in-time dataset a one-shot
/// query runs against. The core never writes through this interface.
pub trait DatasetProvider: Send + Sync {
    /// Produce a snapshot, trimming events to the trailing `time_range_days`
    /// window when given.
    fn snapshot(&self, time_range_days: Option<u32>) -> DatasetSnapshot;
}

#[derive(Default)]
struct MemoryInner {
    cells: Vec<CellRecord>,
    events: Vec<EventRecord>,
    metrics: MetricsSnapshot,
}

/// In-process dataset provider. Producers append through the record methods;
/// the cognitive core only ever takes snapshots.
#[derive(Default)]
pub struct MemoryDataset {
    inner: RwLock<MemoryInner>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cell(&self, cell: CellRecord) {
        self.inner.write().cells.push(cell);
    }

    pub fn record_event(&self, event: EventRecord) {
        self.inner.write().events.push(event);
    }

    pub fn set_metrics(&self, metrics: MetricsSnapshot) {
        self.inner.write().metrics = metrics;
    }
}

impl DatasetProvider for MemoryDataset {
    fn snapshot(&self, time_range_days: Option<u32>) -> DatasetSnapshot {
        let inner = self.inner.read();
        let events = match time_range_days {
            Some(days) if days > 0 => {
                let cutoff = now_ms() - i64::from(days) * 24 * 60 * 60 * 1000;
                inner
                    .events
                    .iter()
                    .filter(|e| e.timestamp_ms > cutoff)
                    .cloned()
                    .collect()
            }
            _ => inner.events.clone(),
        };
        DatasetSnapshot {
            cells: inner.cells.clone(),
            events,
            metrics: inner.metrics.clone(),
        }
    }
}
