use crate::engine::dataset::{CellRecord, DatasetSnapshot, EventRecord, MetricsSnapshot};

use super::{CellFactory, EventFactory};

pub struct SnapshotFactory {
    snapshot: DatasetSnapshot,
}

impl SnapshotFactory {
    pub fn new() -> Self {
        Self {
            snapshot: DatasetSnapshot::default(),
        }
    }

    pub fn with_cells(mut self, count: usize) -> Self {
        self.snapshot.cells = CellFactory::new().create_list(count);
        self
    }

    pub fn with_events(mut self, count: usize) -> Self {
        self.snapshot.events = EventFactory::new().create_list(count);
        self
    }

    pub fn with_cell(mut self, cell: CellRecord) -> Self {
        self.snapshot.cells.push(cell);
        self
    }

    pub fn with_event(mut self, event: EventRecord) -> Self {
        self.snapshot.events.push(event);
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsSnapshot) -> Self {
        self.snapshot.metrics = metrics;
        self
    }

    pub fn create(self) -> DatasetSnapshot {
        self.snapshot
    }
}
