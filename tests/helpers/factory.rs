pub use super::factories::{BusEventFactory, CellFactory, EventFactory, SnapshotFactory};

pub struct Factory;

impl Factory {
    pub fn cell() -> CellFactory {
        CellFactory::new()
    }

    pub fn event() -> EventFactory {
        EventFactory::new()
    }

    pub fn bus_event() -> BusEventFactory {
        BusEventFactory::new()
    }

    pub fn snapshot() -> SnapshotFactory {
        SnapshotFactory::new()
    }
}
