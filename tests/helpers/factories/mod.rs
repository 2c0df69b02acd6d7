pub mod bus_event_factory;
pub mod cell_factory;
pub mod event_factory;
pub mod snapshot_factory;

pub use bus_event_factory::BusEventFactory;
pub use cell_factory::CellFactory;
pub use event_factory::EventFactory;
pub use snapshot_factory::SnapshotFactory;
