pub mod event;
pub mod hub;

pub use event::BusEvent;
pub use hub::{Delivery, EventBus, Subscription};
