pub mod adapter;
pub mod message;
pub mod scope;
pub mod session;
pub mod window;

pub use adapter::{StreamSession, start};
pub use scope::StreamScope;
pub use session::{SessionCore, StreamConfig};

#[cfg(test)]
mod adapter_tests;
#[cfg(test)]
mod scope_tests;
