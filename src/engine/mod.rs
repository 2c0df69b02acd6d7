pub mod aggregate;
pub mod dataset;
pub mod executor;
pub mod filter;
pub mod limits;
pub mod provider;
pub mod render;
pub mod result;

pub use executor::execute;

#[cfg(test)]
mod render_tests;
