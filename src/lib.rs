pub mod bus;
pub mod cql;
pub mod engine;
pub mod frontend;
pub mod logging;
pub mod shared;
pub mod stream;

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
