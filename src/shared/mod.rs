pub mod config;
pub mod error;
pub mod response;
pub mod time;

#[cfg(test)]
mod response_tests;
