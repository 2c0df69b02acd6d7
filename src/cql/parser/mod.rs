pub mod guard;
pub mod query;
pub mod tokenizer;

pub use query::parse_query;

#[cfg(test)]
mod guard_tests;
