pub mod parser;
pub mod types;

pub use parser::parse_query;
