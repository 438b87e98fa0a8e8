pub mod aggregate;
pub mod author;
pub mod charts;
pub mod config;
pub mod counter;
pub mod driver;
pub mod errors;
pub mod extract;
pub mod input;
pub mod output;
pub mod query;
pub mod record;
pub mod table;
pub mod text;

/// Placeholder for any value that could not be extracted.
pub const NA: &str = "NA";
