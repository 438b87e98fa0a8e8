//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// Invalid input, e.g. an input directory that cannot be enumerated.
#[derive(Debug)]
pub struct InvalidInput(pub String);

/// A path query that cannot be parsed.
#[derive(Debug)]
pub struct InvalidQuery {
    pub query: String,
    pub reason: String,
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid input: {}", self.0)
    }
}

impl fmt::Display for InvalidQuery {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid query '{}': {}", self.query, self.reason)
    }
}

impl error::Error for InvalidInput {}

impl error::Error for InvalidQuery {}

/// A helper for constructing [InvalidInput].
pub fn invalid_input(s: String) -> Box<dyn error::Error> {
    InvalidInput(s).into()
}

/// A helper for constructing [InvalidQuery].
pub fn invalid_query(query: &str, reason: &str) -> Box<dyn error::Error> {
    InvalidQuery {
        query: query.to_owned(),
        reason: reason.to_owned(),
    }
    .into()
}
