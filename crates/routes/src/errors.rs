//! Error types for the download-query boundary.

use thiserror::Error;

/// Errors produced when decoding a download query back into a ride request.
///
/// The file-serving collaborator surfaces these as 4xx responses. Decoding
/// is pure, so a failing query fails identically on every attempt; nothing
/// here is retried.
///
/// A message that simply is not a route request is not an error: the parser
/// returns `None` and the caller falls back to its conversational path.
#[derive(Error, Debug, PartialEq)]
pub enum QueryError {
    #[error("Missing parameter: {0}")]
    MissingParam(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidParam { name: &'static str, value: String },
}
