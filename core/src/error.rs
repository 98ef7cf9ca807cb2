//! Error types for the todo API client.
//!
//! `NotFound` is split out of the status errors because a missing todo is
//! an expected outcome of a get or update. JSON failures keep the
//! `serde_json::Error` as their source. `Transport` belongs to hosts: the
//! core itself never performs I/O.

use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// 404 from the server.
    NotFound,

    /// Any other non-2xx status, with the raw body for diagnostics.
    HttpError { status: u16, body: String },

    /// The response body did not match the expected shape.
    Decode(serde_json::Error),

    /// A request payload could not be encoded. Unreachable for the plain
    /// derived DTOs in this crate, but `serde_json` reports it as fallible.
    Encode(serde_json::Error),

    /// User input was rejected before any request was built.
    InvalidInput(String),

    /// The host could not complete the HTTP round trip.
    Transport(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => f.write_str("todo not found"),
            ApiError::HttpError { status, body } if body.is_empty() => write!(f, "HTTP {status}"),
            ApiError::HttpError { status, body } => write!(f, "HTTP {status}: {body}"),
            ApiError::Decode(_) => f.write_str("unexpected response body"),
            ApiError::Encode(_) => f.write_str("could not encode request body"),
            ApiError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Decode(e) | ApiError::Encode(e) => Some(e),
            _ => None,
        }
    }
}
