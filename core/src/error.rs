//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the sync layer treats "the
//! item is gone" differently from other failures. Every other non-success
//! response lands in `HttpError`. In both cases the message is the server's
//! `error` field when the body carries one, otherwise the raw body.

use std::fmt;

/// Errors returned by `TodoClient` parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned 404.
    NotFound(String),

    /// The server returned an unexpected status other than 404.
    HttpError { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "not found: {msg}"),
            ApiError::HttpError { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
