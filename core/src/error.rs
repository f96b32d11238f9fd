//! Error types for the Are.na API client.
//!
//! # Design
//! Every non-2xx response becomes `ApiError::Http` carrying the status code
//! and the transport's reason phrase; callers branch on the status rather
//! than on a zoo of variants. Failures raised by the transport itself are
//! surfaced unchanged through the transparent `Transport` variant.

use crate::http::TransportError;

/// Errors returned by `ArenaClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The operation is not supported by the remote API. No request is sent.
    #[error("method not implemented: {0}")]
    NotImplemented(&'static str),

    /// The transport could not complete the round-trip.
    #[error(transparent)]
    Transport(TransportError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
