//! Error types for the user directory client.
//!
//! # Design
//! Status codes are not an error category of their own: create and the read
//! operations decode whatever body comes back, so a non-2xx reply with a
//! non-JSON body surfaces as `DeserializationError`. Delete reports status
//! as a boolean.

use thiserror::Error;

/// Errors returned by `UserApi` parse methods and `UserClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout).
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// A payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// Writing to the local file system or an output sink failed.
    #[error("i/o failed: {0}")]
    IoError(#[from] std::io::Error),
}
