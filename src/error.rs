//! Client Error Types
//!
//! Every fallible operation in the crate returns [`Result`]. Network and server-side
//! failures are funneled into the same enum so callers can match on one type.
//!
//! Misuse of the query composition engine (merging across indexes, finalizing an
//! empty batch) is a programmer error and panics instead of producing an [`Error`].

use thiserror::Error;

/// Response body the server sends when an index already exists.
pub const INDEX_EXISTS_BODY: &str = "index already exists\n";
/// Response body the server sends when a frame already exists.
pub const FRAME_EXISTS_BODY: &str = "frame already exists\n";

#[derive(Debug, Error)]
pub enum Error {
    /// Every endpoint has been evicted from the host set.
    #[error("no hosts available in cluster")]
    NoHosts,

    /// A name or label failed validation before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("index already exists")]
    IndexAlreadyExists,

    #[error("frame already exists")]
    FrameAlreadyExists,

    /// Any other non-2xx response.
    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },

    /// A response body was present but did not have the expected shape.
    #[error("failed to decode response (status {status}): {reason}")]
    DecodeFailed { status: u16, reason: String },

    /// An attribute record carried an unknown type tag.
    #[error("invalid attribute type code {0}")]
    InvalidAttributeType(u64),

    /// The transport could not open a connection to the host.
    #[error("host unreachable: {0}")]
    HostUnreachable(String),

    /// Any other transport failure (timeouts, protocol errors, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The blocking client could not start its runtime.
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Translates a non-2xx response into an error, recognizing the
    /// "already exists" bodies used for idempotent creation.
    pub fn from_status(status: u16, body: &str) -> Self {
        match body {
            INDEX_EXISTS_BODY => Error::IndexAlreadyExists,
            FRAME_EXISTS_BODY => Error::FrameAlreadyExists,
            _ => Error::Server {
                status,
                body: body.to_string(),
            },
        }
    }

    /// Whether this failure should evict the host it was raised against.
    pub fn is_host_unreachable(&self) -> bool {
        matches!(self, Error::HostUnreachable(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::IndexAlreadyExists | Error::FrameAlreadyExists)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_recognizes_index_exists() {
        let err = Error::from_status(409, "index already exists\n");
        assert!(matches!(err, Error::IndexAlreadyExists));
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_from_status_recognizes_frame_exists() {
        let err = Error::from_status(409, "frame already exists\n");
        assert!(matches!(err, Error::FrameAlreadyExists));
    }

    #[test]
    fn test_from_status_keeps_status_and_body() {
        // Missing trailing newline is not the sentinel body
        let err = Error::from_status(409, "index already exists");
        match err {
            Error::Server { status, body } => {
                assert_eq!(status, 409);
                assert_eq!(body, "index already exists");
            }
            other => panic!("expected server error, got {:?}", other),
        }

        let err = Error::from_status(500, "boom");
        assert_eq!(err.to_string(), "server error 500: boom");
        assert!(!err.is_host_unreachable());
    }
}
