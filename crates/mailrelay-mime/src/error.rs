//! Error types for message parsing and decoding.

use std::string::FromUtf8Error;

/// Result type alias for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Decoding error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid encoding.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Base64 decode error.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// UTF-8 decode error.
    #[error("UTF-8 decode error: {0}")]
    Utf8Decode(#[from] FromUtf8Error),
}

/// Fatal conditions that abort parsing of a message.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The header block ended without a usable `multipart/mixed` content type.
    #[error("Content-Type header is missing, not multipart/mixed, or has no boundary")]
    MissingOrBadContentType,

    /// A continuation line appeared before any header line.
    #[error("Continuation line {line} has no preceding header")]
    OrphanContinuation {
        /// 1-based line number in the raw message.
        line: usize,
    },

    /// A body line was reached with no boundary identified.
    #[error("Boundary is not defined")]
    BoundaryUndefined,
}
