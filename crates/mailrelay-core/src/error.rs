//! Error types for the core library.

use thiserror::Error;

use crate::assemble::AssembleError;
use crate::config::ConfigError;
use crate::transport::TransportError;

/// Errors that can occur while relaying a message.
#[derive(Debug, Error)]
pub enum Error {
    /// The raw message could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] mailrelay_mime::ParseError),

    /// The parsed message could not be assembled.
    #[error("Assembly error: {0}")]
    Assemble(#[from] AssembleError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The transport rejected the submission.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
