//! # mailrelay-core
//!
//! Turns a raw voicemail notification into a submission for a mail
//! transport.
//!
//! This crate provides:
//! - Message assembly: decoded subject, composed plain text body, split
//!   recipient lists and decoded audio attachments
//! - The [`Transport`] hand-off trait and a JSON [`SpoolTransport`]
//! - Transport credentials from a `KEY=VALUE` file
//!
//! ## Example
//!
//! ```ignore
//! use mailrelay_core::{Config, SpoolTransport, relay};
//!
//! let config = Config::load(&Config::default_path()?)?;
//! let mut transport = SpoolTransport::new(std::io::stdout(), &config);
//! relay(&raw_message, &mut transport)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod assemble;
pub mod config;
mod error;
pub mod message;
mod relay;
pub mod transport;

pub use assemble::{AssembleError, assemble};
pub use config::{Config, ConfigError, ServerAddress};
pub use error::{Error, Result};
pub use message::{Attachment, Importance, OriginalHeaders, OutgoingMessage, split_recipients};
pub use relay::{prepare, relay};
pub use transport::{SpoolTransport, Transport, TransportError};
