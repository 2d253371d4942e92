//! # mailrelay-mime
//!
//! Parser for the `multipart/mixed` voicemail messages emitted by a PBX mail
//! gateway.
//!
//! ## Features
//!
//! - **Single-pass parsing**: a line-driven state machine splits the raw text
//!   into a [`HeaderMap`] and numbered [`BodyParts`]
//! - **Named line rules**: header fields, continuations and delimiters are
//!   classified by small functions in [`parser::rules`]
//! - **Decoding**: Base64 payloads and RFC 2047 encoded-words
//! - **Re-serialization**: headers and parts render back into text that
//!   parses to the same structure
//!
//! The parser is deliberately narrow: no nested multiparts, no
//! quoted-printable bodies, no `multipart/alternative`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailrelay_mime::parse;
//!
//! let raw = "Subject: New voicemail\n\
//!            Content-Type: multipart/mixed; boundary=\"XYZ\"\n\
//!            \n\
//!            \n\
//!            --XYZ\n\
//!            Content-Type: text/plain; charset=utf-8\n\
//!            Content-Transfer-Encoding: 8bit\n\
//!            \n\
//!            You have a new message.\n\
//!            --XYZ--\n";
//!
//! let (headers, parts) = parse(raw)?;
//! println!("Subject: {}", headers.get("Subject").unwrap_or("(no subject)"));
//! for (index, part) in parts.iter() {
//!     println!("part {index}: {}", part.joined_body());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod header;
mod part;

pub mod content_type;
pub mod encoding;
pub mod parser;

pub use error::{Error, ParseError, Result};
pub use header::HeaderMap;
pub use parser::{Parser, State, parse};
pub use part::{BodyPart, BodyParts};
