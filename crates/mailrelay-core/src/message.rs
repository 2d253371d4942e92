//! Outgoing message model.
//!
//! These are the values handed to a [`Transport`](crate::Transport): one
//! finished message plus the decoded attachments.

use mailrelay_mime::encoding::encode_base64;
use serde::{Serialize, Serializer};

/// Message importance requested from the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Importance {
    /// Low importance.
    Low,
    /// Normal importance.
    Normal,
    /// High importance. Relayed voicemail is always sent with this.
    #[default]
    High,
}

/// Header values copied verbatim from the original message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OriginalHeaders {
    /// `Date` header.
    pub date: Option<String>,
    /// `From` header.
    pub from: Option<String>,
    /// `To` header.
    pub to: Option<String>,
    /// `Cc` header.
    pub cc: Option<String>,
    /// `Bcc` header.
    pub bcc: Option<String>,
    /// `Message-ID` header.
    pub message_id: Option<String>,
}

/// A message ready for submission.
///
/// Subject and body are always present: assembly fails instead of
/// producing a message without them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    /// Headers copied from the original message.
    pub original: OriginalHeaders,
    /// Decoded subject line.
    pub subject: String,
    /// Plain text body.
    pub body: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// CC addresses.
    pub cc: Vec<String>,
    /// BCC addresses.
    pub bcc: Vec<String>,
    /// Requested importance.
    pub importance: Importance,
    /// Whether the sent copy is marked as read.
    pub mark_read: bool,
}

impl OutgoingMessage {
    /// Creates a new outgoing message with no recipients.
    #[must_use]
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            original: OriginalHeaders::default(),
            subject: subject.into(),
            body: body.into(),
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            importance: Importance::High,
            mark_read: false,
        }
    }

    /// Returns all recipients (to, cc, bcc).
    #[must_use]
    pub fn all_recipients(&self) -> Vec<&str> {
        self.to
            .iter()
            .chain(&self.cc)
            .chain(&self.bcc)
            .map(String::as_str)
            .collect()
    }
}

/// A binary attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// File name.
    pub filename: String,
    /// Decoded content.
    #[serde(serialize_with = "serialize_base64")]
    pub data: Vec<u8>,
}

impl Attachment {
    /// Creates a new attachment.
    #[must_use]
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }
}

fn serialize_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&encode_base64(data))
}

/// Splits a recipient header value on `;`.
///
/// Entries are trimmed and empty entries dropped, so an empty value yields
/// no recipients.
#[must_use]
pub fn split_recipients(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(str::to_string)
        .collect()
}
