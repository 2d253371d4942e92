//! Turns a parsed message into an outgoing message and its attachments.

use std::fmt::Write as _;

use mailrelay_mime::content_type::{BASE64, EIGHT_BIT, is_audio_wav, is_text_plain, wav_filename};
use mailrelay_mime::encoding::{decode_base64_lines, decode_rfc2047};
use mailrelay_mime::{BodyPart, BodyParts, HeaderMap};
use tracing::{debug, info, warn};

use crate::message::{Attachment, OriginalHeaders, OutgoingMessage, split_recipients};

/// Headers copied into the top of the body, in this order.
const PASSTHROUGH_HEADERS: [&str; 6] = ["Date", "From", "To", "Cc", "Bcc", "Message-ID"];

/// Header carrying the caller's number.
const CALLER_ID: &str = "X-Asterisk-CallerID";

/// Header carrying the caller's display name.
const CALLER_ID_NAME: &str = "X-Asterisk-CallerIDName";

/// Errors that prevent a parsed message from being submitted.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// Subject or message text is missing.
    #[error("Incomplete message: {reason}")]
    IncompleteMessage {
        /// What is missing.
        reason: &'static str,
    },

    /// An audio attachment is not valid Base64.
    #[error("Attachment {filename} is not valid base64: {source}")]
    BadAttachmentEncoding {
        /// Attachment file name.
        filename: String,
        /// Decoding failure.
        source: mailrelay_mime::Error,
    },
}

/// Builds the outgoing message and attachments from a parsed message.
///
/// The body starts with the passthrough headers and the caller ID line,
/// followed by every `text/plain; 8bit` part in order. Every
/// `audio/x-wav; base64` part with a file name becomes an attachment.
///
/// # Errors
///
/// Returns [`AssembleError::IncompleteMessage`] if the subject is missing or
/// no plain text part has content, and
/// [`AssembleError::BadAttachmentEncoding`] if an audio part does not decode.
pub fn assemble(
    headers: &HeaderMap,
    parts: &BodyParts,
) -> Result<(OutgoingMessage, Vec<Attachment>), AssembleError> {
    let mut body = String::new();
    for name in PASSTHROUGH_HEADERS {
        if let Some(value) = headers.get(name) {
            let _ = writeln!(body, "{name}: {value}");
        }
    }

    if let (Some(id), Some(name)) = (headers.get(CALLER_ID), headers.get(CALLER_ID_NAME)) {
        let _ = writeln!(body, "Caller ID: {id} ({name})");
    }

    let mut has_text = false;
    for (index, part) in parts.iter().filter(|(_, part)| is_plain_text(part)) {
        let text = part.joined_body();
        debug!(index, len = text.len(), "appending plain text part");
        has_text |= !text.is_empty();
        body.push_str("\n\n");
        body.push_str(&text);
        body.push('\n');
    }

    let subject = decode_subject(headers);
    let subject = match (subject, has_text) {
        (Some(subject), true) => subject,
        (None, true) => return Err(AssembleError::IncompleteMessage { reason: "no subject" }),
        (Some(_), false) => {
            return Err(AssembleError::IncompleteMessage {
                reason: "no plain text body",
            });
        }
        (None, false) => {
            return Err(AssembleError::IncompleteMessage {
                reason: "no subject and no plain text body",
            });
        }
    };

    let attachments = extract_attachments(parts)?;

    let message = OutgoingMessage {
        original: original_headers(headers),
        to: headers.get("To").map(split_recipients).unwrap_or_default(),
        cc: headers.get("Cc").map(split_recipients).unwrap_or_default(),
        bcc: headers.get("Bcc").map(split_recipients).unwrap_or_default(),
        ..OutgoingMessage::new(subject, body)
    };
    info!(
        recipients = message.all_recipients().len(),
        attachments = attachments.len(),
        "message assembled"
    );
    Ok((message, attachments))
}

fn is_plain_text(part: &BodyPart) -> bool {
    part.has_body()
        && part.content_type().is_some_and(is_text_plain)
        && part.transfer_encoding() == Some(EIGHT_BIT)
}

/// Decodes the subject, treating an empty result as no subject.
fn decode_subject(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get("Subject").filter(|s| !s.is_empty())?;
    match decode_rfc2047(raw) {
        Ok(subject) if !subject.trim().is_empty() => Some(subject),
        Ok(_) => None,
        Err(e) => {
            warn!("Failed to decode subject {raw:?}: {e}");
            None
        }
    }
}

fn original_headers(headers: &HeaderMap) -> OriginalHeaders {
    let copy = |name: &str| headers.get(name).map(str::to_string);
    OriginalHeaders {
        date: copy("Date"),
        from: copy("From"),
        to: copy("To"),
        cc: copy("Cc"),
        bcc: copy("Bcc"),
        message_id: copy("Message-ID"),
    }
}

/// Decodes every named `audio/x-wav` part sent as Base64.
fn extract_attachments(parts: &BodyParts) -> Result<Vec<Attachment>, AssembleError> {
    let mut attachments = Vec::new();
    for (index, part) in parts.iter() {
        let Some(content_type) = part.content_type().filter(|ct| is_audio_wav(ct)) else {
            continue;
        };
        if part.transfer_encoding() != Some(BASE64) || !part.has_body() {
            debug!(index, "skipping audio part without base64 body");
            continue;
        }
        let Some(filename) = wav_filename(content_type) else {
            warn!(index, "Skipping audio part without a file name: {content_type}");
            continue;
        };

        let data = decode_base64_lines(&part.lines).map_err(|source| {
            AssembleError::BadAttachmentEncoding {
                filename: filename.to_string(),
                source,
            }
        })?;
        debug!(index, filename, bytes = data.len(), "decoded attachment");
        attachments.push(Attachment::new(filename, data));
    }
    Ok(attachments)
}
