//! End-to-end relay of one raw message.

use tracing::{debug, info};

use crate::assemble::assemble;
use crate::error::Result;
use crate::message::{Attachment, OutgoingMessage};
use crate::transport::Transport;

/// Parses and assembles one raw message.
///
/// All intermediate state belongs to this call; nothing is shared between
/// messages.
///
/// # Errors
///
/// Returns an error if parsing or assembly fails.
pub fn prepare(raw: &str) -> Result<(OutgoingMessage, Vec<Attachment>)> {
    let (headers, parts) = mailrelay_mime::parse(raw)?;
    debug!(headers = headers.len(), parts = parts.len(), "parsed message");
    Ok(assemble(&headers, &parts)?)
}

/// Parses, assembles and submits one raw message.
///
/// Nothing reaches the transport unless parsing and assembly both succeed.
///
/// # Errors
///
/// Returns an error if any stage fails.
pub fn relay(raw: &str, transport: &mut impl Transport) -> Result<()> {
    let (message, attachments) = prepare(raw)?;
    info!(subject = %message.subject, "submitting message");
    transport.submit(message, attachments)?;
    Ok(())
}
