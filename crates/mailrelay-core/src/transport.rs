//! Hand-off to the mail submission service.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::config::{Config, ServerAddress};
use crate::message::{Attachment, OutgoingMessage};

/// Errors that can occur while submitting a message.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The submission could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The service refused the message.
    #[error("Submission rejected: {0}")]
    Rejected(String),
}

/// A mail submission service.
///
/// Implementations own the session with the remote service: they
/// authenticate, create a draft from the message, attach the attachments and
/// send it. The message and attachments are moved in; nothing is retried by
/// the caller.
pub trait Transport {
    /// Submits one message with its attachments.
    ///
    /// # Errors
    ///
    /// Returns an error if the message could not be submitted.
    fn submit(
        &mut self,
        message: OutgoingMessage,
        attachments: Vec<Attachment>,
    ) -> Result<(), TransportError>;
}

/// One submission as written by [`SpoolTransport`].
#[derive(Debug, Serialize)]
struct Submission<'a> {
    server: &'a ServerAddress,
    username: &'a str,
    message: &'a OutgoingMessage,
    attachments: &'a [Attachment],
}

/// Writes each submission as a JSON document for a separate sender to pick
/// up.
///
/// The document carries the target server and user name but never the
/// password.
#[derive(Debug)]
pub struct SpoolTransport<W> {
    writer: W,
    server: ServerAddress,
    username: String,
}

impl<W: Write> SpoolTransport<W> {
    /// Creates a spool writing to `writer` for the account in `config`.
    #[must_use]
    pub fn new(writer: W, config: &Config) -> Self {
        Self {
            writer,
            server: config.server.clone(),
            username: config.username.clone(),
        }
    }

    /// Consumes the spool and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for SpoolTransport<W> {
    fn submit(
        &mut self,
        message: OutgoingMessage,
        attachments: Vec<Attachment>,
    ) -> Result<(), TransportError> {
        if message.all_recipients().is_empty() {
            return Err(TransportError::Rejected("No recipients specified".into()));
        }

        let submission = Submission {
            server: &self.server,
            username: &self.username,
            message: &message,
            attachments: &attachments,
        };
        serde_json::to_writer_pretty(&mut self.writer, &submission)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        info!(
            subject = %message.subject,
            attachments = attachments.len(),
            "message spooled"
        );
        Ok(())
    }
}
