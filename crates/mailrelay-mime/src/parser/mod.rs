//! Single-pass message parser.
//!
//! The parser is a line-driven state machine:
//!
//! ```text
//! Header ──2nd blank──▶ BodyBeforeBoundary ──--X──▶ PartHeader ──blank──▶ PartBody
//!                                                       ▲                    │
//!                                                       └────────--X─────────┘
//! any body state ──--X--──▶ Done
//! ```
//!
//! Lines that fit no rule in the current state are ignored.

pub mod rules;

use crate::content_type::multipart_boundary;
use crate::error::ParseError;
use crate::header::HeaderMap;
use crate::part::BodyParts;
use rules::{header_field, is_close_delimiter, is_delimiter, starts_with_word_char};
use tracing::{debug, trace};

/// Where the parser is within the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Reading the top-level header block.
    #[default]
    Header,
    /// After the header block, before the first delimiter.
    ///
    /// Lines here are collected into part 0 the same way a part's own
    /// header block and body are.
    BodyBeforeBoundary,
    /// Reading the header block of the part at `index`.
    PartHeader {
        /// Part index.
        index: usize,
    },
    /// Reading the raw body lines of the part at `index`.
    PartBody {
        /// Part index.
        index: usize,
    },
    /// The close delimiter was seen; further input is discarded.
    Done,
}

impl State {
    /// Returns `true` once the header block has ended.
    #[must_use]
    pub const fn in_body(self) -> bool {
        !matches!(self, Self::Header)
    }
}

/// Incremental message parser.
///
/// Feed lines with [`Parser::feed_line`] and collect the result with
/// [`Parser::finish`]. Use [`parse`] for a complete message.
#[derive(Debug, Default)]
pub struct Parser {
    state: State,
    headers: HeaderMap,
    parts: BodyParts,
    boundary: Option<String>,
    active_header: Option<String>,
    blank_run: usize,
    line_no: usize,
    part_count: usize,
}

impl Parser {
    /// Creates a parser positioned at the start of a message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Returns the boundary, once the header block has ended.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.boundary.as_deref()
    }

    /// Processes one line, without its line terminator.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] on any fatal condition; the parser must not
    /// be fed further after an error.
    pub fn feed_line(&mut self, line: &str) -> Result<State, ParseError> {
        self.line_no += 1;
        self.state = match self.state {
            State::Header => self.header_line(line)?,
            State::Done => State::Done,
            state => self.body_line(state, line)?,
        };
        Ok(self.state)
    }

    /// Consumes the parser and returns what it collected.
    #[must_use]
    pub fn finish(self) -> (HeaderMap, BodyParts) {
        (self.headers, self.parts)
    }

    fn header_line(&mut self, line: &str) -> Result<State, ParseError> {
        if line.is_empty() {
            self.blank_run += 1;
            if self.blank_run == 2 {
                return self.end_of_headers();
            }
            return Ok(State::Header);
        }
        self.blank_run = 0;

        if starts_with_word_char(line) {
            if let Some((name, value)) = header_field(line) {
                self.headers.insert(name, value);
                self.active_header = Some(name.to_string());
            } else {
                trace!(line = self.line_no, "ignoring non-header line in header block");
            }
            return Ok(State::Header);
        }

        let name = self
            .active_header
            .as_deref()
            .ok_or(ParseError::OrphanContinuation { line: self.line_no })?;
        self.headers.append(name, line.trim());
        Ok(State::Header)
    }

    fn end_of_headers(&mut self) -> Result<State, ParseError> {
        let boundary = self
            .headers
            .get("Content-Type")
            .and_then(multipart_boundary)
            .ok_or(ParseError::MissingOrBadContentType)?;
        debug!(boundary, headers = self.headers.len(), "header block complete");
        self.boundary = Some(boundary.to_string());
        Ok(State::BodyBeforeBoundary)
    }

    fn body_line(&mut self, state: State, line: &str) -> Result<State, ParseError> {
        let boundary = self
            .boundary
            .as_deref()
            .ok_or(ParseError::BoundaryUndefined)?;

        if is_close_delimiter(line, boundary) {
            debug!(line = self.line_no, parts = self.part_count, "close delimiter reached");
            return Ok(State::Done);
        }

        if is_delimiter(line, boundary) {
            self.part_count += 1;
            let index = self.part_count;
            self.parts.entry(index);
            trace!(index, "starting body part");
            return Ok(State::PartHeader { index });
        }

        let next = match state {
            State::BodyBeforeBoundary => match self.part_header_line(0, line) {
                State::PartHeader { .. } => State::BodyBeforeBoundary,
                other => other,
            },
            State::PartHeader { index } => self.part_header_line(index, line),
            State::PartBody { index } => {
                self.parts.entry(index).lines.push(line.to_string());
                State::PartBody { index }
            }
            State::Header | State::Done => state,
        };
        Ok(next)
    }

    fn part_header_line(&mut self, index: usize, line: &str) -> State {
        let part = self.parts.entry(index);
        if let Some((name, value)) = header_field(line) {
            part.headers.insert(name, value);
        } else if line.is_empty() {
            return State::PartBody { index };
        } else {
            trace!(index, line = self.line_no, "ignoring non-header line in part header");
        }
        State::PartHeader { index }
    }
}

/// Parses a complete raw message.
///
/// The text is split on line feeds, a final line feed terminating the last
/// line rather than starting an empty one. One trailing carriage return per
/// line is dropped. Input that ends before the close delimiter is not an
/// error.
///
/// # Errors
///
/// Returns [`ParseError::MissingOrBadContentType`] if the header block ends
/// without a `multipart/mixed; boundary="..."` content type, and
/// [`ParseError::OrphanContinuation`] if a continuation line precedes every
/// header.
pub fn parse(raw: &str) -> Result<(HeaderMap, BodyParts), ParseError> {
    let mut parser = Parser::new();
    let text = raw.strip_suffix('\n').unwrap_or(raw);
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if parser.feed_line(line)? == State::Done {
            break;
        }
    }
    let (headers, parts) = parser.finish();
    debug!(headers = headers.len(), parts = parts.len(), "message parsed");
    Ok((headers, parts))
}
