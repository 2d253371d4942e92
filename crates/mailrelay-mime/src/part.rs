//! Body parts of a multipart message.

use crate::header::HeaderMap;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// One part of a `multipart/mixed` body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyPart {
    /// Part-local headers.
    pub headers: HeaderMap,
    /// Raw body lines, not decoded.
    pub lines: Vec<String>,
}

impl BodyPart {
    /// Creates an empty part.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the part's `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("Content-Type")
    }

    /// Gets the part's `Content-Transfer-Encoding` header.
    #[must_use]
    pub fn transfer_encoding(&self) -> Option<&str> {
        self.headers.get("Content-Transfer-Encoding")
    }

    /// Returns `true` if the part has at least one body line.
    #[must_use]
    pub fn has_body(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Concatenates the raw body lines with no separator.
    #[must_use]
    pub fn joined_body(&self) -> String {
        self.lines.concat()
    }
}

/// Body parts keyed by their sequence index.
///
/// Index 0 holds text found before the first boundary; real parts are
/// numbered from 1 in the order their delimiters appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyParts {
    parts: BTreeMap<usize, BodyPart>,
}

impl BodyParts {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the part at `index`, creating an empty one if absent.
    pub fn entry(&mut self, index: usize) -> &mut BodyPart {
        self.parts.entry(index).or_default()
    }

    /// Gets the part at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BodyPart> {
        self.parts.get(&index)
    }

    /// Returns the number of parts, including index 0 when present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if there are no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterates over parts in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BodyPart)> {
        self.parts.iter().map(|(index, part)| (*index, part))
    }

    /// Renders the parts back into a multipart body delimited by `boundary`.
    ///
    /// Each part is written as its header lines, a blank line, and its body
    /// lines. Part 0, if any, precedes the first delimiter. The output ends
    /// with the close delimiter.
    #[must_use]
    pub fn to_multipart(&self, boundary: &str) -> String {
        let mut out = String::new();
        for (index, part) in &self.parts {
            if *index > 0 {
                let _ = writeln!(out, "--{boundary}");
            }
            let _ = write!(out, "{}", part.headers);
            out.push('\n');
            for line in &part.lines {
                let _ = writeln!(out, "{line}");
            }
        }
        let _ = writeln!(out, "--{boundary}--");
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::needless_collect)]
mod tests {
    use super::*;

    #[test]
    fn test_part_accessors() {
        let mut part = BodyPart::new();
        part.headers.insert("Content-Type", "text/plain; charset=utf-8");
        part.headers.insert("Content-Transfer-Encoding", "8bit");
        part.lines = vec!["Hello, ".to_string(), "World!".to_string()];

        assert_eq!(part.content_type(), Some("text/plain; charset=utf-8"));
        assert_eq!(part.transfer_encoding(), Some("8bit"));
        assert!(part.has_body());
        assert_eq!(part.joined_body(), "Hello, World!");
    }

    #[test]
    fn test_parts_entry_creates_once() {
        let mut parts = BodyParts::new();
        parts.entry(1).lines.push("a".to_string());
        parts.entry(1).lines.push("b".to_string());
        parts.entry(2);

        assert_eq!(parts.len(), 2);
        assert_eq!(parts.get(1).unwrap().lines, vec!["a", "b"]);
        assert!(parts.get(3).is_none());
    }

    #[test]
    fn test_parts_iterate_in_index_order() {
        let mut parts = BodyParts::new();
        parts.entry(2);
        parts.entry(0);
        parts.entry(1);

        let order: Vec<usize> = parts.iter().map(|(i, _)| i).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_to_multipart() {
        let mut parts = BodyParts::new();
        let part = parts.entry(1);
        part.headers.insert("Content-Type", "text/plain; charset=utf-8");
        part.lines.push("Hi".to_string());

        assert_eq!(
            parts.to_multipart("XYZ"),
            "--XYZ\nContent-Type: text/plain; charset=utf-8\n\nHi\n--XYZ--\n"
        );
    }
}
