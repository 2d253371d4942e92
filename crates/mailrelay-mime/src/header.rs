//! Header map handling.

use std::fmt;

/// Ordered collection of header fields.
///
/// Names are kept exactly as received and compared case-sensitively. Each
/// name holds a single value: storing a name again replaces the value but
/// keeps the position where the name was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    fields: Vec<(String, String)>,
}

impl HeaderMap {
    /// Creates a new empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header value, replacing any existing value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Appends text to the value of an existing header.
    ///
    /// Returns `false` if the header is not present.
    pub fn append(&mut self, name: &str, text: &str) -> bool {
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, value)) => {
                value.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Gets the value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if the header is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of distinct header names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no headers are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns an iterator over all headers in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl fmt::Display for HeaderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.fields {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::needless_collect)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_new() {
        let headers = HeaderMap::new();
        assert!(headers.is_empty());
        assert_eq!(headers.len(), 0);
    }

    #[test]
    fn test_headers_insert_get() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", "text/plain");
        assert_eq!(headers.get("Content-Type"), Some("text/plain"));
        // Case sensitive
        assert_eq!(headers.get("content-type"), None);
    }

    #[test]
    fn test_headers_insert_replaces_in_place() {
        let mut headers = HeaderMap::new();
        headers.insert("To", "alice@example.com");
        headers.insert("From", "bob@example.com");
        headers.insert("To", "charlie@example.com");

        let names: Vec<&str> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["To", "From"]);
        assert_eq!(headers.get("To"), Some("charlie@example.com"));
    }

    #[test]
    fn test_headers_append() {
        let mut headers = HeaderMap::new();
        headers.insert("Subject", "Hello");
        assert!(headers.append("Subject", "World"));
        assert_eq!(headers.get("Subject"), Some("HelloWorld"));
        assert!(!headers.append("Date", "x"));
    }

    #[test]
    fn test_headers_display() {
        let mut headers = HeaderMap::new();
        headers.insert("From", "sender@example.com");
        headers.insert("To", "recipient@example.com");

        assert_eq!(
            headers.to_string(),
            "From: sender@example.com\nTo: recipient@example.com\n"
        );
    }
}
