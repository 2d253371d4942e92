//! Line classification rules.
//!
//! Each rule looks at a single line in isolation; the state machine in the
//! parent module decides which rules apply in which state.

/// Returns `true` if the line starts with a word character.
///
/// Word characters are alphanumerics (any script) and `_`.
#[must_use]
pub fn starts_with_word_char(line: &str) -> bool {
    line.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// Splits a `NAME: VALUE` line.
///
/// `NAME` is one or more ASCII letters, digits or hyphens. It must be
/// followed by a colon and exactly one whitespace character; the rest of the
/// line, untrimmed, is the value.
#[must_use]
pub fn header_field(line: &str) -> Option<(&str, &str)> {
    let name_len = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(line.len());
    if name_len == 0 {
        return None;
    }

    let (name, rest) = line.split_at(name_len);
    let mut after_colon = rest.strip_prefix(':')?.chars();
    if !after_colon.next()?.is_whitespace() {
        return None;
    }
    Some((name, after_colon.as_str()))
}

/// Returns `true` if the line is the part delimiter `--boundary`.
#[must_use]
pub fn is_delimiter(line: &str, boundary: &str) -> bool {
    line.strip_prefix("--") == Some(boundary)
}

/// Returns `true` if the line is the close delimiter `--boundary--`.
#[must_use]
pub fn is_close_delimiter(line: &str, boundary: &str) -> bool {
    line.strip_prefix("--")
        .and_then(|rest| rest.strip_suffix("--"))
        == Some(boundary)
}
