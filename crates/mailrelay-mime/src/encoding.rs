//! MIME decoding utilities.
//!
//! Supports Base64 payloads and RFC 2047 encoded-words in header values.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Encodes data as Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Decodes Base64 data split over several lines.
///
/// ASCII whitespace anywhere in the input is ignored.
///
/// # Errors
///
/// Returns an error if the remaining characters are not valid Base64.
pub fn decode_base64_lines<S: AsRef<str>>(lines: &[S]) -> Result<Vec<u8>> {
    let cleaned: String = lines
        .iter()
        .flat_map(|line| line.as_ref().chars())
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    decode_base64(&cleaned)
}

/// Decodes the `Q` encoding of an RFC 2047 encoded-word into bytes.
fn decode_q(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'_' => result.push(b' '),
            b'=' => {
                let hex = text.get(i + 1..i + 3).ok_or_else(|| {
                    Error::InvalidEncoding("Incomplete escape sequence".to_string())
                })?;
                let byte = u8::from_str_radix(hex, 16)
                    .map_err(|e| Error::InvalidEncoding(format!("Invalid hex: {e}")))?;
                result.push(byte);
                i += 2;
            }
            other => result.push(other),
        }
        i += 1;
    }

    Ok(result)
}

/// Recognizes an encoded-word at the start of `text`.
///
/// Returns the length of the word and its decoded payload, or `None` if
/// `text` does not start with `=?charset?B|Q?encoded-text?=`.
fn encoded_word(text: &str) -> Option<(usize, Result<Vec<u8>>)> {
    let inner = text.strip_prefix("=?")?;
    let charset_len = inner.find('?')?;
    if inner[..charset_len].contains(char::is_whitespace) {
        return None;
    }

    let after_charset = &inner[charset_len + 1..];
    let encoding = after_charset.chars().next()?;
    let payload = after_charset[encoding.len_utf8()..].strip_prefix('?')?;
    let payload_len = payload.find("?=")?;
    let payload = &payload[..payload_len];
    if payload.contains(char::is_whitespace) {
        return None;
    }

    let decoded = match encoding {
        'B' | 'b' => decode_base64(payload),
        'Q' | 'q' => decode_q(payload),
        _ => return None,
    };
    let word_len = 2 + charset_len + 1 + encoding.len_utf8() + 1 + payload_len + 2;
    Some((word_len, decoded))
}

/// Decodes RFC 2047 encoded-words in a header value.
///
/// Runs a single decode pass: every `=?charset?encoding?encoded-text?=`
/// word is decoded wherever it appears, whitespace between two adjacent
/// encoded-words is dropped, and everything else is kept as is. Decoded
/// bytes are read as UTF-8 whatever the declared charset.
///
/// # Errors
///
/// Returns an error if an encoded-word has an invalid payload or the result
/// is not UTF-8.
pub fn decode_rfc2047(text: &str) -> Result<String> {
    let mut result: Vec<u8> = Vec::with_capacity(text.len());
    let mut previous_was_encoded = false;
    let mut rest = text;

    while let Some(start) = rest.find("=?") {
        let Some((word_len, decoded)) = encoded_word(&rest[start..]) else {
            result.extend_from_slice(rest[..start + 2].as_bytes());
            rest = &rest[start + 2..];
            previous_was_encoded = false;
            continue;
        };

        let between = &rest[..start];
        if !(previous_was_encoded && between.trim().is_empty()) {
            result.extend_from_slice(between.as_bytes());
        }
        result.extend_from_slice(&decoded?);
        rest = &rest[start + word_len..];
        previous_was_encoded = true;
    }
    result.extend_from_slice(rest.as_bytes());

    String::from_utf8(result).map_err(Into::into)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::needless_collect)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_encode_decode() {
        let data = b"Hello, World!";
        let encoded = encode_base64(data);
        assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");

        let decoded = decode_base64(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_base64_lines_ignore_whitespace() {
        let lines = ["SGVsbG8s", " IFdvcmxk\r", "IQ=="];
        assert_eq!(decode_base64_lines(&lines).unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_base64_lines_invalid() {
        let lines = ["SGVsbG8*"];
        assert!(matches!(
            decode_base64_lines(&lines),
            Err(Error::Base64Decode(_))
        ));
    }

    #[test]
    fn test_rfc2047_plain_passthrough() {
        assert_eq!(decode_rfc2047("Hello").unwrap(), "Hello");
        assert_eq!(
            decode_rfc2047("New voicemail  from 100").unwrap(),
            "New voicemail  from 100"
        );
    }

    #[test]
    fn test_rfc2047_decode() {
        let decoded = decode_rfc2047("=?utf-8?B?SMOpbGxv?=").unwrap();
        assert_eq!(decoded, "Héllo");
    }

    #[test]
    fn test_rfc2047_quoted_printable() {
        let decoded = decode_rfc2047("=?utf-8?Q?H=C3=A9llo_there?=").unwrap();
        assert_eq!(decoded, "Héllo there");
    }

    #[test]
    fn test_rfc2047_adjacent_words_joined() {
        let decoded = decode_rfc2047("=?utf-8?Q?New_?= =?utf-8?B?dm9pY2VtYWls?=").unwrap();
        assert_eq!(decoded, "New voicemail");
    }

    #[test]
    fn test_rfc2047_mixed_with_plain_text() {
        let decoded = decode_rfc2047("[PBX] =?utf-8?Q?Nachricht_f=C3=BCr?= 200").unwrap();
        assert_eq!(decoded, "[PBX] Nachricht für 200");
    }

    #[test]
    fn test_rfc2047_folded_words_without_space() {
        let decoded =
            decode_rfc2047("=?utf-8?Q?New_message_from_?==?utf-8?Q?John_Doe?=").unwrap();
        assert_eq!(decoded, "New message from John Doe");
    }

    #[test]
    fn test_rfc2047_not_an_encoded_word() {
        assert_eq!(decode_rfc2047("=?utf-8?X?abc?=").unwrap(), "=?utf-8?X?abc?=");
        assert_eq!(decode_rfc2047("a =? b").unwrap(), "a =? b");
    }

    #[test]
    fn test_rfc2047_invalid_payload() {
        assert!(matches!(
            decode_rfc2047("=?utf-8?B?****?="),
            Err(Error::Base64Decode(_))
        ));
        assert!(matches!(
            decode_rfc2047("=?utf-8?Q?bad=Z?="),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_rfc2047_invalid_utf8() {
        assert!(matches!(
            decode_rfc2047("=?iso-8859-1?Q?caf=E9?="),
            Err(Error::Utf8Decode(_))
        ));
    }
}
