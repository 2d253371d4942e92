//! Content-Type and Content-Transfer-Encoding matching.
//!
//! The gateway emits a fixed set of content types, so these are matched as
//! literal prefixes rather than parsed into type/subtype/parameters.

/// Content type prefix of the plain-text body part.
pub const TEXT_PLAIN: &str = "text/plain;";

/// Content type prefix of the voicemail audio part.
pub const AUDIO_WAV: &str = "audio/x-wav;";

/// Transfer encoding of the plain-text body part.
pub const EIGHT_BIT: &str = "8bit";

/// Transfer encoding of the voicemail audio part.
pub const BASE64: &str = "base64";

/// Extracts the boundary from a `multipart/mixed; boundary="X"` value.
///
/// The value must be exactly of that form: the boundary runs from the first
/// quote up to the closing quote that ends the value.
#[must_use]
pub fn multipart_boundary(content_type: &str) -> Option<&str> {
    content_type
        .strip_prefix("multipart/mixed; boundary=\"")?
        .strip_suffix('"')
}

/// Returns `true` for a `text/plain;` content type.
#[must_use]
pub fn is_text_plain(content_type: &str) -> bool {
    content_type.starts_with(TEXT_PLAIN)
}

/// Returns `true` for an `audio/x-wav;` content type.
#[must_use]
pub fn is_audio_wav(content_type: &str) -> bool {
    content_type.starts_with(AUDIO_WAV)
}

/// Extracts the file name from `audio/x-wav; name="FILENAME"`.
///
/// Any amount of whitespace may follow the semicolon.
#[must_use]
pub fn wav_filename(content_type: &str) -> Option<&str> {
    content_type
        .strip_prefix(AUDIO_WAV)?
        .trim_start()
        .strip_prefix("name=\"")?
        .strip_suffix('"')
}
