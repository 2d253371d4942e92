//! Integration tests for the message parser.
//!
//! Messages here follow the layout produced by the PBX voicemail gateway.

use mailrelay_mime::encoding::decode_base64_lines;
use mailrelay_mime::{BodyParts, HeaderMap, ParseError, parse};
use proptest::prelude::*;

const VOICEMAIL: &str = concat!(
    "Date: Mon, 6 Oct 2014 10:15:42 -0400\n",
    "From: \"PBX Voicemail\" <voicemail@pbx.example.com>\n",
    "To: alice@example.com;bob@example.com\n",
    "Subject: =?utf-8?Q?New_message_from_?=\n",
    " =?utf-8?Q?John_Doe?=\n",
    "Message-ID: <Asterisk-1-1234567890@pbx>\n",
    "X-Asterisk-CallerID: 5551234\n",
    "X-Asterisk-CallerIDName: John Doe\n",
    "MIME-Version: 1.0\n",
    "Content-Type: multipart/mixed; boundary=\"----voicemail_1234\"\n",
    "\n",
    "\n",
    "------voicemail_1234\n",
    "Content-Type: text/plain; charset=ISO-8859-1\n",
    "Content-Transfer-Encoding: 8bit\n",
    "\n",
    "Dear Alice:\n",
    "\n",
    "\tJust wanted to let you know you were just left a 0:05 long message.\n",
    "------voicemail_1234\n",
    "Content-Type: audio/x-wav; name=\"msg0001.wav\"\n",
    "Content-Transfer-Encoding: base64\n",
    "Content-Description: Voicemail sound attachment.\n",
    "Content-Disposition: attachment; filename=\"msg0001.wav\"\n",
    "\n",
    "UklGRiQAAABXQVZF\n",
    "Zm10IBAAAAABAAEA\n",
    "\n",
    "------voicemail_1234--\n",
);

#[test]
fn test_voicemail_headers() {
    let (headers, _) = parse(VOICEMAIL).unwrap();
    assert_eq!(
        headers.get("Subject"),
        Some("=?utf-8?Q?New_message_from_?==?utf-8?Q?John_Doe?=")
    );
    assert_eq!(headers.get("To"), Some("alice@example.com;bob@example.com"));
    assert_eq!(headers.get("X-Asterisk-CallerIDName"), Some("John Doe"));
    assert_eq!(headers.len(), 9);
}

#[test]
fn test_voicemail_parts() {
    let (_, parts) = parse(VOICEMAIL).unwrap();
    assert_eq!(parts.len(), 2);
    assert!(parts.get(0).is_none());

    let text = parts.get(1).unwrap();
    assert_eq!(text.lines.len(), 3);
    assert_eq!(text.lines[0], "Dear Alice:");
    assert_eq!(text.lines[1], "");

    let audio = parts.get(2).unwrap();
    assert_eq!(audio.headers.len(), 4);
    assert_eq!(audio.lines, vec!["UklGRiQAAABXQVZF", "Zm10IBAAAAABAAEA", ""]);
    let wav = decode_base64_lines(&audio.lines).unwrap();
    assert_eq!(&wav[..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
}

#[test]
fn test_parse_is_deterministic() {
    assert_eq!(parse(VOICEMAIL).unwrap(), parse(VOICEMAIL).unwrap());
}

#[test]
fn test_missing_content_type_with_otherwise_valid_message() {
    let raw = VOICEMAIL.replace(
        "Content-Type: multipart/mixed; boundary=\"----voicemail_1234\"\n",
        "",
    );
    assert_eq!(parse(&raw), Err(ParseError::MissingOrBadContentType));
}

#[test]
fn test_message_starting_with_fold() {
    assert_eq!(
        parse(" Subject: x\n"),
        Err(ParseError::OrphanContinuation { line: 1 })
    );
}

fn header_map(fields: Vec<(String, String)>, boundary: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in fields {
        headers.insert(name, value);
    }
    headers.insert(
        "Content-Type",
        format!("multipart/mixed; boundary=\"{boundary}\""),
    );
    headers
}

fn body_parts(parts: Vec<(Vec<(String, String)>, Vec<String>)>) -> BodyParts {
    let mut body = BodyParts::new();
    for (i, (fields, lines)) in parts.into_iter().enumerate() {
        let part = body.entry(i + 1);
        for (name, value) in fields {
            part.headers.insert(name, value);
        }
        part.lines = lines;
    }
    body
}

fn field() -> impl Strategy<Value = (String, String)> {
    ("[A-Za-z][A-Za-z0-9-]{0,12}", "[ -~]{0,24}")
}

fn part() -> impl Strategy<Value = (Vec<(String, String)>, Vec<String>)> {
    (
        prop::collection::vec(field(), 0..4),
        prop::collection::vec("[A-Za-z0-9 .,:;=/]{0,30}", 0..6),
    )
}

proptest! {
    #[test]
    fn test_reserialization_reparses_to_same_structure(
        boundary in "[A-Za-z0-9_]{1,16}",
        fields in prop::collection::vec(field(), 0..8),
        parts in prop::collection::vec(part(), 0..4),
    ) {
        let headers = header_map(fields, &boundary);
        let parts = body_parts(parts);

        let raw = format!("{headers}\n\n{}", parts.to_multipart(&boundary));
        let (reparsed_headers, reparsed_parts) = parse(&raw).unwrap();

        prop_assert_eq!(reparsed_headers, headers);
        prop_assert_eq!(reparsed_parts, parts);
    }
}
