//! F4T line-protocol encoder/decoder.
//!
//! The F4T command port speaks a SCPI-like ASCII protocol: each command is
//! a colon-delimited hierarchical path, optionally followed by a single
//! space-separated argument, terminated with a newline. Queries carry a
//! `?` suffix on the path. Responses are single newline-terminated text
//! lines (numeric replies as plain decimal, boolean-style replies as the
//! literal tokens `ON`/`OFF`).
//!
//! # Command format
//!
//! ```text
//! <path>[ <arg>]\n
//! ```
//!
//! Examples:
//!
//! ```text
//! *IDN?
//! :UNIT:TEMP?
//! :SOURCE:CLOOP1:SPOINT 25.0
//! :PROGRAM:SELECTED:STATE START
//! ```
//!
//! The device never sends unsolicited messages; every response line is the
//! answer to the most recent query on the connection.

use bytes::{BufMut, BytesMut};

/// Line terminator for commands and responses.
pub const TERMINATOR: u8 = b'\n';

/// Result of attempting to decode one response line from a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeResult {
    /// A complete line was decoded.
    Line {
        /// The response text with the terminator and any trailing
        /// whitespace (including `\r`) stripped.
        text: String,
        /// Number of bytes consumed from the input buffer (including the
        /// terminator).
        consumed: usize,
    },

    /// A terminator was seen but the bytes before it are not valid ASCII
    /// text. The `usize` is the number of bytes to discard.
    Malformed(usize),

    /// The buffer does not yet contain a complete line. More data is needed.
    Incomplete,
}

/// Encode a command into raw bytes ready for transmission.
///
/// Concatenates the command path, a single space plus the argument when
/// one is given, and the newline terminator.
///
/// # Example
///
/// ```
/// use chamberlib_watlow::protocol::encode_command;
///
/// assert_eq!(encode_command(":UNIT:TEMP?", ""), b":UNIT:TEMP?\n");
/// assert_eq!(
///     encode_command(":SOURCE:CLOOP1:SPOINT", "25.0"),
///     b":SOURCE:CLOOP1:SPOINT 25.0\n"
/// );
/// ```
pub fn encode_command(path: &str, arg: &str) -> Vec<u8> {
    let capacity = path.len() + arg.len() + 2;
    let mut buf = BytesMut::with_capacity(capacity);
    buf.put_slice(path.as_bytes());
    if !arg.is_empty() {
        buf.put_u8(b' ');
        buf.put_slice(arg.as_bytes());
    }
    buf.put_u8(TERMINATOR);
    buf.to_vec()
}

/// Attempt to decode one response line from a byte buffer.
///
/// Scans `buf` for a newline terminator. Returns [`DecodeResult::Line`]
/// with the decoded text and the number of bytes consumed,
/// [`DecodeResult::Malformed`] if the line is not valid text, or
/// [`DecodeResult::Incomplete`] if no terminator is present yet.
///
/// Trailing whitespace is stripped from the decoded text, so controllers
/// that terminate with `\r\n` decode identically to those using bare `\n`.
pub fn decode_line(buf: &[u8]) -> DecodeResult {
    if buf.is_empty() {
        return DecodeResult::Incomplete;
    }

    let term_pos = match buf.iter().position(|&b| b == TERMINATOR) {
        Some(pos) => pos,
        None => return DecodeResult::Incomplete,
    };

    let consumed = term_pos + 1;
    let body = &buf[..term_pos];

    match std::str::from_utf8(body) {
        Ok(s) => DecodeResult::Line {
            text: s.trim_end().to_string(),
            consumed,
        },
        Err(_) => DecodeResult::Malformed(consumed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // Command encoding
    // ---------------------------------------------------------------

    #[test]
    fn encode_query_has_no_argument_space() {
        assert_eq!(encode_command("*IDN?", ""), b"*IDN?\n");
        assert_eq!(
            encode_command(":SOURCE:CLOOP1:PVALUE?", ""),
            b":SOURCE:CLOOP1:PVALUE?\n"
        );
    }

    #[test]
    fn encode_set_joins_path_and_argument() {
        assert_eq!(
            encode_command(":SOURCE:CLOOP1:SPOINT", "25.0"),
            b":SOURCE:CLOOP1:SPOINT 25.0\n"
        );
        assert_eq!(encode_command(":UNIT:TEMP", "C"), b":UNIT:TEMP C\n");
    }

    #[test]
    fn encode_keyword_argument() {
        assert_eq!(
            encode_command(":PROGRAM:SELECTED:STATE", "START"),
            b":PROGRAM:SELECTED:STATE START\n"
        );
    }

    // ---------------------------------------------------------------
    // Line decoding
    // ---------------------------------------------------------------

    #[test]
    fn decode_empty_buffer() {
        assert_eq!(decode_line(b""), DecodeResult::Incomplete);
    }

    #[test]
    fn decode_no_terminator() {
        assert_eq!(decode_line(b"24.9"), DecodeResult::Incomplete);
    }

    #[test]
    fn decode_simple_line() {
        assert_eq!(
            decode_line(b"24.97\n"),
            DecodeResult::Line {
                text: "24.97".into(),
                consumed: 6,
            }
        );
    }

    #[test]
    fn decode_strips_carriage_return() {
        assert_eq!(
            decode_line(b"ON\r\n"),
            DecodeResult::Line {
                text: "ON".into(),
                consumed: 4,
            }
        );
    }

    #[test]
    fn decode_strips_trailing_spaces() {
        assert_eq!(
            decode_line(b"C  \n"),
            DecodeResult::Line {
                text: "C".into(),
                consumed: 4,
            }
        );
    }

    #[test]
    fn decode_empty_line_is_empty_text() {
        assert_eq!(
            decode_line(b"\n"),
            DecodeResult::Line {
                text: "".into(),
                consumed: 1,
            }
        );
    }

    #[test]
    fn decode_non_utf8_is_malformed() {
        let buf = [0xFF, 0xFE, b'\n'];
        assert_eq!(decode_line(&buf), DecodeResult::Malformed(3));
    }

    #[test]
    fn decode_first_of_multiple_lines() {
        // Only the first line is returned; `consumed` lets the caller
        // decide what to do with the rest.
        assert_eq!(
            decode_line(b"ON\nOFF\n"),
            DecodeResult::Line {
                text: "ON".into(),
                consumed: 3,
            }
        );
    }

    #[test]
    fn decode_complete_plus_incomplete() {
        assert_eq!(
            decode_line(b"25.0\n-39."),
            DecodeResult::Line {
                text: "25.0".into(),
                consumed: 5,
            }
        );
    }

    // ---------------------------------------------------------------
    // Round trip: a command echoed back decodes to its own text
    // ---------------------------------------------------------------

    #[test]
    fn round_trip_query() {
        let cmd = encode_command(":KEY1?", "");
        match decode_line(&cmd) {
            DecodeResult::Line { text, .. } => assert_eq!(text, ":KEY1?"),
            other => panic!("expected Line, got {other:?}"),
        }
    }
}
