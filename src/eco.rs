//! Streaming character-level state machine (ECO).
//!
//! Defines the canonical output: the scalar byte-by-byte machine in
//! [`ScalarState`] is the ground truth every other back end (SPORT's
//! fallback path, TURBO's per-chunk output, the chunk splitter's safe-point
//! search) must agree with byte-for-byte.

use std::io::{Read, Write};

use crate::error::Result;

/// Fixed I/O buffer size used by the streaming machine.
pub const BUFFER_SIZE: usize = 64 * 1024;

/// The three-field tokenizer state carried across the whole input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScalarState {
    pub in_string: bool,
    pub escape_pending: bool,
    pub depth: i32,
}

impl ScalarState {
    pub const fn new() -> Self {
        Self {
            in_string: false,
            escape_pending: false,
            depth: 0,
        }
    }

    /// Advance the state machine by one input byte, appending significant
    /// bytes to `out`. This is the character machine reused verbatim by
    /// SPORT's scalar fallback and by the chunk splitter.
    #[inline]
    pub fn step(&mut self, c: u8, out: &mut Vec<u8>) {
        if let Some(b) = self.step_byte(c) {
            out.push(b);
        }
    }

    /// Same transition as [`Self::step`], but returns the significant byte
    /// (if any) instead of pushing to a `Vec`. SPORT's scalar fallback
    /// writes this straight into a caller-owned output slice.
    #[inline]
    pub fn step_byte(&mut self, c: u8) -> Option<u8> {
        if self.escape_pending {
            self.escape_pending = false;
            return Some(c);
        }
        if self.in_string {
            return match c {
                b'\\' => {
                    self.escape_pending = true;
                    Some(c)
                }
                b'"' => {
                    self.in_string = false;
                    Some(c)
                }
                _ => Some(c),
            };
        }
        match c {
            b'"' => {
                self.in_string = true;
                Some(c)
            }
            b' ' | b'\t' | b'\n' | b'\r' => None,
            b'{' | b'[' => {
                self.depth += 1;
                Some(c)
            }
            b'}' | b']' => {
                self.depth -= 1;
                Some(c)
            }
            _ => Some(c),
        }
    }
}

/// Run the scalar machine over the whole input, returning the minified
/// bytes. This is the correctness reference used by the chunk-splitter and
/// mode-equivalence tests.
///
/// Inside a string with no escape pending, every byte but `"` and `\`
/// passes through unchanged, so that run is found with `memchr2` and
/// copied in one slice instead of one `step` call per byte.
pub fn minify_scalar(input: &[u8]) -> Vec<u8> {
    let mut state = ScalarState::new();
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if state.in_string && !state.escape_pending {
            match memchr::memchr2(b'"', b'\\', &input[i..]) {
                Some(rel) => {
                    out.extend_from_slice(&input[i..i + rel]);
                    i += rel;
                    state.step(input[i], &mut out);
                    i += 1;
                }
                None => {
                    out.extend_from_slice(&input[i..]);
                    break;
                }
            }
            continue;
        }
        state.step(input[i], &mut out);
        i += 1;
    }
    out
}

/// Consume `reader` in 64 KiB chunks, writing significant bytes to
/// `writer`. Memory is O(1) in input length: exactly one input buffer plus
/// one output buffer, each 64 KiB.
///
/// No validation is performed; callers that need rejection of malformed
/// input should run [`crate::validate::validate`] first.
pub fn minify_stream(reader: &mut dyn Read, writer: &mut dyn Write) -> Result<()> {
    let mut state = ScalarState::new();
    let mut in_buf = vec![0u8; BUFFER_SIZE];
    let mut out_buf = Vec::with_capacity(BUFFER_SIZE);

    loop {
        let n = reader.read(&mut in_buf)?;
        if n == 0 {
            break;
        }
        out_buf.clear();
        let buf = &in_buf[..n];
        let mut i = 0;
        while i < buf.len() {
            if state.in_string && !state.escape_pending {
                match memchr::memchr2(b'"', b'\\', &buf[i..]) {
                    Some(rel) => {
                        out_buf.extend_from_slice(&buf[i..i + rel]);
                        i += rel;
                        state.step(buf[i], &mut out_buf);
                        i += 1;
                    }
                    None => {
                        out_buf.extend_from_slice(&buf[i..]);
                        break;
                    }
                }
                continue;
            }
            state.step(buf[i], &mut out_buf);
            i += 1;
        }
        writer.write_all(&out_buf)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_basic_whitespace_removal() {
        let input = br#"{ "a" : 1 , "b" : [ 2 , 3 ] }"#;
        assert_eq!(minify_scalar(input), br#"{"a":1,"b":[2,3]}"#);
    }

    #[test]
    fn s2_string_content_preserved() {
        let input = br#"{"s":"a \t b"}"#;
        assert_eq!(minify_scalar(input), input.to_vec());
    }

    #[test]
    fn s3_escaped_quotes_not_terminators() {
        let input = "[\n  \"\\\"quoted\\\"\",\n  \"a\\\\b\"\n]".as_bytes();
        let expected = br#"["\"quoted\"","a\\b"]"#;
        assert_eq!(minify_scalar(input), expected.to_vec());
    }

    #[test]
    fn s4_unicode_escape_preserved() {
        let input = br#""é""#;
        assert_eq!(minify_scalar(input), input.to_vec());
    }

    #[test]
    fn idempotent() {
        let input = br#"{ "a" : [1, 2, {"b":  3}] }"#;
        let once = minify_scalar(input);
        let twice = minify_scalar(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn stream_matches_scalar() {
        let input: &[u8] = br#"{ "a" : 1 , "b" : [ 2 , 3 ] }"#;
        let mut reader = input;
        let mut out = Vec::new();
        minify_stream(&mut reader, &mut out).unwrap();
        assert_eq!(out, minify_scalar(input));
    }

    #[test]
    fn stream_handles_buffer_boundary() {
        // Build input that straddles the 64 KiB buffer boundary inside a string.
        let mut input = Vec::new();
        input.push(b'"');
        input.extend(std::iter::repeat(b'a').take(BUFFER_SIZE + 10));
        input.push(b'"');
        let mut reader: &[u8] = &input;
        let mut out = Vec::new();
        minify_stream(&mut reader, &mut out).unwrap();
        assert_eq!(out, input);
    }
}
