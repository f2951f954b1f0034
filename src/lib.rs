//! # jsonmin
//!
//! A three-tier JSON minifier: given well-formed JSON text, produces a
//! semantically equivalent text with all insignificant whitespace removed
//! and every string/number lexeme preserved byte-for-byte.
//!
//! ## Module Organization
//!
//! - [`eco`] - streaming, O(1)-memory scalar state machine
//! - [`sport`] - single-threaded SIMD-accelerated block minifier
//! - [`turbo`] - chunked parallel minifier with work-stealing
//! - [`validate`] - lightweight structural validator shared by all three
//! - [`cpu`] - runtime CPU feature detection for SPORT's tier selection
//! - [`error`] - the crate's error and position types
//!
//! ## Quick Start
//!
//! ```
//! use jsonmin::{minify, Mode};
//!
//! let input = br#"{ "a" : 1 , "b" : [ 2, 3 ] }"#;
//! let out = minify(input, Mode::Sport).unwrap();
//! assert_eq!(out, br#"{"a":1,"b":[2,3]}"#);
//! ```

pub mod cpu;
pub mod eco;
pub mod error;
pub mod sport;
pub mod turbo;
pub mod validate;

use std::io::{Read, Write};

pub use error::{Error, Position, Result};
pub use turbo::TurboConfig;

/// Selects which back end performs the minification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Streaming scalar state machine. O(1) memory, single-threaded.
    Eco,
    /// SIMD-accelerated single-threaded block scan.
    Sport,
    /// Chunked parallel minification with work-stealing.
    Turbo,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Eco
    }
}

/// Minify `input`, validating it first, using the given `mode`.
///
/// Returns a freshly allocated buffer. For TURBO with a custom worker
/// count or chunk size, use [`minify_with_config`] instead.
pub fn minify(input: &[u8], mode: Mode) -> Result<Vec<u8>> {
    minify_with_config(input, mode, &TurboConfig::default())
}

/// Like [`minify`], but lets TURBO runs be configured (thread count, target
/// chunk size, NUMA awareness). `config` is ignored by ECO and SPORT.
pub fn minify_with_config(input: &[u8], mode: Mode, config: &TurboConfig) -> Result<Vec<u8>> {
    validate::validate(input)?;
    match mode {
        Mode::Eco => Ok(eco::minify_scalar(input)),
        Mode::Sport => {
            let mut out = vec![0u8; input.len()];
            let written = sport::minify_block(input, &mut out)?;
            out.truncate(written);
            Ok(out)
        }
        Mode::Turbo => {
            let mut out = Vec::new();
            turbo::minify_parallel(input, &mut out, config)?;
            Ok(out)
        }
    }
}

/// Minify `input` into a caller-provided `output` buffer. All three modes
/// buffer internally and then copy into `output`, so `output.len()` must be
/// at least the number of bytes the minified result needs (at most
/// `input.len()`); if it's too small, all three return
/// [`Error::OutputBufferTooSmall`] rather than growing `output` themselves.
/// Returns the number of bytes written. Skips validation — callers that
/// need the structural guarantee should call [`validate::validate`]
/// themselves first.
pub fn minify_into(input: &[u8], output: &mut [u8], mode: Mode) -> Result<usize> {
    match mode {
        Mode::Eco => {
            let minified = eco::minify_scalar(input);
            if output.len() < minified.len() {
                return Err(Error::OutputBufferTooSmall {
                    needed: minified.len(),
                    provided: output.len(),
                });
            }
            output[..minified.len()].copy_from_slice(&minified);
            Ok(minified.len())
        }
        Mode::Sport => sport::minify_block(input, output),
        Mode::Turbo => {
            let mut buf = Vec::new();
            let written = turbo::minify_parallel(input, &mut buf, &TurboConfig::default())?;
            if output.len() < written {
                return Err(Error::OutputBufferTooSmall {
                    needed: written,
                    provided: output.len(),
                });
            }
            output[..written].copy_from_slice(&buf);
            Ok(written)
        }
    }
}

/// Stream-minify from `reader` to `writer` using ECO's 64 KiB
/// double-buffered scalar machine. `mode` is accepted for interface
/// symmetry with [`minify`]/[`minify_into`]; only ECO supports true
/// streaming I/O, so SPORT and TURBO first buffer the whole input before
/// writing the result out in one shot.
pub fn minify_stream(reader: &mut dyn Read, writer: &mut dyn Write, mode: Mode) -> Result<()> {
    match mode {
        Mode::Eco => eco::minify_stream(reader, writer),
        Mode::Sport | Mode::Turbo => {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            let out = minify(&buf, mode)?;
            writer.write_all(&out)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_modes_agree_on_a_representative_document() {
        let input = br#"{ "a" : 1 , "b" : [ 2 , 3 , "x\"y" ] , "c" : null }"#;
        let eco = minify(input, Mode::Eco).unwrap();
        let sport = minify(input, Mode::Sport).unwrap();
        let turbo = minify(input, Mode::Turbo).unwrap();
        assert_eq!(eco, sport);
        assert_eq!(sport, turbo);
        assert_eq!(eco, br#"{"a":1,"b":[2,3,"x\"y"],"c":null}"#);
    }

    #[test]
    fn minify_rejects_invalid_input() {
        assert!(matches!(minify(b"{", Mode::Eco), Err(Error::UnbalancedStructure { .. })));
    }

    #[test]
    fn minify_into_reports_undersized_buffer() {
        let input = br#"{"a":1}"#;
        let mut out = [0u8; 2];
        assert!(matches!(
            minify_into(input, &mut out, Mode::Sport),
            Err(Error::OutputBufferTooSmall { .. })
        ));
    }

    #[test]
    fn minify_stream_round_trips_through_sport() {
        let input = br#"{ "a" : [1, 2, 3] }"#;
        let mut reader: &[u8] = input;
        let mut out = Vec::new();
        minify_stream(&mut reader, &mut out, Mode::Sport).unwrap();
        assert_eq!(out, br#"{"a":[1,2,3]}"#);
    }
}
