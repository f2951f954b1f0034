//! SIMD-accelerated block minifier (SPORT, C4).
//!
//! Single-threaded, vector-width-at-a-time scan over the whole input, with
//! a scalar fallback whenever a block's classification masks aren't
//! "clean" (no quote, or no quote/backslash while inside a string). The
//! masking idiom (`cmpeq` + `movemask`/k-mask, `trailing_zeros` to find
//! the first set bit) is the same one the teacher crate uses for JSON
//! string-terminator scanning; see `x86`/`neon` for the per-tier
//! implementations and [`crate::eco::ScalarState`] for the shared scalar
//! core.

#[cfg(target_arch = "aarch64")]
mod neon;
mod scalar;
#[cfg(target_arch = "x86_64")]
mod x86;

use crate::cpu::{self, SimdTier};
use crate::eco::ScalarState;
use crate::error::{Error, Result};

/// Minify `input` into `output` using the widest SIMD tier available on
/// this CPU, falling back to scalar processing for tail bytes and for any
/// block whose classification isn't a clean memcpy/compress.
///
/// `output` must be at least `input.len()` bytes; minification never
/// grows the input.
pub fn minify_block(input: &[u8], output: &mut [u8]) -> Result<usize> {
    if output.len() < input.len() {
        return Err(Error::OutputBufferTooSmall {
            needed: input.len(),
            provided: output.len(),
        });
    }
    if input.is_empty() {
        return Ok(0);
    }

    let caps = cpu::detect();
    let written = match caps.tier {
        #[cfg(target_arch = "x86_64")]
        SimdTier::Vector512 => unsafe { x86::minify_block_avx512(input, output) },
        #[cfg(target_arch = "x86_64")]
        SimdTier::Vector256 => unsafe { x86::minify_block_avx2(input, output) },
        #[cfg(target_arch = "x86_64")]
        SimdTier::Vector128 => unsafe { x86::minify_block_sse2(input, output) },
        #[cfg(target_arch = "aarch64")]
        SimdTier::Vector128 => unsafe { neon::minify_block_neon(input, output) },
        _ => scalar::minify_block_scalar(input, output),
    };
    Ok(written)
}

/// Process one vector-width block outside a string, given precomputed
/// `quote_mask`/`whitespace_mask` (only the low `block.len()` bits of each
/// are meaningful). Returns the number of input bytes consumed: either the
/// whole block (no quote in it), or up to and including the first quote.
#[inline]
pub(crate) fn emit_outside_block(
    block: &[u8],
    quote_mask: u64,
    ws_mask: u64,
    output: &mut [u8],
    out_pos: &mut usize,
) -> usize {
    if quote_mask == 0 {
        copy_or_compress(block, ws_mask, output, out_pos);
        return block.len();
    }
    let p = quote_mask.trailing_zeros() as usize;
    let prefix_mask = if p == 0 { 0 } else { ws_mask & ((1u64 << p) - 1) };
    copy_or_compress(&block[..p], prefix_mask, output, out_pos);
    output[*out_pos] = block[p];
    *out_pos += 1;
    p + 1
}

#[inline]
fn copy_or_compress(segment: &[u8], ws_mask: u64, output: &mut [u8], out_pos: &mut usize) {
    if ws_mask == 0 {
        output[*out_pos..*out_pos + segment.len()].copy_from_slice(segment);
        *out_pos += segment.len();
    } else {
        for (i, &b) in segment.iter().enumerate() {
            if (ws_mask >> i) & 1 == 0 {
                output[*out_pos] = b;
                *out_pos += 1;
            }
        }
    }
}

/// Process one vector-width block while inside a string. Returns `true`
/// (and advances `out_pos` by the full block) only when the block has
/// neither a quote nor a backslash, i.e. the whole block can be
/// memcpy'd verbatim. Otherwise the caller must fall back to the scalar
/// machine starting at this block.
#[inline]
pub(crate) fn emit_string_block(
    block: &[u8],
    quote_mask: u64,
    backslash_mask: u64,
    output: &mut [u8],
    out_pos: &mut usize,
) -> bool {
    if quote_mask == 0 && backslash_mask == 0 {
        output[*out_pos..*out_pos + block.len()].copy_from_slice(block);
        *out_pos += block.len();
        true
    } else {
        false
    }
}

/// Run the scalar machine starting at `pos`, writing into `output`, until
/// either `stop_at` is reached or (if `until_string_ends` is set) the
/// string the machine is currently inside terminates — whichever comes
/// first. Returns the new input position.
#[inline]
pub(crate) fn scalar_bridge(
    input: &[u8],
    mut pos: usize,
    stop_at: usize,
    state: &mut ScalarState,
    output: &mut [u8],
    out_pos: &mut usize,
    until_string_ends: bool,
) -> usize {
    while pos < stop_at {
        if let Some(b) = state.step_byte(input[pos]) {
            output[*out_pos] = b;
            *out_pos += 1;
        }
        pos += 1;
        if until_string_ends && !state.in_string {
            break;
        }
    }
    pos
}
