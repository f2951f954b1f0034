//! x86_64 SIMD tiers for SPORT: SSE2 (128-bit), AVX2 (256-bit), and
//! AVX-512F/BW (512-bit). Each tier loads a vector-width block, classifies
//! it against `"` / whitespace (outside a string) or `"` / `\` (inside a
//! string) and hands the resulting bitmasks to the shared
//! copy-or-compress logic in [`super`]. Grounded on the teacher's
//! `json/validate_simd.rs` terminator-mask idiom (`cmpeq` + `movemask`,
//! `trailing_zeros` to find the first hit) and `json/simd/avx512.rs`'s
//! direct `_mm512_cmpeq_epi8_mask` classification.

use core::arch::x86_64::*;

use crate::eco::ScalarState;

use super::{emit_outside_block, emit_string_block, scalar_bridge};

#[target_feature(enable = "sse2")]
unsafe fn masks_outside_16(block: &[u8]) -> (u64, u64) {
    let chunk = _mm_loadu_si128(block.as_ptr() as *const __m128i);
    let eq_quote = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b'"' as i8));
    let eq_space = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b' ' as i8));
    let eq_tab = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b'\t' as i8));
    let eq_nl = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b'\n' as i8));
    let eq_cr = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b'\r' as i8));
    let ws = _mm_or_si128(_mm_or_si128(eq_space, eq_tab), _mm_or_si128(eq_nl, eq_cr));
    (
        _mm_movemask_epi8(eq_quote) as u16 as u64,
        _mm_movemask_epi8(ws) as u16 as u64,
    )
}

#[target_feature(enable = "sse2")]
unsafe fn masks_string_16(block: &[u8]) -> (u64, u64) {
    let chunk = _mm_loadu_si128(block.as_ptr() as *const __m128i);
    let eq_quote = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b'"' as i8));
    let eq_backslash = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b'\\' as i8));
    (
        _mm_movemask_epi8(eq_quote) as u16 as u64,
        _mm_movemask_epi8(eq_backslash) as u16 as u64,
    )
}

#[target_feature(enable = "avx2")]
unsafe fn masks_outside_32(block: &[u8]) -> (u64, u64) {
    let chunk = _mm256_loadu_si256(block.as_ptr() as *const __m256i);
    let eq_quote = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b'"' as i8));
    let eq_space = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b' ' as i8));
    let eq_tab = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b'\t' as i8));
    let eq_nl = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b'\n' as i8));
    let eq_cr = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b'\r' as i8));
    let ws = _mm256_or_si256(
        _mm256_or_si256(eq_space, eq_tab),
        _mm256_or_si256(eq_nl, eq_cr),
    );
    (
        _mm256_movemask_epi8(eq_quote) as u32 as u64,
        _mm256_movemask_epi8(ws) as u32 as u64,
    )
}

#[target_feature(enable = "avx2")]
unsafe fn masks_string_32(block: &[u8]) -> (u64, u64) {
    let chunk = _mm256_loadu_si256(block.as_ptr() as *const __m256i);
    let eq_quote = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b'"' as i8));
    let eq_backslash = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b'\\' as i8));
    (
        _mm256_movemask_epi8(eq_quote) as u32 as u64,
        _mm256_movemask_epi8(eq_backslash) as u32 as u64,
    )
}

#[target_feature(enable = "avx512f,avx512bw")]
unsafe fn masks_outside_64(block: &[u8]) -> (u64, u64) {
    let chunk = _mm512_loadu_si512(block.as_ptr() as *const i32);
    let quote_mask = _mm512_cmpeq_epi8_mask(chunk, _mm512_set1_epi8(b'"' as i8));
    let space = _mm512_cmpeq_epi8_mask(chunk, _mm512_set1_epi8(b' ' as i8));
    let tab = _mm512_cmpeq_epi8_mask(chunk, _mm512_set1_epi8(b'\t' as i8));
    let nl = _mm512_cmpeq_epi8_mask(chunk, _mm512_set1_epi8(b'\n' as i8));
    let cr = _mm512_cmpeq_epi8_mask(chunk, _mm512_set1_epi8(b'\r' as i8));
    (quote_mask, space | tab | nl | cr)
}

#[target_feature(enable = "avx512f,avx512bw")]
unsafe fn masks_string_64(block: &[u8]) -> (u64, u64) {
    let chunk = _mm512_loadu_si512(block.as_ptr() as *const i32);
    let quote_mask = _mm512_cmpeq_epi8_mask(chunk, _mm512_set1_epi8(b'"' as i8));
    let backslash_mask = _mm512_cmpeq_epi8_mask(chunk, _mm512_set1_epi8(b'\\' as i8));
    (quote_mask, backslash_mask)
}

/// Drives the outside-string / inside-string block loop for a fixed
/// vector width `v`, delegating mask computation to `outside`/`string`.
/// Shared by all three x86 tiers below; kept monomorphic per tier (no
/// generics over `#[target_feature]` closures) to keep codegen simple.
macro_rules! impl_minify_block {
    ($name:ident, $feature:literal, $v:expr, $outside:path, $string:path) => {
        #[target_feature(enable = $feature)]
        pub(crate) unsafe fn $name(input: &[u8], output: &mut [u8]) -> usize {
            const V: usize = $v;
            let mut pos = 0usize;
            let mut out_pos = 0usize;
            let mut state = ScalarState::new();

            loop {
                if !state.in_string {
                    while pos + V <= input.len() {
                        let block = &input[pos..pos + V];
                        let (quote_mask, ws_mask) = $outside(block);
                        let consumed =
                            emit_outside_block(block, quote_mask, ws_mask, output, &mut out_pos);
                        pos += consumed;
                        if quote_mask != 0 {
                            state.in_string = true;
                            break;
                        }
                    }
                    if !state.in_string {
                        break;
                    }
                } else {
                    while pos + V <= input.len() {
                        let block = &input[pos..pos + V];
                        let (quote_mask, backslash_mask) = $string(block);
                        if emit_string_block(block, quote_mask, backslash_mask, output, &mut out_pos)
                        {
                            pos += V;
                        } else {
                            break;
                        }
                    }
                    if state.in_string {
                        pos = scalar_bridge(
                            input,
                            pos,
                            input.len(),
                            &mut state,
                            output,
                            &mut out_pos,
                            true,
                        );
                        if state.in_string {
                            break;
                        }
                        continue;
                    }
                }
            }

            scalar_bridge(input, pos, input.len(), &mut state, output, &mut out_pos, false);
            out_pos
        }
    };
}

impl_minify_block!(
    minify_block_sse2,
    "sse2",
    16,
    masks_outside_16,
    masks_string_16
);
impl_minify_block!(
    minify_block_avx2,
    "avx2",
    32,
    masks_outside_32,
    masks_string_32
);
impl_minify_block!(
    minify_block_avx512,
    "avx512f,avx512bw",
    64,
    masks_outside_64,
    masks_string_64
);
