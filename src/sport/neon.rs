//! aarch64 NEON tier for SPORT (128-bit, 16 bytes per block).
//!
//! NEON has no direct `movemask` instruction; masks are built the usual
//! way — AND each lane's comparison result against a per-lane bit weight,
//! then horizontally add the low and high halves — matching the
//! `json/simd/mod.rs` doc comment's note that "NEON intrinsics process 16
//! bytes at a time" on this architecture.

use core::arch::aarch64::*;

use crate::eco::ScalarState;

use super::{emit_outside_block, emit_string_block, scalar_bridge};

const LANE_WEIGHTS: [u8; 16] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

#[target_feature(enable = "neon")]
unsafe fn movemask(cmp: uint8x16_t) -> u64 {
    let weights = vld1q_u8(LANE_WEIGHTS.as_ptr());
    let masked = vandq_u8(cmp, weights);
    let low = vaddv_u8(vget_low_u8(masked)) as u64;
    let high = vaddv_u8(vget_high_u8(masked)) as u64;
    low | (high << 8)
}

#[target_feature(enable = "neon")]
unsafe fn masks_outside_16(block: &[u8]) -> (u64, u64) {
    let chunk = vld1q_u8(block.as_ptr());
    let eq_quote = vceqq_u8(chunk, vdupq_n_u8(b'"'));
    let eq_space = vceqq_u8(chunk, vdupq_n_u8(b' '));
    let eq_tab = vceqq_u8(chunk, vdupq_n_u8(b'\t'));
    let eq_nl = vceqq_u8(chunk, vdupq_n_u8(b'\n'));
    let eq_cr = vceqq_u8(chunk, vdupq_n_u8(b'\r'));
    let ws = vorrq_u8(vorrq_u8(eq_space, eq_tab), vorrq_u8(eq_nl, eq_cr));
    (movemask(eq_quote), movemask(ws))
}

#[target_feature(enable = "neon")]
unsafe fn masks_string_16(block: &[u8]) -> (u64, u64) {
    let chunk = vld1q_u8(block.as_ptr());
    let eq_quote = vceqq_u8(chunk, vdupq_n_u8(b'"'));
    let eq_backslash = vceqq_u8(chunk, vdupq_n_u8(b'\\'));
    (movemask(eq_quote), movemask(eq_backslash))
}

/// Mirrors the x86 block loop in [`super::x86`] for the single NEON tier.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn minify_block_neon(input: &[u8], output: &mut [u8]) -> usize {
    const V: usize = 16;
    let mut pos = 0usize;
    let mut out_pos = 0usize;
    let mut state = ScalarState::new();

    loop {
        if !state.in_string {
            while pos + V <= input.len() {
                let block = &input[pos..pos + V];
                let (quote_mask, ws_mask) = masks_outside_16(block);
                let consumed = emit_outside_block(block, quote_mask, ws_mask, output, &mut out_pos);
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
                let (quote_mask, backslash_mask) = masks_string_16(block);
                if emit_string_block(block, quote_mask, backslash_mask, output, &mut out_pos) {
                    pos += V;
                } else {
                    break;
                }
            }
            if state.in_string {
                pos = scalar_bridge(input, pos, input.len(), &mut state, output, &mut out_pos, true);
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
