//! Scalar fallback for SPORT: a vector width of one degenerates to the ECO
//! machine.

use crate::eco::ScalarState;

pub(crate) fn minify_block_scalar(input: &[u8], output: &mut [u8]) -> usize {
    let mut state = ScalarState::new();
    let mut out_pos = 0;
    for &b in input {
        if let Some(sig) = state.step_byte(b) {
            output[out_pos] = sig;
            out_pos += 1;
        }
    }
    out_pos
}
