//! Chunk splitter: partitions input into contiguous ranges at safe JSON
//! boundaries so each range can be minified independently by SPORT.
//!
//! Grounded on
//! `examples/other_examples/…vexyart-vexy-json__…parallel_chunked.rs`'s
//! `find_safe_boundary` shape (track nesting level while scanning forward,
//! split right after a top-level comma or a closing bracket that returns
//! to the root), adapted from that file's NDJSON-oriented heuristic to a
//! single-document predicate.

use crate::eco::ScalarState;

/// A half-open `[start, end)` byte range of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub start: usize,
    pub end: usize,
}

impl ChunkRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Below this size, splitting isn't worth it — return the whole input as
/// one chunk and let the TURBO cutover policy delegate to SPORT inline.
const MIN_SPLITTABLE_BYTES: usize = 4096;

/// How far past a target position the splitter will search for a safe
/// boundary before giving up and merging that target into its neighbor.
const LOOKAHEAD_BYTES: usize = 4096;

/// Partition `input` into `target_chunks` (best-effort) contiguous ranges
/// whose boundaries are safe: outside any string, no escape pending, and
/// immediately after a comma directly inside the root container, after a
/// closer that returns to the root, or at end-of-input.
///
/// A single forward pass records every safe position in the document
/// (linear in input length); interior boundaries are then chosen as the
/// nearest safe position at or after each evenly spaced target, within a
/// bounded lookahead. Targets with no nearby safe position are dropped,
/// yielding fewer (but still correct) chunks — load balancing is recovered
/// by TURBO's work-stealing scheduler, not by this splitter.
pub fn split(input: &[u8], target_chunks: usize) -> Vec<ChunkRange> {
    if input.is_empty() {
        return Vec::new();
    }
    if target_chunks <= 1 || input.len() < MIN_SPLITTABLE_BYTES {
        return vec![ChunkRange {
            start: 0,
            end: input.len(),
        }];
    }

    let safe_positions = find_safe_positions(input);

    let mut boundaries = Vec::new();
    let mut last_boundary = 0usize;
    for i in 1..target_chunks {
        let target = i * input.len() / target_chunks;
        if target <= last_boundary {
            continue;
        }
        let idx = safe_positions.partition_point(|&p| p < target);
        if let Some(&candidate) = safe_positions.get(idx) {
            if candidate > last_boundary
                && candidate < input.len()
                && candidate - target <= LOOKAHEAD_BYTES
            {
                boundaries.push(candidate);
                last_boundary = candidate;
            }
        }
    }
    boundaries.push(input.len());

    let mut ranges = Vec::with_capacity(boundaries.len());
    let mut start = 0;
    for end in boundaries {
        if end > start {
            ranges.push(ChunkRange { start, end });
            start = end;
        }
    }
    ranges
}

/// Every position `p` in `[1, input.len()]` such that splitting right
/// before `p` is safe, in ascending order. `input.len()` is always
/// included.
fn find_safe_positions(input: &[u8]) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut state = ScalarState::new();
    for (i, &b) in input.iter().enumerate() {
        state.step_byte(b);
        if state.in_string || state.escape_pending {
            continue;
        }
        let p = i + 1;
        match b {
            b',' if state.depth == 1 => positions.push(p),
            b'}' | b']' if state.depth == 0 => positions.push(p),
            _ => {}
        }
    }
    positions.push(input.len());
    positions
}
