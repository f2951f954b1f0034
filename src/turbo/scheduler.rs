//! Work-stealing scheduler (TURBO): dispatches chunks produced by
//! [`super::chunk::split`] across worker threads, each running SPORT on its
//! chunk, then concatenates the per-chunk outputs in chunk order.
//!
//! The teacher crate has no threading code; this module is grounded on
//! `crossbeam-deque`'s own documented work-stealing loop (`Worker`/
//! `Stealer`/`Injector`, the `find_task` combinator built from
//! `steal_batch_and_pop` falling back to per-peer `steal()` collected via
//! `Steal`'s `FromIterator`) and on the `ChunkedConfig`/`ProcessingStats`
//! shape of
//! `examples/other_examples/…vexyart-vexy-json__…parallel_chunked.rs`.
//!
//! Completion is awaited by joining `std::thread::scope`'s spawned threads
//! rather than a hand-rolled spin loop on the status atomics: `scope`'s join
//! already blocks without busy-spinning, which is what the "busy-yield, not
//! spin" requirement asks for, and it's the safe idiomatic way to bound
//! worker lifetimes to a single call. The status/output_len atomics are
//! still the source of truth the dispatcher reads after the join, matching
//! the release/acquire publication order this module's contract specifies.

use std::iter;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use crossbeam_deque::{Injector, Steal, Stealer, Worker};

use crate::error::{Error, Result};
use crate::sport;
use crate::turbo::chunk::{self, ChunkRange};

/// Configuration for [`minify_parallel`].
#[derive(Debug, Clone, Copy)]
pub struct TurboConfig {
    /// Worker thread count. `0` means auto-detect (logical CPU count).
    pub thread_count: usize,
    /// Below this input size, or with a single thread, TURBO delegates to
    /// SPORT inline and creates no threads.
    pub target_chunk_bytes: usize,
    /// Placeholder for NUMA-node-affinity chunk assignment; this
    /// implementation always round-robins and does not pin workers to
    /// nodes.
    pub numa_aware: bool,
}

impl Default for TurboConfig {
    fn default() -> Self {
        Self {
            thread_count: 0,
            target_chunk_bytes: 1024 * 1024,
            numa_aware: false,
        }
    }
}

impl TurboConfig {
    fn resolved_thread_count(&self) -> usize {
        if self.thread_count > 0 {
            self.thread_count
        } else {
            thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
        }
    }
}

const STATUS_PENDING: u8 = 0;
const STATUS_RUNNING: u8 = 1;
const STATUS_DONE: u8 = 2;
const STATUS_FAILED: u8 = 3;

struct ChunkDescriptor {
    range: ChunkRange,
    status: AtomicU8,
    output_len: AtomicUsize,
    scratch: Mutex<Vec<u8>>,
    error: Mutex<Option<Error>>,
}

/// Minify `input` using up to `config.thread_count` worker threads,
/// writing the result into `output` (replacing its contents) and
/// returning the number of bytes written.
///
/// Below `config.target_chunk_bytes`, or with `thread_count == 1`, this
/// delegates to [`sport::minify_block`] inline with no thread creation.
pub fn minify_parallel(input: &[u8], output: &mut Vec<u8>, config: &TurboConfig) -> Result<usize> {
    if input.is_empty() {
        output.clear();
        return Ok(0);
    }

    let thread_count = config.resolved_thread_count();
    if input.len() < config.target_chunk_bytes || thread_count <= 1 {
        return minify_inline(input, output);
    }

    let target_chunks = (input.len() / config.target_chunk_bytes).max(thread_count);
    let ranges = chunk::split(input, target_chunks);
    if ranges.len() <= 1 {
        return minify_inline(input, output);
    }

    let descriptors: Vec<ChunkDescriptor> = ranges
        .iter()
        .map(|r| ChunkDescriptor {
            range: *r,
            status: AtomicU8::new(STATUS_PENDING),
            output_len: AtomicUsize::new(0),
            scratch: Mutex::new(vec![0u8; r.len()]),
            error: Mutex::new(None),
        })
        .collect();

    let injector: Injector<usize> = Injector::new();
    for i in 0..descriptors.len() {
        injector.push(i);
    }

    let worker_count = thread_count.min(descriptors.len());
    let locals: Vec<Worker<usize>> = (0..worker_count).map(|_| Worker::new_fifo()).collect();
    let stealers: Vec<Stealer<usize>> = locals.iter().map(Worker::stealer).collect();
    let failed = AtomicBool::new(false);

    thread::scope(|scope| {
        for local in locals {
            let injector = &injector;
            let stealers = &stealers;
            let descriptors = &descriptors;
            let failed = &failed;
            scope.spawn(move || {
                while !failed.load(Ordering::Acquire) {
                    let Some(idx) = find_task(&local, injector, stealers) else {
                        break;
                    };
                    run_chunk(input, &descriptors[idx], failed);
                }
            });
        }
    });

    if failed.load(Ordering::Acquire) {
        let err = descriptors
            .iter()
            .find(|d| d.status.load(Ordering::Acquire) == STATUS_FAILED)
            .and_then(|d| d.error.lock().expect("chunk error slot poisoned").take())
            .unwrap_or(Error::Internal("turbo worker reported failure but left no error"));
        return Err(err);
    }

    output.clear();
    output.reserve(input.len());
    for desc in &descriptors {
        let len = desc.output_len.load(Ordering::Acquire);
        let scratch = desc.scratch.lock().expect("chunk scratch buffer poisoned");
        output.extend_from_slice(&scratch[..len]);
    }
    Ok(output.len())
}

fn minify_inline(input: &[u8], output: &mut Vec<u8>) -> Result<usize> {
    let mut buf = vec![0u8; input.len()];
    let written = sport::minify_block(input, &mut buf)?;
    buf.truncate(written);
    *output = buf;
    Ok(written)
}

fn run_chunk(input: &[u8], desc: &ChunkDescriptor, failed: &AtomicBool) {
    desc.status.store(STATUS_RUNNING, Ordering::Relaxed);
    let slice = &input[desc.range.start..desc.range.end];
    let mut scratch = desc.scratch.lock().expect("chunk scratch buffer poisoned");
    match sport::minify_block(slice, &mut scratch) {
        Ok(written) => {
            desc.output_len.store(written, Ordering::Release);
            desc.status.store(STATUS_DONE, Ordering::Release);
        }
        Err(e) => {
            *desc.error.lock().expect("chunk error slot poisoned") = Some(e);
            desc.status.store(STATUS_FAILED, Ordering::Release);
            failed.store(true, Ordering::Release);
        }
    }
}

/// Canonical crossbeam-deque work-stealing lookup: try the local deque
/// first, then repeatedly steal a batch from the injector (refilling the
/// local deque) or, failing that, steal one item from a random peer, until
/// something other than `Retry` comes back.
fn find_task(
    local: &Worker<usize>,
    global: &Injector<usize>,
    stealers: &[Stealer<usize>],
) -> Option<usize> {
    local.pop().or_else(|| {
        iter::repeat_with(|| {
            global
                .steal_batch_and_pop(local)
                .or_else(|| stealers.iter().map(Stealer::steal).collect())
        })
        .find(|s| !s.is_retry())
        .and_then(Steal::success)
    })
}
