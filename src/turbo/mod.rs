//! Chunked parallel minifier with work-stealing (TURBO).
//!
//! Combines the chunk splitter (C5, [`chunk`]) and the work-stealing
//! scheduler (C6, [`scheduler`]) into a single entry point that produces
//! output byte-identical to [`crate::eco::minify_scalar`] and
//! [`crate::sport::minify_block`] on the same input, regardless of thread
//! count.

mod chunk;
mod scheduler;

pub use chunk::{split, ChunkRange};
pub use scheduler::{minify_parallel, TurboConfig};
