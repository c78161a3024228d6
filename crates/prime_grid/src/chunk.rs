//! src/chunk.rs
//!
//! Work-unit data types shared between the queue, workers, and the collector.
//!
//! A `Chunk` is one contiguous sub-range of the overall number range. Chunks
//! partition `[2, max_number]` contiguously with no gaps or overlaps and are
//! derived arithmetically from their id, so they are never stored anywhere —
//! claiming a chunk id *is* claiming the chunk.

/// One contiguous sub-range of the number range, the unit of work a worker
/// claims from the queue.
///
/// Immutable after creation. Owned exclusively by the worker that claimed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Sequential id, starting at 0.
    pub id: u64,
    /// First number in the range (inclusive). Always >= 2.
    pub start: u64,
    /// Last number in the range (inclusive).
    pub end: u64,
}

impl Chunk {
    /// Number of integers covered by this chunk.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// The primes found in one chunk, tagged with the worker that computed them.
///
/// Created by a worker after sieving its chunk; ownership transfers to the
/// `ResultCollector` on submission and the result is immutable thereafter.
#[derive(Debug, Clone)]
pub struct ChunkResult {
    pub chunk_id: u64,
    pub start: u64,
    pub end: u64,
    /// Index of the worker that computed this chunk (0..worker_count).
    pub worker_id: usize,
    /// Strictly increasing; exactly the primes in `[start, end]`.
    pub primes: Vec<u64>,
}
