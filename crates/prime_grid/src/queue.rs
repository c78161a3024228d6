//! src/queue.rs
//!
//! Chunk queue: the claim protocol for dynamic work distribution.
//!
//! The queue never materializes chunks. The partition of `[2, max_number]` is
//! pure arithmetic over a chunk id, so the whole claim protocol reduces to one
//! atomic `fetch_add` on the next-id counter:
//!
//! - Exactly-once: no two callers ever receive the same id.
//! - Lock-free: a claim is O(1) and never blocks on another worker's
//!   computation.
//! - Demand-driven: idle workers claim the next unclaimed chunk regardless of
//!   which thread they run on, so slow workers simply claim fewer chunks.
//!
//! The queue is an explicitly constructed, run-scoped object shared via `Arc`;
//! multiple independent runs in one process never share counters.

use anyhow::{anyhow, Result};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::chunk::Chunk;

/// Shared queue state for one run: the atomic claim counter, the completion
/// counter, and the fixed partitioning parameters.
#[derive(Debug)]
pub struct ChunkQueue {
    max_number: u64,
    chunk_size: u64,
    total_chunks: u64,
    next: AtomicU64,
    completed: AtomicU64,
}

impl ChunkQueue {
    /// Creates the queue for the range `[2, max_number]` partitioned into
    /// chunks of `chunk_size` numbers (the last chunk may be shorter).
    ///
    /// # Errors
    /// - `max_number < 2` (nothing to sieve)
    /// - `chunk_size == 0`
    pub fn new(max_number: u64, chunk_size: u64) -> Result<Self> {
        if max_number < 2 {
            return Err(anyhow!(
                "max_number must be at least 2 (got {}); the range [2, max_number] would be empty",
                max_number
            ));
        }
        if chunk_size == 0 {
            return Err(anyhow!("chunk_size must be greater than 0"));
        }

        // max_number - 1 integers in [2, max_number].
        let total_chunks = (max_number - 1).div_ceil(chunk_size);

        Ok(Self {
            max_number,
            chunk_size,
            total_chunks,
            next: AtomicU64::new(0),
            completed: AtomicU64::new(0),
        })
    }

    /// Derives the chunk for a given id. Pure arithmetic; `id` must be in
    /// `[0, total_chunks)`.
    fn chunk(&self, id: u64) -> Chunk {
        let start = 2 + id * self.chunk_size;
        let end = (start + self.chunk_size - 1).min(self.max_number);
        Chunk { id, start, end }
    }

    /// Claims the next unclaimed chunk, or `None` when the queue is exhausted.
    ///
    /// A single atomic read-modify-write; safe from any number of concurrent
    /// callers. Calls past exhaustion keep returning `None`.
    pub fn claim_next(&self) -> Option<Chunk> {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        if id >= self.total_chunks {
            return None;
        }
        Some(self.chunk(id))
    }

    /// Records one finished chunk. Called once per completed chunk, in any
    /// order relative to claims.
    pub fn mark_completed(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_chunks(&self) -> u64 {
        self.total_chunks
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Chunks not yet completed. Eventually consistent relative to in-flight
    /// claims; informational only.
    pub fn remaining(&self) -> u64 {
        self.total_chunks.saturating_sub(self.completed())
    }

    /// Completion percentage in `[0, 100]`. Approximate by design.
    pub fn progress(&self) -> f64 {
        (self.completed() as f64 / self.total_chunks as f64) * 100.0
    }

    pub fn all_completed(&self) -> bool {
        self.completed() >= self.total_chunks
    }
}
