//! src/collector.rs
//!
//! Result collector: serializes concurrent submissions into one output stream
//! and folds aggregate statistics.
//!
//! Workers finish chunks in no particular order. The collector guarantees that
//! no two records ever interleave at the byte level by taking a single mutex
//! around format-and-write — and only around the write: the sieve never runs
//! while the lock is held.
//!
//! # Write order
//! Two modes, chosen at construction (`WriteOrder`):
//! - `Completion` (default): each record is written as its submission
//!   arrives, so line order reflects completion order. Consumers key records
//!   by the embedded `start-end` range, not by line position.
//! - `ChunkId`: submissions are buffered and `finish()` writes every record
//!   sorted by chunk id.

use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::sync::Mutex;

use crate::chunk::ChunkResult;

/// Output record ordering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteOrder {
    /// Stream records as chunks complete (append order = completion order).
    #[default]
    Completion,
    /// Buffer everything and write sorted by chunk id at `finish()`.
    ChunkId,
}

/// Aggregate statistics folded over all submitted results.
///
/// Derived state: recomputable at any time from the retained results, never
/// authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateStats {
    pub total_primes: u64,
    pub max_primes_in_chunk: u64,
}

struct CollectorInner<W> {
    sink: W,
    results: Vec<ChunkResult>,
}

/// Serializes chunk results into a single output stream.
///
/// `submit` is safe from any number of worker threads; `statistics` may run
/// concurrently with submissions and returns a point-in-time snapshot.
pub struct ResultCollector<W: Write> {
    order: WriteOrder,
    inner: Mutex<CollectorInner<W>>,
}

impl<W: Write> ResultCollector<W> {
    /// Wraps a sink and writes the CSV header line.
    ///
    /// A header write failure is fatal and surfaces here, before any worker
    /// starts.
    pub fn new(mut sink: W, order: WriteOrder) -> Result<Self> {
        writeln!(sink, "task_range,cpu_core,primes").context("failed to write output header")?;
        sink.flush().context("failed to flush output header")?;

        Ok(Self {
            order,
            inner: Mutex::new(CollectorInner {
                sink,
                results: Vec::new(),
            }),
        })
    }

    /// Accepts one chunk result, taking ownership.
    ///
    /// In `Completion` mode the record is formatted, written, and flushed
    /// under the lock before this returns; a write failure is propagated so
    /// the run aborts rather than silently dropping records.
    pub fn submit(&self, result: ChunkResult) -> Result<()> {
        let mut inner = self.lock()?;

        if self.order == WriteOrder::Completion {
            write_record(&mut inner.sink, &result).with_context(|| {
                format!(
                    "failed to write record for chunk {} [{}, {}]",
                    result.chunk_id, result.start, result.end
                )
            })?;
            inner.sink.flush().context("failed to flush output sink")?;
        }

        inner.results.push(result);
        Ok(())
    }

    /// Point-in-time statistics snapshot.
    ///
    /// Idempotent between submissions; not linearized against any specific
    /// in-flight `submit`.
    pub fn statistics(&self) -> Result<AggregateStats> {
        let inner = self.lock()?;
        Ok(fold_stats(&inner.results))
    }

    /// Drains buffered records (in `ChunkId` mode), flushes the sink, and
    /// returns the final statistics. Consumes the collector.
    pub fn finish(self) -> Result<AggregateStats> {
        let mut inner = self
            .inner
            .into_inner()
            .map_err(|_| anyhow!("result collector lock poisoned by a panicked worker"))?;

        if self.order == WriteOrder::ChunkId {
            inner.results.sort_by_key(|r| r.chunk_id);
            for result in &inner.results {
                write_record(&mut inner.sink, result).with_context(|| {
                    format!(
                        "failed to write record for chunk {} [{}, {}]",
                        result.chunk_id, result.start, result.end
                    )
                })?;
            }
        }

        inner.sink.flush().context("failed to flush output sink")?;
        Ok(fold_stats(&inner.results))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, CollectorInner<W>>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("result collector lock poisoned by a panicked worker"))
    }
}

/// One CSV record: `<start>-<end>,<worker_id>,<p1>;<p2>;...;<pk>`.
fn write_record<W: Write>(sink: &mut W, result: &ChunkResult) -> std::io::Result<()> {
    write!(sink, "{}-{},{},", result.start, result.end, result.worker_id)?;
    for (i, prime) in result.primes.iter().enumerate() {
        if i > 0 {
            write!(sink, ";")?;
        }
        write!(sink, "{}", prime)?;
    }
    writeln!(sink)
}

fn fold_stats(results: &[ChunkResult]) -> AggregateStats {
    let mut stats = AggregateStats::default();
    for result in results {
        let count = result.primes.len() as u64;
        stats.total_primes += count;
        stats.max_primes_in_chunk = stats.max_primes_in_chunk.max(count);
    }
    stats
}
