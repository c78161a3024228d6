//! src/worker.rs
//!
//! The worker loop: claim → compute → report → repeat.
//!
//! One loop runs per execution context. The claim is a single atomic on the
//! queue, released before the sieve starts, so one worker's computation never
//! stalls another's claim. There is no retry state: an error during compute
//! or submit propagates out of the loop, trips the shared abort flag so
//! sibling workers stop claiming, and fails the whole run — a chunk's claim
//! cannot be returned to the queue without risking double-counting.

use anyhow::{Context, Result};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::backend::ExecutionBackend;
use crate::chunk::ChunkResult;
use crate::collector::ResultCollector;
use crate::kernel;
use crate::queue::ChunkQueue;

/// Per-worker tally returned when its loop ends.
#[derive(Debug, Clone, Copy)]
pub struct WorkerSummary {
    pub worker_id: usize,
    pub chunks_computed: u64,
    pub primes_found: u64,
}

/// Places `worker_count` worker loops on the backend, one per context.
pub(crate) fn spawn_workers<B, W>(
    backend: &B,
    worker_count: usize,
    segment_size: u64,
    queue: &Arc<ChunkQueue>,
    collector: &Arc<ResultCollector<W>>,
    abort: &Arc<AtomicBool>,
) -> Result<Vec<B::Handle>>
where
    B: ExecutionBackend,
    W: Write + Send + 'static,
{
    let mut handles = Vec::with_capacity(worker_count);

    for worker_id in 0..worker_count {
        let queue = queue.clone();
        let collector = collector.clone();
        let abort = abort.clone();

        let handle = backend.spawn(
            worker_id,
            Box::new(move || {
                let outcome = worker_loop(worker_id, segment_size, &queue, &collector, &abort);
                if outcome.is_err() {
                    abort.store(true, Ordering::Relaxed);
                }
                outcome
            }),
        )?;

        handles.push(handle);
    }

    Ok(handles)
}

fn worker_loop<W: Write>(
    worker_id: usize,
    segment_size: u64,
    queue: &ChunkQueue,
    collector: &ResultCollector<W>,
    abort: &AtomicBool,
) -> Result<WorkerSummary> {
    let mut summary = WorkerSummary {
        worker_id,
        chunks_computed: 0,
        primes_found: 0,
    };

    loop {
        if abort.load(Ordering::Relaxed) {
            break;
        }

        // CLAIMING: `None` is the normal termination signal, not an error.
        let Some(chunk) = queue.claim_next() else {
            break;
        };

        // COMPUTING: CPU-bound, no shared state touched.
        let started = Instant::now();
        let primes = kernel::segmented_sieve(chunk.start, chunk.end, segment_size);

        debug!(
            "worker {} finished chunk {} [{}, {}]: {} primes in {:?}",
            worker_id,
            chunk.id,
            chunk.start,
            chunk.end,
            primes.len(),
            started.elapsed()
        );

        summary.chunks_computed += 1;
        summary.primes_found += primes.len() as u64;

        // REPORTING: the only suspension point on shared state.
        collector
            .submit(ChunkResult {
                chunk_id: chunk.id,
                start: chunk.start,
                end: chunk.end,
                worker_id,
                primes,
            })
            .with_context(|| format!("worker {} failed to record chunk {}", worker_id, chunk.id))?;

        queue.mark_completed();
    }

    Ok(summary)
}
