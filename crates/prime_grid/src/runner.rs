//! src/runner.rs
//!
//! Run orchestration: validate, spawn, join, summarize.
//!
//! `run()` wires the components together for one run:
//! queue → workers → collector → sink, with the progress reporter observing
//! the queue out-of-band. All shared state is run-scoped and passed through
//! `Arc`, so multiple independent runs in one process never interfere.
//!
//! Failure policy is fail-fast: the first worker error (or panic) fails the
//! whole run. Partial coverage is never reported as success — every chunk
//! either lands in the output or the run returns an error.

use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::backend::{CompletionHandle, ExecutionBackend, ThreadBackend};
use crate::collector::{AggregateStats, ResultCollector};
use crate::config::RunConfig;
use crate::progress::ProgressReporter;
use crate::queue::ChunkQueue;
use crate::worker::spawn_workers;

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub total_chunks: u64,
    pub stats: AggregateStats,
    pub elapsed: Duration,
}

/// Enumerates all primes in `[2, config.max_number]` on one OS thread per
/// worker, writing one record per chunk to `sink`.
///
/// # Errors
/// - configuration errors (`max_number < 2`, `chunk_size == 0`, ...) before
///   any worker starts;
/// - sink errors: a failed header write aborts before work begins, a failed
///   record write aborts the run mid-flight;
/// - any worker error or panic (fail-fast, no retry).
pub fn run<W>(config: &RunConfig, sink: W) -> Result<RunSummary>
where
    W: Write + Send + 'static,
{
    run_with_backend(config, sink, &ThreadBackend)
}

/// Like [`run`], but places worker loops through a caller-supplied
/// [`ExecutionBackend`] instead of spawning OS threads directly.
pub fn run_with_backend<W, B>(config: &RunConfig, sink: W, backend: &B) -> Result<RunSummary>
where
    W: Write + Send + 'static,
    B: ExecutionBackend,
{
    let config = config.resolve()?;
    let started = Instant::now();

    let queue = Arc::new(ChunkQueue::new(config.max_number, config.chunk_size)?);
    let collector = Arc::new(ResultCollector::new(sink, config.write_order)?);
    let abort = Arc::new(AtomicBool::new(false));

    info!(
        "starting run: range [2, {}], {} chunks of {} numbers, {} workers",
        config.max_number,
        queue.total_chunks(),
        config.chunk_size,
        config.worker_count
    );

    let reporter = ProgressReporter::spawn(queue.clone(), config.progress_interval)?;
    let handles = spawn_workers(
        backend,
        config.worker_count,
        config.chunk_size,
        &queue,
        &collector,
        &abort,
    )?;

    // Join everything before deciding the outcome, so no worker outlives the
    // run even on failure.
    let mut first_error: Option<anyhow::Error> = None;
    for (worker_id, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(Ok(summary)) => {
                debug!(
                    "worker {} done: {} chunks, {} primes",
                    summary.worker_id, summary.chunks_computed, summary.primes_found
                );
            }
            Ok(Err(e)) => {
                first_error.get_or_insert(e);
            }
            Err(_) => {
                first_error.get_or_insert(anyhow!("worker {} panicked", worker_id));
            }
        }
    }
    reporter.stop();

    if let Some(e) = first_error {
        return Err(e).context("run aborted: a worker failed");
    }

    let collector = Arc::try_unwrap(collector)
        .map_err(|_| anyhow!("result collector still shared after workers joined"))?;
    let stats = collector.finish()?;

    let summary = RunSummary {
        total_chunks: queue.total_chunks(),
        stats,
        elapsed: started.elapsed(),
    };

    info!(
        "run complete: {} chunks, {} primes (max {} in one chunk) in {:.2?}",
        summary.total_chunks,
        summary.stats.total_primes,
        summary.stats.max_primes_in_chunk,
        summary.elapsed
    );

    Ok(summary)
}
