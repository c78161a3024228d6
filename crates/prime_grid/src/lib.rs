//! Parallel prime enumeration over large ranges.
//!
//! The range `[2, max_number]` is partitioned into fixed-size chunks, claimed
//! dynamically by a pool of worker threads through a lock-free atomic counter,
//! computed with a bounded-memory segmented sieve, and serialized into a
//! single CSV output stream.
//!
//! ```ignore
//! let config = RunConfig::builder()
//!     .max_number(1_000_000)
//!     .chunk_size(10_000)
//!     .worker_count(4)
//!     .build();
//! let sink = std::io::BufWriter::new(std::fs::File::create("primes.csv")?);
//! let summary = prime_grid::run(&config, sink)?;
//! println!("{} primes", summary.stats.total_primes);
//! ```

pub mod backend;
pub mod chunk;
pub mod collector;
pub mod config;
pub mod kernel;
pub mod queue;
pub mod runner;
pub mod worker;

mod progress;

pub use backend::{CompletionHandle, ExecutionBackend, ThreadBackend};
pub use chunk::{Chunk, ChunkResult};
pub use collector::{AggregateStats, ResultCollector, WriteOrder};
pub use config::{RunConfig, RunConfigBuilder};
pub use queue::ChunkQueue;
pub use runner::{run, run_with_backend, RunSummary};
pub use worker::WorkerSummary;
