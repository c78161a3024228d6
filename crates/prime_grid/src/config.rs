//! src/config.rs
//!
//! Configuration for a prime enumeration run.
//!
//! `RunConfig` stores the parameters that control one run. Unset fields are
//! resolved to defaults at validation time, so the builder never fails —
//! invalid values surface as errors from `run()` before any worker starts.
//!
//! Example:
//! ```ignore
//! let config = RunConfig::builder()
//!     .max_number(2_000_000_000)
//!     .chunk_size(100_000)
//!     .worker_count(8)
//!     .write_order(WriteOrder::ChunkId)
//!     .build();
//! ```

use anyhow::{anyhow, Result};
use std::time::Duration;

use crate::collector::WriteOrder;

/// Default upper bound of the range to sieve.
pub const DEFAULT_MAX_NUMBER: u64 = 2_000_000_000;

/// Default numbers per chunk.
pub const DEFAULT_CHUNK_SIZE: u64 = 100_000;

/// Default interval between progress status lines.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

/// Configuration for one run of the prime pipeline.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Upper bound of the range `[2, max_number]` (defaults to 2×10⁹).
    pub max_number: Option<u64>,
    /// Numbers per chunk; also the sieve's sub-segment size (defaults to 10⁵).
    pub chunk_size: Option<u64>,
    /// Parallel workers (defaults to the number of available cores).
    pub worker_count: Option<usize>,
    /// Output record ordering (defaults to completion order).
    pub write_order: WriteOrder,
    /// How often the progress reporter emits a status line.
    pub progress_interval: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_number: None,
            chunk_size: None,
            worker_count: None,
            write_order: WriteOrder::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Resolves defaults and validates. Called by `run()` before any work
    /// begins; configuration errors are fatal at this point.
    pub(crate) fn resolve(&self) -> Result<ResolvedConfig> {
        let max_number = self.max_number.unwrap_or(DEFAULT_MAX_NUMBER);
        let chunk_size = self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
        let worker_count = self.worker_count.unwrap_or_else(num_cpus::get);

        if max_number < 2 {
            return Err(anyhow!(
                "max_number must be at least 2 (got {})",
                max_number
            ));
        }
        if chunk_size == 0 {
            return Err(anyhow!("chunk_size must be greater than 0"));
        }
        if worker_count == 0 {
            return Err(anyhow!(
                "worker_count must be greater than 0. \
                Omit it to default to the number of available cores."
            ));
        }

        Ok(ResolvedConfig {
            max_number,
            chunk_size,
            worker_count,
            write_order: self.write_order,
            progress_interval: self.progress_interval,
        })
    }
}

/// Fully resolved, validated configuration used internally by the runner.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedConfig {
    pub(crate) max_number: u64,
    pub(crate) chunk_size: u64,
    pub(crate) worker_count: usize,
    pub(crate) write_order: WriteOrder,
    pub(crate) progress_interval: Duration,
}

/// Builder for `RunConfig` with method chaining.
#[derive(Default)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    /// Set the upper bound of the range to sieve (must be >= 2).
    pub fn max_number(mut self, max_number: u64) -> Self {
        self.config.max_number = Some(max_number);
        self
    }

    /// Set the chunk size (must be > 0).
    ///
    /// Smaller chunks balance load better across workers; larger chunks
    /// amortize claim and write overhead.
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.config.chunk_size = Some(chunk_size);
        self
    }

    /// Set the number of parallel workers (must be > 0).
    pub fn worker_count(mut self, worker_count: usize) -> Self {
        self.config.worker_count = Some(worker_count);
        self
    }

    /// Set the output record ordering.
    pub fn write_order(mut self, write_order: WriteOrder) -> Self {
        self.config.write_order = write_order;
        self
    }

    /// Set the interval between progress status lines.
    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.config.progress_interval = interval;
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> RunConfig {
        self.config
    }
}
