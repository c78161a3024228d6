//! Command-line entry point for the parallel prime pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use prime_grid::config::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_NUMBER};
use prime_grid::{RunConfig, WriteOrder};

/// Computes all primes in [2, max-number] across every available core and
/// writes one CSV record per chunk.
#[derive(Parser, Debug)]
#[command(name = "prime_grid", version, about)]
struct Cli {
    /// Upper bound of the range to sieve (inclusive).
    #[arg(long, default_value_t = DEFAULT_MAX_NUMBER)]
    max_number: u64,

    /// Numbers per chunk.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,

    /// Worker threads (defaults to the number of available cores).
    #[arg(long)]
    workers: Option<usize>,

    /// Output CSV file.
    #[arg(short, long, default_value = "primes_output.csv")]
    output: PathBuf,

    /// Buffer results and write them sorted by chunk id instead of streaming
    /// them in completion order.
    #[arg(long)]
    sort_output: bool,

    /// Seconds between progress status lines.
    #[arg(long, default_value_t = 5)]
    progress_interval: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let file = File::create(&cli.output)
        .with_context(|| format!("cannot open output file {}", cli.output.display()))?;
    let sink = BufWriter::new(file);

    let mut builder = RunConfig::builder()
        .max_number(cli.max_number)
        .chunk_size(cli.chunk_size)
        .progress_interval(Duration::from_secs(cli.progress_interval));
    if let Some(workers) = cli.workers {
        builder = builder.worker_count(workers);
    }
    if cli.sort_output {
        builder = builder.write_order(WriteOrder::ChunkId);
    }

    let summary = prime_grid::run(&builder.build(), sink)?;

    info!(
        "found {} primes in [2, {}] ({} chunks, max {} primes in one chunk) in {:.2?}; output: {}",
        summary.stats.total_primes,
        cli.max_number,
        summary.total_chunks,
        summary.stats.max_primes_in_chunk,
        summary.elapsed,
        cli.output.display()
    );

    Ok(())
}
