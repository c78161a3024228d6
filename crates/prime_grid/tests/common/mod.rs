#![allow(dead_code)]

use anyhow::{anyhow, Context, Result};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Reference enumeration of primes in `[start, end]` by naive trial division.
/// Used as the oracle against the segmented sieve.
pub fn primes_naive(start: u64, end: u64) -> Vec<u64> {
    (start.max(2)..=end)
        .filter(|&n| (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0))
        .collect()
}

/// One parsed output record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub start: u64,
    pub end: u64,
    pub worker_id: usize,
    pub primes: Vec<u64>,
}

/// Parses CSV output produced by a run: a header line followed by
/// `<start>-<end>,<worker_id>,<p1>;<p2>;...` records.
pub fn parse_output(contents: &str) -> Result<Vec<Record>> {
    let mut lines = contents.lines();
    let header = lines.next().ok_or_else(|| anyhow!("output is empty"))?;
    if header != "task_range,cpu_core,primes" {
        return Err(anyhow!("unexpected header line: {:?}", header));
    }

    lines
        .map(|line| {
            let mut fields = line.splitn(3, ',');
            let range = fields
                .next()
                .ok_or_else(|| anyhow!("missing range field in {:?}", line))?;
            let worker = fields
                .next()
                .ok_or_else(|| anyhow!("missing worker field in {:?}", line))?;
            let primes = fields
                .next()
                .ok_or_else(|| anyhow!("missing primes field in {:?}", line))?;

            let (start, end) = range
                .split_once('-')
                .ok_or_else(|| anyhow!("malformed range {:?}", range))?;

            Ok(Record {
                start: start.parse().context("bad start")?,
                end: end.parse().context("bad end")?,
                worker_id: worker.parse().context("bad worker id")?,
                primes: if primes.is_empty() {
                    Vec::new()
                } else {
                    primes
                        .split(';')
                        .map(|p| p.parse().context("bad prime"))
                        .collect::<Result<Vec<u64>>>()?
                },
            })
        })
        .collect()
}

/// A cloneable in-memory sink whose contents remain readable after the
/// collector consumes its copy.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A sink that accepts a fixed byte budget and then fails every write.
/// Used to exercise mid-run sink failure.
pub struct FailingSink {
    budget: usize,
}

impl FailingSink {
    pub fn with_budget(budget: usize) -> Self {
        Self { budget }
    }
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget < buf.len() {
            return Err(io::Error::other("sink budget exhausted"));
        }
        self.budget -= buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
