//! src/backend.rs
//!
//! Execution backend: the seam between the engine and whatever runs it.
//!
//! The engine only needs "a fixed set of execution contexts, each able to run
//! one blocking worker loop to completion". `ExecutionBackend` captures that
//! as a single spawn-with-completion-handle operation, so the scheduling core
//! never hardcodes a particular runtime's primitives. `ThreadBackend` is the
//! default: one named OS thread per context.

use anyhow::{Context, Result};
use std::thread;

use crate::worker::WorkerSummary;

/// A worker loop ready to run on one execution context.
pub type WorkerBody = Box<dyn FnOnce() -> Result<WorkerSummary> + Send + 'static>;

/// Completion handle for one placed worker loop.
pub trait CompletionHandle {
    /// Waits for the worker to finish.
    ///
    /// The outer `Err` means the context panicked; the inner `Result` is the
    /// worker loop's own outcome.
    fn join(self) -> thread::Result<Result<WorkerSummary>>;
}

/// Places worker loops on execution contexts.
pub trait ExecutionBackend {
    type Handle: CompletionHandle;

    /// Runs `work` on the context identified by `context_id`, returning a
    /// handle that resolves when the loop ends.
    fn spawn(&self, context_id: usize, work: WorkerBody) -> Result<Self::Handle>;
}

/// Default backend: one named OS thread per execution context.
pub struct ThreadBackend;

pub struct ThreadHandle(thread::JoinHandle<Result<WorkerSummary>>);

impl CompletionHandle for ThreadHandle {
    fn join(self) -> thread::Result<Result<WorkerSummary>> {
        self.0.join()
    }
}

impl ExecutionBackend for ThreadBackend {
    type Handle = ThreadHandle;

    fn spawn(&self, context_id: usize, work: WorkerBody) -> Result<Self::Handle> {
        let handle = thread::Builder::new()
            .name(format!("prime-worker-{}", context_id))
            .spawn(work)
            .with_context(|| format!("failed to spawn worker thread {}", context_id))?;
        Ok(ThreadHandle(handle))
    }
}
