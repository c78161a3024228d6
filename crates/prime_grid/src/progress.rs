//! src/progress.rs
//!
//! Progress reporter: a pure observer of queue counters.
//!
//! Runs on its own named thread and waits on a shutdown channel with
//! `recv_timeout` as its tick — each timeout logs a status line from the
//! queue's relaxed counter snapshots. It never mutates queue or collector
//! state and has no effect on correctness.

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::info;

use crate::queue::ChunkQueue;

pub(crate) struct ProgressReporter {
    stop_tx: Sender<()>,
    handle: thread::JoinHandle<()>,
}

impl ProgressReporter {
    /// Spawns the reporter thread, emitting one status line per `interval`.
    ///
    /// The thread exits on its own once all chunks are completed, or when
    /// `stop()` signals it.
    pub(crate) fn spawn(queue: Arc<ChunkQueue>, interval: Duration) -> Result<Self> {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("prime-progress".to_string())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {
                        info!(
                            "progress: {:.2}%, {} of {} chunks remaining",
                            queue.progress(),
                            queue.remaining(),
                            queue.total_chunks()
                        );
                        if queue.all_completed() {
                            break;
                        }
                    }
                }
            })
            .context("failed to spawn progress reporter thread")?;

        Ok(Self { stop_tx, handle })
    }

    /// Signals the reporter to stop and waits for it to exit.
    pub(crate) fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.handle.join();
    }
}
