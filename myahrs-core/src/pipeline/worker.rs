//! Decoupled publication
//!
//! Runs a [`Publisher`] on its own thread so slow sinks never hold up the
//! acquisition thread.
//!
//! ## Drop Policy
//!
//! Last write wins. The worker waits for the store's sequence to pass the
//! last one it published, then publishes whatever is newest at that moment.
//! Samples written while a publish is in progress are skipped and counted in
//! [`WorkerStats::skipped`]. Published sequence numbers are strictly
//! increasing, so order is preserved for what does get published.
//!
//! ## Shutdown
//!
//! The wait is bounded by the idle timeout, after which the stop flag is
//! checked. No lock is held while publishing, so stopping never deadlocks;
//! it takes at most one idle timeout plus two publishes. Before exiting the
//! worker publishes the newest sample if it has not been attempted yet, so
//! the last write before `stop()` always reaches the sinks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::{
    store::{SampleStore, Snapshot},
    time::TimeSource,
    traits::{MessageSink, TransformSink},
};

use super::Publisher;

/// Counters kept by the publish worker
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    /// Samples handed to both sinks
    pub published: u64,
    /// Samples overwritten before the worker reached them
    pub skipped: u64,
    /// Publish attempts that returned an error
    pub failures: u64,
    /// Sequence number of the last sample attempted
    pub last_sequence: u64,
}

/// Handle to a running publish thread
///
/// Dropping the handle stops the thread and waits for it.
#[derive(Debug)]
pub struct PublishWorker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<WorkerStats>>,
}

impl PublishWorker {
    /// Spawn a thread publishing from `store` until stopped
    pub fn spawn<M, T, C>(
        store: Arc<SampleStore>,
        publisher: Publisher<M, T, C>,
        idle_timeout: Duration,
    ) -> std::io::Result<Self>
    where
        M: MessageSink + Send + 'static,
        T: TransformSink + Send + 'static,
        C: TimeSource + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("myahrs-publish".into())
            .spawn(move || run(&store, publisher, &flag, idle_timeout))?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Ask the thread to finish, wait for it and return its counters
    pub fn stop(mut self) -> WorkerStats {
        self.shutdown()
    }

    fn shutdown(&mut self) -> WorkerStats {
        self.stop.store(true, Ordering::Release);
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                log::error!("publish worker panicked");
                WorkerStats::default()
            }),
            None => WorkerStats::default(),
        }
    }
}

impl Drop for PublishWorker {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.shutdown();
        }
    }
}

fn run<M, T, C>(
    store: &SampleStore,
    mut publisher: Publisher<M, T, C>,
    stop: &AtomicBool,
    idle_timeout: Duration,
) -> WorkerStats
where
    M: MessageSink,
    T: TransformSink,
    C: TimeSource,
{
    let mut stats = WorkerStats::default();
    log::debug!("publish worker started");

    while !stop.load(Ordering::Acquire) {
        if let Some(snapshot) = store.wait_newer(stats.last_sequence, idle_timeout) {
            publish_snapshot(&mut publisher, &snapshot, &mut stats);
        }
    }

    // Drain whatever was written while the last publish was in progress
    if let Some(snapshot) = store.latest().filter(|s| s.sequence > stats.last_sequence) {
        publish_snapshot(&mut publisher, &snapshot, &mut stats);
    }

    log::debug!(
        "publish worker stopped: {} published, {} skipped, {} failed",
        stats.published,
        stats.skipped,
        stats.failures
    );
    stats
}

fn publish_snapshot<M, T, C>(
    publisher: &mut Publisher<M, T, C>,
    snapshot: &Snapshot,
    stats: &mut WorkerStats,
) where
    M: MessageSink,
    T: TransformSink,
    C: TimeSource,
{
    stats.skipped += snapshot.sequence - stats.last_sequence - 1;
    stats.last_sequence = snapshot.sequence;

    match publisher.publish(&snapshot.sample) {
        Ok(_) => stats.published += 1,
        Err(error) => {
            stats.failures += 1;
            log::warn!("publish of sample #{} failed: {}", snapshot.sequence, error);
        }
    }
}
