//! Acquisition and Publication Pipeline
//!
//! ## Overview
//!
//! ```text
//! device session ─→ AcquisitionHandler ─→ SampleStore ─→ SampleDispatch ─→ sinks
//!                   validate, derive rpy     write          Publisher (inline)
//!                                                           Deferred + PublishWorker
//! ```
//!
//! ## Module Organization
//!
//! - `acquisition` - the sole writer: validates, derives Euler angles,
//!   writes, then dispatches
//! - `publish` - the publication driver: reads a snapshot, converts, hands
//!   the message and transform to their sinks
//! - `worker` - runs a publisher on its own thread for decoupled mode
//!
//! ## Ordering
//!
//! Inline dispatch publishes every accepted sample, in acceptance order, on
//! the acquisition thread. Decoupled dispatch publishes in sequence order
//! but only the newest sample present when the worker wakes: intermediate
//! samples are skipped and counted.

pub mod acquisition;
pub mod publish;
pub mod worker;

pub use acquisition::{AcquisitionHandler, AcquisitionStats};
pub use publish::Publisher;
pub use worker::{PublishWorker, WorkerStats};

use crate::errors::PublishResult;
use crate::store::Snapshot;

/// What the acquisition handler does after a successful write
///
/// Receives the sample exactly as written, with its sequence number, and
/// runs outside the store's lock.
pub trait SampleDispatch {
    /// React to `written` having just been stored
    fn dispatch(&mut self, written: &Snapshot) -> PublishResult<()>;
}

/// Leave publication to a [`PublishWorker`]
///
/// The store's write already wakes the worker, so there is nothing to do
/// here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deferred;

impl SampleDispatch for Deferred {
    fn dispatch(&mut self, _written: &Snapshot) -> PublishResult<()> {
        Ok(())
    }
}
