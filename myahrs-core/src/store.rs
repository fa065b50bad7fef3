//! Shared Sample Store
//!
//! ## Overview
//!
//! A single slot holding the most recent [`FusedSample`] and a sequence
//! counter, shared between the acquisition side (sole writer) and the
//! publication side (sole reader).
//!
//! ## Locking Discipline
//!
//! One mutex guards both the sample and the counter, so they change together:
//!
//! ```text
//! write(sample):  lock ─ slot.sample = sample ─ slot.sequence += 1 ─ unlock ─ notify
//! read():         lock ─ copy slot ─ unlock
//! ```
//!
//! - Writes are serialized against each other.
//! - A read never interleaves with a write, so it can't see a sample with
//!   fields from two writes, nor a counter ahead of its sample.
//! - Critical sections are a copy in or a copy out. No I/O, no conversion and
//!   no callback runs while the lock is held.
//!
//! ## Poisoning
//!
//! A panic cannot leave the slot half-written: the sample is `Copy` and is
//! stored with a single assignment before the counter moves. A poisoned lock
//! is therefore recovered rather than propagated.
//!
//! ## Waiting
//!
//! [`SampleStore::wait_newer`] lets a publisher on another thread block until
//! the counter passes a known value. It always returns the latest sample;
//! samples written in between are not queued.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::errors::{StoreError, StoreResult};
use crate::types::FusedSample;

/// A sample together with the sequence number it was written under
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// 1 for the first write, incremented by every write
    pub sequence: u64,
    #[allow(missing_docs)]
    pub sample: FusedSample,
}

#[derive(Debug, Default)]
struct Slot {
    sequence: u64,
    sample: Option<FusedSample>,
}

impl Slot {
    fn snapshot(&self) -> Option<Snapshot> {
        self.sample.map(|sample| Snapshot {
            sequence: self.sequence,
            sample,
        })
    }
}

/// Single-slot, lock-guarded store for the latest fused sample
#[derive(Debug, Default)]
pub struct SampleStore {
    slot: Mutex<Slot>,
    updated: Condvar,
}

impl SampleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored sample and advance the counter as one unit
    ///
    /// Returns the sequence number assigned to `sample`.
    pub fn write(&self, sample: FusedSample) -> u64 {
        let sequence = {
            let mut slot = self.lock();
            slot.sample = Some(sample);
            slot.sequence += 1;
            slot.sequence
        };
        self.updated.notify_all();
        sequence
    }

    /// Copy of the current sample
    ///
    /// Calling this before the first [`write`](Self::write) is a contract
    /// violation: it panics in debug builds and returns
    /// [`StoreError::Uninitialized`] otherwise.
    pub fn read(&self) -> StoreResult<FusedSample> {
        let sample = self.lock().sample;
        debug_assert!(sample.is_some(), "sample store read before first write");
        sample.ok_or(StoreError::Uninitialized)
    }

    /// Current sample and its sequence number, `None` before the first write
    pub fn latest(&self) -> Option<Snapshot> {
        self.lock().snapshot()
    }

    /// Number of writes so far
    pub fn sequence(&self) -> u64 {
        self.lock().sequence
    }

    /// Block until the counter exceeds `after` or `timeout` elapses
    ///
    /// Returns the latest snapshot when newer data arrived, `None` on
    /// timeout.
    pub fn wait_newer(&self, after: u64, timeout: Duration) -> Option<Snapshot> {
        let guard = self.lock();
        let (slot, _) = self
            .updated
            .wait_timeout_while(guard, timeout, |slot| slot.sequence <= after)
            .unwrap_or_else(PoisonError::into_inner);

        if slot.sequence > after {
            slot.snapshot()
        } else {
            None
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
