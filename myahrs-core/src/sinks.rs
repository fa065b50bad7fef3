//! In-memory sink for tests and replay
//!
//! Records everything it receives in arrival order. Clones share the same
//! record list, so one clone can be handed to the publisher as message sink,
//! another as transform sink, and a third kept by the test to inspect.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::errors::{SinkError, SinkResult};
use crate::traits::{MessageSink, TransformSink};
use crate::types::{ImuMessage, Record, SpatialTransform};

#[derive(Debug, Default)]
struct Inner {
    records: Vec<Record>,
    failure: Option<SinkError>,
}

/// Shared, recording sink
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySink {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following publish fail with `failure` (or succeed again
    /// with `None`)
    pub fn set_failure(&self, failure: Option<SinkError>) {
        self.lock().failure = failure;
    }

    /// Copy of everything recorded so far
    pub fn records(&self) -> Vec<Record> {
        self.lock().records.clone()
    }

    /// Recorded IMU messages, oldest first
    pub fn messages(&self) -> Vec<ImuMessage> {
        self.lock()
            .records
            .iter()
            .filter_map(|r| match r {
                Record::Imu(m) => Some(m.clone()),
                Record::Tf(_) => None,
            })
            .collect()
    }

    /// Recorded transforms, oldest first
    pub fn transforms(&self) -> Vec<SpatialTransform> {
        self.lock()
            .records
            .iter()
            .filter_map(|r| match r {
                Record::Tf(t) => Some(t.clone()),
                Record::Imu(_) => None,
            })
            .collect()
    }

    /// Number of records received
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    /// True when nothing was received
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.lock().records.clear();
    }

    fn push(&self, record: Record) -> SinkResult<()> {
        let mut inner = self.lock();
        if let Some(failure) = inner.failure {
            return Err(failure);
        }
        inner.records.push(record);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MessageSink for MemorySink {
    fn publish_message(&mut self, message: &ImuMessage) -> SinkResult<()> {
        self.push(Record::Imu(message.clone()))
    }
}

impl TransformSink for MemorySink {
    fn publish_transform(&mut self, transform: &SpatialTransform) -> SinkResult<()> {
        self.push(Record::Tf(transform.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{frame_id, Header, Quaternion, Vector3};

    fn message(stamp: u64) -> ImuMessage {
        ImuMessage {
            header: Header { stamp, frame_id: frame_id("imu_base").unwrap() },
            orientation: Quaternion::IDENTITY,
            angular_velocity: Vector3::default(),
            linear_acceleration: Vector3::default(),
        }
    }

    #[test]
    fn clones_share_records() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();

        writer.publish_message(&message(1)).unwrap();
        writer.publish_message(&message(2)).unwrap();

        let stamps: Vec<u64> = sink.messages().iter().map(|m| m.header.stamp).collect();
        assert_eq!(stamps, vec![1, 2]);
        assert!(sink.transforms().is_empty());
    }

    #[test]
    fn injected_failure_is_returned() {
        let mut sink = MemorySink::new();
        sink.set_failure(Some(SinkError::Full));

        assert_eq!(sink.publish_message(&message(1)), Err(SinkError::Full));
        assert!(sink.is_empty());

        sink.set_failure(None);
        assert!(sink.publish_message(&message(2)).is_ok());
        assert_eq!(sink.len(), 1);
    }
}
