//! Publication driver
//!
//! Stateless per call: take one sample, stamp it once, convert it, hand the
//! message and then the transform to their sinks. A sink error is returned
//! as is; nothing is retried and the transform is not sent if the message
//! failed.

use crate::{
    config::FrameConfig,
    convert,
    errors::{PublishError, PublishResult},
    store::{SampleStore, Snapshot},
    time::{TimeSource, Timestamp},
    traits::{MessageSink, TransformSink},
    types::FusedSample,
};

use super::SampleDispatch;

/// Converts samples and forwards them to a message and a transform sink
#[derive(Debug)]
pub struct Publisher<M, T, C> {
    message_sink: M,
    transform_sink: T,
    clock: C,
    frames: FrameConfig,
}

impl<M, T, C> Publisher<M, T, C>
where
    M: MessageSink,
    T: TransformSink,
    C: TimeSource,
{
    /// Create a publisher with the default `imu_base` → `imu` frames
    pub fn new(message_sink: M, transform_sink: T, clock: C) -> Self {
        Self {
            message_sink,
            transform_sink,
            clock,
            frames: FrameConfig::default(),
        }
    }

    /// Use different frames or mounting offset
    pub fn with_frames(mut self, frames: FrameConfig) -> Self {
        self.frames = frames;
        self
    }

    /// Frames stamped on published records
    pub fn frames(&self) -> &FrameConfig {
        &self.frames
    }

    /// Publish one sample
    ///
    /// The message and the transform share one stamp read from the clock at
    /// this call. Both are converted before either is sent, so a conversion
    /// error publishes nothing.
    pub fn publish(&mut self, sample: &FusedSample) -> PublishResult<Timestamp> {
        let stamp = self.clock.now();

        let message = convert::to_imu_message(sample, &self.frames.parent, stamp)?;
        let transform = convert::to_transform(sample, &self.frames, stamp)?;

        self.message_sink
            .publish_message(&message)
            .map_err(PublishError::Message)?;
        self.transform_sink
            .publish_transform(&transform)
            .map_err(PublishError::Transform)?;

        Ok(stamp)
    }

    /// Publish whatever the store currently holds
    pub fn publish_latest(&mut self, store: &SampleStore) -> PublishResult<u64> {
        let snapshot = store.latest().ok_or(PublishError::NoSample)?;
        self.publish(&snapshot.sample)?;
        Ok(snapshot.sequence)
    }
}

impl<M, T, C> SampleDispatch for Publisher<M, T, C>
where
    M: MessageSink,
    T: TransformSink,
    C: TimeSource,
{
    fn dispatch(&mut self, written: &Snapshot) -> PublishResult<()> {
        self.publish(&written.sample).map(|_| ())
    }
}
