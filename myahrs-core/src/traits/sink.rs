//! Publication sinks
//!
//! The publication driver hands each finished record to a sink and reports
//! the sink's error unchanged. Sinks must not block for long: on the inline
//! path they run on the acquisition thread.
//!
//! ## Example Implementation
//!
//! ```rust
//! use myahrs_core::{ImuMessage, MessageSink, SinkError};
//!
//! struct CountingSink(usize);
//!
//! impl MessageSink for CountingSink {
//!     fn publish_message(&mut self, _message: &ImuMessage) -> Result<(), SinkError> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//! ```

use crate::errors::SinkResult;
use crate::types::{ImuMessage, SpatialTransform};

/// Receives one kinematic message per published sample
pub trait MessageSink {
    /// Deliver a message
    fn publish_message(&mut self, message: &ImuMessage) -> SinkResult<()>;
}

/// Receives one spatial transform per published sample
pub trait TransformSink {
    /// Deliver a transform
    fn publish_transform(&mut self, transform: &SpatialTransform) -> SinkResult<()>;
}

impl<S: MessageSink + ?Sized> MessageSink for &mut S {
    fn publish_message(&mut self, message: &ImuMessage) -> SinkResult<()> {
        (**self).publish_message(message)
    }
}

impl<S: TransformSink + ?Sized> TransformSink for &mut S {
    fn publish_transform(&mut self, transform: &SpatialTransform) -> SinkResult<()> {
        (**self).publish_transform(transform)
    }
}
