//! Device session contract
//!
//! The device session owns the serial link and the binary protocol. The core
//! only sees it through [`SampleSource`]: start it, send configuration
//! commands, and poll decoded events. Events are dispatched to a
//! [`SampleListener`], normally the acquisition handler.
//!
//! ```text
//! SampleSource::poll_event ─→ drive() ─→ SampleListener::on_sample
//!                                     └→ SampleListener::on_attribute_change
//! ```
//!
//! Polling uses `nb` so a source can report "nothing yet" without blocking
//! and without being an error.

use serde::{Deserialize, Serialize};

use crate::errors::{SessionError, SessionResult};
use crate::session::DeviceCommand;
use crate::types::RawSample;

/// Something the device session decoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SourceEvent {
    /// A sample frame
    Sample {
        /// Sensor that produced the frame
        sensor_id: i32,
        /// Decoded contents
        sample: RawSample,
    },

    /// A configuration acknowledgement (informational)
    AttributeChange {
        /// Sensor that acknowledged
        sensor_id: i32,
        /// Attribute name
        name: String,
        /// New value as reported
        value: String,
    },
}

/// A device session the core can drive
pub trait SampleSource {
    /// Open the link
    fn start(&mut self) -> SessionResult<()>;

    /// Send one configuration command and wait for its acknowledgement
    fn send_command(&mut self, command: &DeviceCommand) -> SessionResult<()>;

    /// Next decoded event, `WouldBlock` if none is pending
    ///
    /// `Err(Other(SessionError::Closed))` ends the stream.
    fn poll_event(&mut self) -> nb::Result<SourceEvent, SessionError>;
}

/// Receives decoded events in arrival order
pub trait SampleListener {
    /// One decoded sample frame
    fn on_sample(&mut self, sensor_id: i32, sample: RawSample);

    /// One configuration acknowledgement
    fn on_attribute_change(&mut self, sensor_id: i32, name: &str, value: &str);
}

impl<S: SampleSource + ?Sized> SampleSource for &mut S {
    fn start(&mut self) -> SessionResult<()> {
        (**self).start()
    }

    fn send_command(&mut self, command: &DeviceCommand) -> SessionResult<()> {
        (**self).send_command(command)
    }

    fn poll_event(&mut self) -> nb::Result<SourceEvent, SessionError> {
        (**self).poll_event()
    }
}
