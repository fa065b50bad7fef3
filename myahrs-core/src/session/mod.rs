//! Device Session Control
//!
//! ## Overview
//!
//! Brings a device session up and pumps its events into a listener:
//!
//! ```text
//! initialize():  start ─→ BinaryDataFormat("QUATERNION, IMU") ─→ Divider(n) ─→ Mode("BC")
//! drive():       loop { poll_event ─→ listener } until stop flag or stream closed
//! ```
//!
//! Each handshake step must be acknowledged before the next is sent. The
//! first failure aborts initialization and is returned as an [`InitError`]
//! naming the step; the caller decides whether the process exits.
//!
//! [`MemorySource`] is an in-process session that replays scripted events,
//! for tests and offline runs.

pub mod memory;

pub use memory::MemorySource;

use core::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    config::DeviceConfig,
    errors::{InitError, SessionError},
    traits::{SampleListener, SampleSource, SourceEvent},
};

/// Configuration command sent to the sensor during initialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum DeviceCommand {
    /// Select the binary frame contents
    BinaryDataFormat(String),
    /// Set the output rate divider (100 Hz / n)
    Divider(u32),
    /// Select the output mode
    Mode(String),
}

impl DeviceCommand {
    /// Handshake step name, as used in errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            DeviceCommand::BinaryDataFormat(_) => "binary_data_format",
            DeviceCommand::Divider(_) => "divider",
            DeviceCommand::Mode(_) => "mode",
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceCommand::BinaryDataFormat(format) => write!(f, "{}={}", self.name(), format),
            DeviceCommand::Divider(divider) => write!(f, "{}={}", self.name(), divider),
            DeviceCommand::Mode(mode) => write!(f, "{}={}", self.name(), mode),
        }
    }
}

/// Commands sent after `start`, in order
pub fn handshake_plan(config: &DeviceConfig) -> Vec<DeviceCommand> {
    vec![
        DeviceCommand::BinaryDataFormat(config.binary_format.clone()),
        DeviceCommand::Divider(config.divider),
        DeviceCommand::Mode(config.mode.clone()),
    ]
}

/// Start the session and run the configuration handshake
pub fn initialize<S: SampleSource>(source: &mut S, config: &DeviceConfig) -> Result<(), InitError> {
    log::info!("starting device session on {} @ {} baud", config.port, config.baud_rate);
    source.start().map_err(InitError::Start)?;

    for command in handshake_plan(config) {
        log::debug!("sending {}", command);
        source.send_command(&command).map_err(|error| InitError::Command {
            step: command.name(),
            error,
        })?;
    }

    log::info!(
        "device initialized: format \"{}\", {} Hz (divider {}), mode {}",
        config.binary_format,
        config.output_rate_hz(),
        config.divider,
        config.mode
    );
    Ok(())
}

/// Counters from one [`drive`] run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DriveStats {
    /// Sample events delivered to the listener
    pub samples: u64,
    /// Attribute events delivered to the listener
    pub attribute_changes: u64,
    /// Polls that found nothing pending
    pub idle_polls: u64,
}

/// Deliver events from `source` to `listener` until `stop` is set or the
/// stream closes
///
/// Sleeps `poll_interval` whenever the source has nothing pending. A closed
/// stream ends the run normally; any other session error is returned.
pub fn drive<S, L>(
    source: &mut S,
    listener: &mut L,
    stop: &AtomicBool,
    poll_interval: Duration,
) -> Result<DriveStats, SessionError>
where
    S: SampleSource,
    L: SampleListener,
{
    let mut stats = DriveStats::default();

    while !stop.load(Ordering::Acquire) {
        match source.poll_event() {
            Ok(SourceEvent::Sample { sensor_id, sample }) => {
                stats.samples += 1;
                listener.on_sample(sensor_id, sample);
            }
            Ok(SourceEvent::AttributeChange { sensor_id, name, value }) => {
                stats.attribute_changes += 1;
                listener.on_attribute_change(sensor_id, &name, &value);
            }
            Err(nb::Error::WouldBlock) => {
                stats.idle_polls += 1;
                thread::sleep(poll_interval);
            }
            Err(nb::Error::Other(SessionError::Closed)) => {
                log::info!("sample stream closed after {} samples", stats.samples);
                break;
            }
            Err(nb::Error::Other(error)) => {
                log::error!("device session failed: {}", error);
                return Err(error);
            }
        }
    }

    Ok(stats)
}
