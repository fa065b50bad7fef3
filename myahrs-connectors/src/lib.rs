//! Host-side Connectors for the myAHRS+ Bridge
//!
//! ## Overview
//!
//! `myahrs-core` publishes through the [`MessageSink`] and [`TransformSink`]
//! traits and reads devices through [`SampleSource`]. This crate provides
//! implementations that live on a host with a filesystem and threads:
//!
//! | Connector | Direction | Use |
//! |-----------|-----------|-----|
//! | [`JsonLinesSink`] | out | one JSON record per line to any `Write` (file, stdout, socket) |
//! | [`ChannelSink`] | out | hand records to another thread over `std::sync::mpsc` |
//! | [`JsonLinesSource`] | in | replay recorded device events from a JSON lines file |
//!
//! plus [`load_config`] for reading a [`DriverConfig`] from disk.
//!
//! ## Record Format
//!
//! Sinks write [`Record`] values, tagged by `kind`:
//!
//! ```text
//! {"kind":"imu","header":{"stamp":1700000000000,"frame_id":"imu_base"},"orientation":{...},...}
//! {"kind":"tf","header":{...},"child_frame_id":"imu","translation":{...},"rotation":{...}}
//! ```
//!
//! Replay files hold [`SourceEvent`] values, tagged by `event`:
//!
//! ```text
//! {"event":"sample","sensor_id":0,"sample":{"quaternion":{...},"imu":{...}}}
//! {"event":"attribute_change","sensor_id":0,"name":"divider","value":"1"}
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use myahrs_connectors::{JsonLinesSink, JsonLinesSource};
//! use myahrs_core::{session, time::SystemTime, AcquisitionHandler, Publisher, SampleStore};
//!
//! let sink = JsonLinesSink::new(std::io::stdout());
//! let publisher = Publisher::new(sink.clone(), sink, SystemTime);
//! let mut handler = AcquisitionHandler::new(Arc::new(SampleStore::new()), publisher);
//!
//! let mut source = JsonLinesSource::from_path("capture.jsonl")?;
//! let stop = std::sync::atomic::AtomicBool::new(false);
//! session::drive(&mut source, &mut handler, &stop, std::time::Duration::from_millis(1))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`MessageSink`]: myahrs_core::MessageSink
//! [`TransformSink`]: myahrs_core::TransformSink
//! [`SampleSource`]: myahrs_core::SampleSource
//! [`DriverConfig`]: myahrs_core::DriverConfig
//! [`Record`]: myahrs_core::Record
//! [`SourceEvent`]: myahrs_core::SourceEvent

pub mod channel;
pub mod config;
pub mod json;
pub mod replay;

pub use channel::ChannelSink;
pub use config::{load_config, parse_config};
pub use json::JsonLinesSink;
pub use replay::{JsonLinesSource, ReplayStats};

use myahrs_core::{SessionError, SinkError};
use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] myahrs_core::ConfigError),

    #[error("Receiver disconnected")]
    Disconnected,

    #[error("Channel full")]
    Full,
}

impl From<&ConnectorError> for SinkError {
    fn from(error: &ConnectorError) -> Self {
        match error {
            ConnectorError::Io(_) => SinkError::Io,
            ConnectorError::Serialization(_) => SinkError::Rejected { reason: "serialization" },
            ConnectorError::Config(_) => SinkError::Rejected { reason: "configuration" },
            ConnectorError::Disconnected => SinkError::Disconnected,
            ConnectorError::Full => SinkError::Full,
        }
    }
}

impl From<&ConnectorError> for SessionError {
    fn from(error: &ConnectorError) -> Self {
        match error {
            ConnectorError::Disconnected => SessionError::NotConnected,
            _ => SessionError::Transport,
        }
    }
}

/// Trait for all output connectors
pub trait Connector {
    /// Check if the downstream end is still there
    fn is_connected(&self) -> bool;

    /// Get connection statistics
    fn stats(&self) -> ConnectionStats;
}

/// Connection statistics common to all connectors
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Total records delivered
    pub records_sent: u64,
    /// Total records that failed
    pub records_failed: u64,
    /// Total bytes written (zero for in-process channels)
    pub bytes_sent: u64,
    /// Last error message
    pub last_error: Option<String>,
}

impl ConnectionStats {
    pub(crate) fn record_success(&mut self, bytes: usize) {
        self.records_sent += 1;
        self.bytes_sent += bytes as u64;
    }

    pub(crate) fn record_failure(&mut self, error: &ConnectorError) {
        self.records_failed += 1;
        self.last_error = Some(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_core_kinds() {
        let io = ConnectorError::Io(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"));
        assert_eq!(SinkError::from(&io), SinkError::Io);
        assert_eq!(SessionError::from(&io), SessionError::Transport);
        assert_eq!(SinkError::from(&ConnectorError::Full), SinkError::Full);
        assert_eq!(
            SessionError::from(&ConnectorError::Disconnected),
            SessionError::NotConnected
        );
    }

    #[test]
    fn stats_keep_last_error() {
        let mut stats = ConnectionStats::default();
        stats.record_success(10);
        stats.record_failure(&ConnectorError::Disconnected);

        assert_eq!(stats.records_sent, 1);
        assert_eq!(stats.bytes_sent, 10);
        assert_eq!(stats.records_failed, 1);
        assert_eq!(stats.last_error.as_deref(), Some("Receiver disconnected"));
    }
}
