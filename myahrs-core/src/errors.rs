//! Error Types for the Sample Pipeline
//!
//! ## Design Philosophy
//!
//! Errors travel with every rejected sample at sensor rate (100 Hz by
//! default), so they follow the same rules as the rest of the hot path:
//!
//! 1. **Small and `Copy`**: no `String`, only `&'static str` and numbers.
//! 2. **Per-sample**: conversion and publish failures describe one sample;
//!    they never stop acquisition.
//! 3. **Named stage**: each variant tells which stage failed (validation,
//!    message sink, transform sink, store, device session).
//!
//! ## Taxonomy
//!
//! ```text
//! ConversionError   non-finite or out-of-range converter input
//! SinkError         a sink refused or failed to deliver a record
//! PublishError      ConversionError | SinkError (message or transform) | no sample
//! StoreError        read before the first write (precondition violation)
//! AcquisitionError  sample rejected before the write | publish failed after it
//! SessionError      device session transport / handshake failures
//! InitError         which handshake step failed during initialization
//! ```
//!
//! Nothing in the core retries. Link-level reconnection belongs to the device
//! session implementation.

use thiserror_no_std::Error;

/// Result type for converter operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Result type for the publication driver
pub type PublishResult<T> = Result<T, PublishError>;

/// Result type for store reads
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for device session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Input the converter refuses to map
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConversionError {
    /// A component is NaN or infinite
    #[error("Non-finite value in {field}")]
    NonFinite {
        /// Which field carried the bad value (e.g. `"quaternion"`, `"imu.gyro"`)
        field: &'static str,
    },

    /// Quaternion norm is too far from 1 to be an orientation
    #[error("Quaternion norm {norm} outside unit tolerance {tolerance}")]
    QuaternionNotNormalized {
        /// Measured norm
        norm: f64,
        /// Accepted deviation from 1.0
        tolerance: f64,
    },
}

/// Failure reported by a message or transform sink
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// The downstream consumer went away
    #[error("Sink disconnected")]
    Disconnected,

    /// The sink cannot accept more records right now
    #[error("Sink buffer full")]
    Full,

    /// The sink refused the record
    #[error("Sink rejected record: {reason}")]
    Rejected {
        /// Short description of the refusal
        reason: &'static str,
    },

    /// Underlying I/O failed
    #[error("Sink I/O failure")]
    Io,
}

/// Failure of one publication attempt
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PublishError {
    /// The stored sample could not be converted
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// The message sink failed
    #[error("Message sink failed: {0}")]
    Message(SinkError),

    /// The transform sink failed
    #[error("Transform sink failed: {0}")]
    Transform(SinkError),

    /// The store held no sample to publish
    #[error("No sample available to publish")]
    NoSample,
}

/// Contract violations on the shared sample store
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// `read()` was called before any `write()`
    #[error("Sample store read before first write")]
    Uninitialized,
}

/// Why the acquisition handler dropped a sample
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AcquisitionError {
    /// Sample failed validation and was never written
    #[error("Sample rejected: {0}")]
    Rejected(ConversionError),

    /// Sample was stored but its publication failed
    #[error("Publish of sample #{sequence} failed: {error}")]
    Publish {
        /// Sequence number the sample was stored under
        sequence: u64,
        /// What went wrong downstream
        error: PublishError,
    },
}

/// Device session failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The session has not been started or lost its link
    #[error("Device not connected")]
    NotConnected,

    /// The device did not acknowledge a configuration command
    #[error("Device rejected command {command}")]
    CommandRejected {
        /// Command name as sent to the device
        command: &'static str,
    },

    /// No acknowledgement within the session timeout
    #[error("Device timed out")]
    Timeout,

    /// The sample stream ended
    #[error("Sample stream closed")]
    Closed,

    /// Transport-level failure (serial port, file, socket)
    #[error("Transport failure")]
    Transport,
}

/// Device initialization failure, naming the handshake step
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// Opening the session failed
    #[error("Failed to start device session: {0}")]
    Start(SessionError),

    /// A configuration command failed
    #[error("Handshake step {step} failed: {error}")]
    Command {
        /// Name of the failing step
        step: &'static str,
        /// Underlying session failure
        error: SessionError,
    },
}

/// Rejected driver configuration
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A frame identifier is empty
    #[error("Frame id for {which} is empty")]
    EmptyFrameId {
        /// `"parent"` or `"child"`
        which: &'static str,
    },

    /// Parent and child frame are the same
    #[error("Parent and child frame ids are identical")]
    SameFrames,

    /// Translation contains NaN or infinity
    #[error("Frame translation is not finite")]
    NonFiniteTranslation,

    /// A device parameter is zero
    #[error("Device parameter {field} must be non-zero")]
    ZeroParameter {
        /// Offending field
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_converts_into_publish_error() {
        let err: PublishError = ConversionError::NonFinite { field: "imu.gyro" }.into();
        assert_eq!(
            err,
            PublishError::Conversion(ConversionError::NonFinite { field: "imu.gyro" })
        );
    }

    #[test]
    fn errors_stay_small() {
        // Returned once per sample; keep them register-sized
        assert!(core::mem::size_of::<SinkError>() <= 24);
        assert!(core::mem::size_of::<PublishError>() <= 32);
    }
}
