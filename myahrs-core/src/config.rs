//! Driver configuration
//!
//! Defaults reproduce the stock sensor setup: `/dev/ttyACM1` at 115200 baud,
//! 100 Hz output, frames `imu_base` → `imu` with the sensor 0.1 m above the
//! base origin, publication inline on the acquisition thread.
//!
//! All structs deserialize with per-field defaults, so a config file only
//! names what it changes:
//!
//! ```json
//! { "device": { "port": "/dev/ttyUSB0" }, "publish": { "mode": "decoupled" } }
//! ```

use crate::{
    constants::frames::{IMU_BASE_FRAME, IMU_FRAME, SENSOR_OFFSET_Z_M},
    errors::ConfigError,
    types::{frame_id, FrameId, Vector3},
};

#[cfg(feature = "std")]
use crate::constants::{
    device::{
        BASE_OUTPUT_RATE_HZ, BINARY_DATA_FORMAT, DEFAULT_BAUD_RATE, DEFAULT_DIVIDER,
        DEFAULT_SERIAL_PORT, OUTPUT_MODE,
    },
    time::DEFAULT_IDLE_TIMEOUT_MS,
};
#[cfg(feature = "std")]
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Frames stamped on published records
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FrameConfig {
    /// Base frame; also the IMU message frame
    pub parent: FrameId,
    /// Sensor frame
    pub child: FrameId,
    /// Fixed sensor offset in the base frame (m)
    pub translation: Vector3<f64>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            parent: frame_id(IMU_BASE_FRAME).unwrap_or_default(),
            child: frame_id(IMU_FRAME).unwrap_or_default(),
            translation: Vector3::new(0.0, 0.0, SENSOR_OFFSET_Z_M),
        }
    }
}

impl FrameConfig {
    /// Check frame ids and translation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parent.is_empty() {
            return Err(ConfigError::EmptyFrameId { which: "parent" });
        }
        if self.child.is_empty() {
            return Err(ConfigError::EmptyFrameId { which: "child" });
        }
        if self.parent == self.child {
            return Err(ConfigError::SameFrames);
        }
        if !self.translation.is_finite() {
            return Err(ConfigError::NonFiniteTranslation);
        }
        Ok(())
    }
}

/// Parameters handed to the device session during initialization
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Serial device path
    pub port: String,
    /// Link speed (baud)
    pub baud_rate: u32,
    /// Output rate divider (100 Hz / divider)
    pub divider: u32,
    /// Binary frame contents requested from the sensor
    pub binary_format: String,
    /// Output mode requested from the sensor
    pub mode: String,
}

#[cfg(feature = "std")]
impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            divider: DEFAULT_DIVIDER,
            binary_format: BINARY_DATA_FORMAT.to_string(),
            mode: OUTPUT_MODE.to_string(),
        }
    }
}

#[cfg(feature = "std")]
impl DeviceConfig {
    /// Use a different serial device
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    /// Use a different output divider
    pub fn with_divider(mut self, divider: u32) -> Self {
        self.divider = divider;
        self
    }

    /// Sample rate the sensor will deliver with this divider (Hz)
    pub fn output_rate_hz(&self) -> f64 {
        f64::from(BASE_OUTPUT_RATE_HZ) / f64::from(self.divider.max(1))
    }

    /// Reject zero baud rate or divider
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.baud_rate == 0 {
            return Err(ConfigError::ZeroParameter { field: "baud_rate" });
        }
        if self.divider == 0 {
            return Err(ConfigError::ZeroParameter { field: "divider" });
        }
        Ok(())
    }
}

/// Where publication runs
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishMode {
    /// Publish synchronously after every write, on the acquisition thread
    #[default]
    Inline,
    /// Publish from a worker thread; intermediate samples may be skipped
    Decoupled,
}

/// Publication settings
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    #[allow(missing_docs)]
    pub mode: PublishMode,
    /// Worker wait before re-checking its stop flag (ms)
    pub idle_timeout_ms: u64,
}

#[cfg(feature = "std")]
impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            mode: PublishMode::Inline,
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
        }
    }
}

#[cfg(feature = "std")]
impl PublishConfig {
    /// Idle timeout as a [`Duration`]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}

/// Complete driver configuration
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    #[allow(missing_docs)]
    pub device: DeviceConfig,
    #[allow(missing_docs)]
    pub frames: FrameConfig,
    #[allow(missing_docs)]
    pub publish: PublishConfig,
}

#[cfg(feature = "std")]
impl DriverConfig {
    /// Replace the device section
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Replace the frame section
    pub fn with_frames(mut self, frames: FrameConfig) -> Self {
        self.frames = frames;
        self
    }

    /// Select where publication runs
    pub fn with_publish_mode(mut self, mode: PublishMode) -> Self {
        self.publish.mode = mode;
        self
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.device.validate()?;
        self.frames.validate()?;
        Ok(())
    }
}
