//! Data model for the sample pipeline
//!
//! Two families of types live here:
//!
//! - **Device side**: [`RawSample`] as decoded by the device session and
//!   [`FusedSample`], the raw sample plus Euler angles derived at write time.
//!   Units are the sensor's own: g, deg/s, µT, degrees.
//! - **Publication side**: [`ImuMessage`] and [`SpatialTransform`] in SI
//!   units (m/s², rad/s, radians), wrapped in [`Record`] for sinks that take
//!   both.
//!
//! Everything here is plain data: `Copy` where possible, no heap.

use crate::constants::frames::FRAME_ID_CAPACITY;
use crate::convert;
use crate::time::Timestamp;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Frame identifier stored inline
pub type FrameId = heapless::String<FRAME_ID_CAPACITY>;

/// Build a [`FrameId`], or `None` if `name` does not fit.
pub fn frame_id(name: &str) -> Option<FrameId> {
    let mut id = FrameId::new();
    id.push_str(name).ok()?;
    Some(id)
}

/// Three-axis vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector3<T> {
    #[allow(missing_docs)]
    pub x: T,
    #[allow(missing_docs)]
    pub y: T,
    #[allow(missing_docs)]
    pub z: T,
}

impl<T> Vector3<T> {
    /// Create a vector from its components
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl Vector3<f32> {
    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Widen to f64 and multiply every component by `factor`
    pub fn scaled(&self, factor: f64) -> Vector3<f64> {
        Vector3 {
            x: f64::from(self.x) * factor,
            y: f64::from(self.y) * factor,
            z: f64::from(self.z) * factor,
        }
    }
}

impl Vector3<f64> {
    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Orientation quaternion, scalar last
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion {
    #[allow(missing_docs)]
    pub x: f64,
    #[allow(missing_docs)]
    pub y: f64,
    #[allow(missing_docs)]
    pub z: f64,
    #[allow(missing_docs)]
    pub w: f64,
}

impl Quaternion {
    /// No rotation
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create from components in x, y, z, w order
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Euclidean norm
    pub fn norm(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w)
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Four-dimensional dot product
    ///
    /// `|a.dot(b)| == 1` for unit quaternions describing the same rotation.
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Roll, pitch and yaw in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EulerAngle {
    /// Rotation about x (deg)
    pub roll: f64,
    /// Rotation about y (deg)
    pub pitch: f64,
    /// Rotation about z (deg)
    pub yaw: f64,
}

impl EulerAngle {
    /// True when no angle is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.roll.is_finite() && self.pitch.is_finite() && self.yaw.is_finite()
    }
}

/// Raw inertial block as the sensor reports it
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImuData {
    /// Linear acceleration (g)
    pub accel: Vector3<f32>,
    /// Angular rate (deg/s)
    pub gyro: Vector3<f32>,
    /// Magnetic field (µT)
    pub mag: Vector3<f32>,
}

/// One decoded frame from the device session
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSample {
    /// Fused orientation
    pub quaternion: Quaternion,
    /// Raw inertial vectors
    pub imu: ImuData,
}

/// Raw sample plus Euler angles derived from its quaternion
///
/// The only way to build one is [`FusedSample::from_raw`], so the angles
/// can never disagree with the quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FusedSample {
    quaternion: Quaternion,
    euler_angle: EulerAngle,
    imu: ImuData,
}

impl FusedSample {
    /// Derive the Euler angles and assemble the sample
    pub fn from_raw(raw: &RawSample) -> Self {
        Self {
            quaternion: raw.quaternion,
            euler_angle: convert::quaternion_to_euler(&raw.quaternion),
            imu: raw.imu,
        }
    }

    /// Orientation as delivered by the sensor
    pub fn quaternion(&self) -> &Quaternion {
        &self.quaternion
    }

    /// Roll/pitch/yaw derived from [`Self::quaternion`] (deg)
    pub fn euler_angle(&self) -> &EulerAngle {
        &self.euler_angle
    }

    /// Raw accelerometer, gyroscope and magnetometer block
    pub fn imu(&self) -> &ImuData {
        &self.imu
    }
}

impl From<&RawSample> for FusedSample {
    fn from(raw: &RawSample) -> Self {
        Self::from_raw(raw)
    }
}

/// Stamp and frame shared by published records
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// Publish time (ms since epoch)
    pub stamp: Timestamp,
    /// Frame the data is expressed in
    pub frame_id: FrameId,
}

/// Kinematic message in SI units
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImuMessage {
    #[allow(missing_docs)]
    pub header: Header,
    /// Orientation, passed through unchanged
    pub orientation: Quaternion,
    /// Angular rate (rad/s)
    pub angular_velocity: Vector3<f64>,
    /// Linear acceleration (m/s²)
    pub linear_acceleration: Vector3<f64>,
}

/// Rigid-body pose of the sensor frame in the base frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpatialTransform {
    /// Stamp and parent frame
    pub header: Header,
    /// Frame being placed
    pub child_frame_id: FrameId,
    /// Offset of the child origin (m)
    pub translation: Vector3<f64>,
    #[allow(missing_docs)]
    pub rotation: Quaternion,
}

/// Anything a sink may receive
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Record {
    /// Kinematic message
    Imu(ImuMessage),
    /// Spatial transform
    Tf(SpatialTransform),
}
