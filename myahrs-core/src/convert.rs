//! Unit and Frame Conversion
//!
//! Pure functions mapping a [`FusedSample`] into publication units. No
//! state, no allocation, no clamping of inputs: a NaN or infinite component
//! is reported as [`ConversionError::NonFinite`] instead of being published.
//!
//! ## Units
//!
//! ```text
//! orientation          quaternion           passed through
//! angular_velocity     deg/s  → rad/s       × π/180
//! linear_acceleration  g      → m/s²        × 9.80665
//! ```
//!
//! ## Euler Convention
//!
//! Angles are intrinsic Z-Y-X (yaw, then pitch, then roll), the usual
//! aerospace decomposition of `q = q_z(yaw) · q_y(pitch) · q_x(roll)`:
//!
//! ```text
//! roll  = atan2(2(yz + xw), -x² - y² + z² + w²)
//! pitch = -asin(2(xz - yw))
//! yaw   = atan2(2(xy + zw),  x² - y² - z² + w²)
//! ```
//!
//! ### Gimbal Lock
//!
//! At pitch = ±90° the roll and yaw axes coincide and only their
//! difference (or sum) is observable. The formulas stay defined there: the
//! `asin` argument is limited to [-1, 1] so rounding cannot push it out of
//! domain, and `atan2` of two near-zero terms returns whatever split the
//! rounding produced. Callers get finite, deterministic angles but not a
//! unique roll/yaw pair.
//!
//! ## Transform Rotation
//!
//! The published transform uses `(roll, -pitch, -yaw)` converted to radians
//! and recombined with the same Z-Y-X convention; the sensor's pitch and yaw
//! axes point opposite to the base frame's.

use crate::{
    config::FrameConfig,
    constants::physics::{DEG_TO_RAD, RAD_TO_DEG, STANDARD_GRAVITY_M_PER_S2},
    errors::{ConversionError, ConversionResult},
    time::Timestamp,
    types::{EulerAngle, FrameId, FusedSample, Header, ImuMessage, Quaternion, SpatialTransform},
    validators::utils,
};

/// Decompose `q` into roll/pitch/yaw in degrees
///
/// Same input always yields the same output. See the module docs for the
/// behaviour at pitch = ±90°.
pub fn quaternion_to_euler(q: &Quaternion) -> EulerAngle {
    let xx = q.x * q.x;
    let yy = q.y * q.y;
    let zz = q.z * q.z;
    let ww = q.w * q.w;

    let roll = libm::atan2(2.0 * (q.y * q.z + q.x * q.w), -xx - yy + zz + ww);
    let sin_pitch = (2.0 * (q.x * q.z - q.y * q.w)).clamp(-1.0, 1.0);
    let pitch = -libm::asin(sin_pitch);
    let yaw = libm::atan2(2.0 * (q.x * q.y + q.z * q.w), xx - yy - zz + ww);

    EulerAngle {
        roll: roll * RAD_TO_DEG,
        pitch: pitch * RAD_TO_DEG,
        yaw: yaw * RAD_TO_DEG,
    }
}

/// Build a quaternion from roll/pitch/yaw in radians (Z-Y-X)
pub fn quaternion_from_rpy(roll: f64, pitch: f64, yaw: f64) -> Quaternion {
    let (sr, cr) = (libm::sin(roll * 0.5), libm::cos(roll * 0.5));
    let (sp, cp) = (libm::sin(pitch * 0.5), libm::cos(pitch * 0.5));
    let (sy, cy) = (libm::sin(yaw * 0.5), libm::cos(yaw * 0.5));

    Quaternion {
        x: sr * cp * cy - cr * sp * sy,
        y: cr * sp * cy + sr * cp * sy,
        z: cr * cp * sy - sr * sp * cy,
        w: cr * cp * cy + sr * sp * sy,
    }
}

/// Rotation of the sensor frame in the base frame
///
/// Built from `(roll, -pitch, -yaw)` after converting degrees to radians.
pub fn transform_rotation(euler: &EulerAngle) -> Quaternion {
    quaternion_from_rpy(
        euler.roll * DEG_TO_RAD,
        -euler.pitch * DEG_TO_RAD,
        -euler.yaw * DEG_TO_RAD,
    )
}

/// Check every field the converter reads
pub fn check_sample(sample: &FusedSample) -> ConversionResult<()> {
    utils::check_quaternion_finite(sample.quaternion())?;
    if !sample.euler_angle().is_finite() {
        return Err(ConversionError::NonFinite { field: "euler_angle" });
    }
    utils::check_vector_finite(&sample.imu().gyro, "imu.gyro")?;
    utils::check_vector_finite(&sample.imu().accel, "imu.accel")?;
    Ok(())
}

/// Convert a sample into the published kinematic message
pub fn to_imu_message(
    sample: &FusedSample,
    frame_id: &FrameId,
    stamp: Timestamp,
) -> ConversionResult<ImuMessage> {
    check_sample(sample)?;

    let imu = sample.imu();
    Ok(ImuMessage {
        header: Header { stamp, frame_id: frame_id.clone() },
        orientation: *sample.quaternion(),
        angular_velocity: imu.gyro.scaled(DEG_TO_RAD),
        linear_acceleration: imu.accel.scaled(STANDARD_GRAVITY_M_PER_S2),
    })
}

/// Convert a sample into the published spatial transform
///
/// `frames` supplies parent, child and the fixed mounting translation.
pub fn to_transform(
    sample: &FusedSample,
    frames: &FrameConfig,
    stamp: Timestamp,
) -> ConversionResult<SpatialTransform> {
    check_sample(sample)?;

    let rotation = transform_rotation(sample.euler_angle());
    if !rotation.is_finite() {
        return Err(ConversionError::NonFinite { field: "transform.rotation" });
    }

    Ok(SpatialTransform {
        header: Header { stamp, frame_id: frames.parent.clone() },
        child_frame_id: frames.child.clone(),
        translation: frames.translation,
        rotation,
    })
}
