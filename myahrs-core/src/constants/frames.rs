//! Frame identifiers and mounting geometry

/// Parent frame: the body the sensor is mounted on.
///
/// Also the `frame_id` stamped on every published IMU message.
pub const IMU_BASE_FRAME: &str = "imu_base";

/// Child frame: the sensor itself.
pub const IMU_FRAME: &str = "imu";

/// Sensor height above the base frame origin (m).
pub const SENSOR_OFFSET_Z_M: f64 = 0.1;

/// Maximum frame id length held inline.
pub const FRAME_ID_CAPACITY: usize = 32;
