//! Shared fixtures for integration tests
//!
//! - Deterministic sample generators whose fields can be checked for
//!   tearing after a concurrent read
//! - Recording listener for session tests

#![allow(dead_code)]

use myahrs_core::{
    convert::quaternion_from_rpy,
    types::{ImuData, Quaternion, RawSample, Vector3},
    FusedSample, SampleListener,
};

/// Sample number `k`: every IMU component equals `k`, the quaternion is a
/// yaw of `k` milliradians
pub fn tagged_sample(k: u64) -> RawSample {
    let v = k as f32;
    RawSample {
        quaternion: tagged_quaternion(k),
        imu: ImuData {
            accel: Vector3::new(v, v, v),
            gyro: Vector3::new(v, v, v),
            mag: Vector3::new(v, v, v),
        },
    }
}

/// Quaternion used by [`tagged_sample`]
pub fn tagged_quaternion(k: u64) -> Quaternion {
    quaternion_from_rpy(0.0, 0.0, (k % 3000) as f64 * 1e-3)
}

/// Tag carried by a sample built with [`tagged_sample`], `None` if its
/// fields disagree
pub fn tag_of(sample: &FusedSample) -> Option<u64> {
    let imu = sample.imu();
    let v = imu.accel.x;
    let all = [
        imu.accel.x, imu.accel.y, imu.accel.z,
        imu.gyro.x, imu.gyro.y, imu.gyro.z,
        imu.mag.x, imu.mag.y, imu.mag.z,
    ];
    if all.iter().any(|c| *c != v) {
        return None;
    }
    let k = v as u64;
    if *sample.quaternion() != tagged_quaternion(k) {
        return None;
    }
    Some(k)
}

/// Sample of a level sensor at rest
pub fn level_sample() -> RawSample {
    RawSample {
        quaternion: Quaternion::new(0.0, 0.0, 0.0, 1.0),
        imu: ImuData {
            accel: Vector3::new(0.0, 0.0, 1.0),
            gyro: Vector3::new(10.0, 0.0, 0.0),
            mag: Vector3::default(),
        },
    }
}

/// Listener remembering everything it was given
#[derive(Debug, Default)]
pub struct RecordingListener {
    pub samples: Vec<(i32, RawSample)>,
    pub attributes: Vec<(i32, String, String)>,
}

impl SampleListener for RecordingListener {
    fn on_sample(&mut self, sensor_id: i32, sample: RawSample) {
        self.samples.push((sensor_id, sample));
    }

    fn on_attribute_change(&mut self, sensor_id: i32, name: &str, value: &str) {
        self.attributes.push((sensor_id, name.to_string(), value.to_string()));
    }
}
