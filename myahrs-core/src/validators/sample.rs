//! Raw sample validator

use crate::{
    constants::physics::QUATERNION_NORM_TOLERANCE,
    errors::ConversionResult,
    traits::Validator,
    types::RawSample,
};

use super::utils;

/// Checks a decoded frame before it enters the store
#[derive(Debug, Clone, Copy)]
pub struct SampleValidator {
    /// Accepted deviation of the quaternion norm from 1.0
    norm_tolerance: f64,
}

impl Default for SampleValidator {
    fn default() -> Self {
        Self {
            norm_tolerance: QUATERNION_NORM_TOLERANCE,
        }
    }
}

impl SampleValidator {
    /// Create a validator with a custom norm tolerance
    pub fn with_norm_tolerance(tolerance: f64) -> Self {
        Self {
            norm_tolerance: libm::fabs(tolerance),
        }
    }

    /// Current norm tolerance
    pub fn norm_tolerance(&self) -> f64 {
        self.norm_tolerance
    }
}

impl Validator for SampleValidator {
    type Value = RawSample;

    fn validate(&self, sample: &RawSample) -> ConversionResult<()> {
        utils::check_quaternion_finite(&sample.quaternion)?;
        utils::check_unit_norm(&sample.quaternion, self.norm_tolerance)?;

        utils::check_vector_finite(&sample.imu.accel, "imu.accel")?;
        utils::check_vector_finite(&sample.imu.gyro, "imu.gyro")?;
        utils::check_vector_finite(&sample.imu.mag, "imu.mag")?;

        Ok(())
    }
}
