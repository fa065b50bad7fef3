//! Shared validation helpers
//!
//! Pure functions, no allocation, usable from the converter and from any
//! validator.

use crate::{
    errors::{ConversionError, ConversionResult},
    types::{Quaternion, Vector3},
};

/// Fail with [`ConversionError::NonFinite`] if any quaternion component is
/// NaN or infinite
pub fn check_quaternion_finite(q: &Quaternion) -> ConversionResult<()> {
    if q.is_finite() {
        Ok(())
    } else {
        Err(ConversionError::NonFinite { field: "quaternion" })
    }
}

/// Fail with [`ConversionError::NonFinite`] naming `field` if any component
/// is NaN or infinite
pub fn check_vector_finite(v: &Vector3<f32>, field: &'static str) -> ConversionResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ConversionError::NonFinite { field })
    }
}

/// Fail if `q` is not unit length within `tolerance`
///
/// Assumes `q` is finite; check that first.
pub fn check_unit_norm(q: &Quaternion, tolerance: f64) -> ConversionResult<()> {
    let norm = q.norm();
    if libm::fabs(norm - 1.0) <= tolerance {
        Ok(())
    } else {
        Err(ConversionError::QuaternionNotNormalized { norm, tolerance })
    }
}
