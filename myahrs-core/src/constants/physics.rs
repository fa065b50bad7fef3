//! Physical constants and conversion factors
//!
//! The converter must reproduce these exactly; none of them are
//! approximations of a measured quantity.

use core::f64::consts::PI;

/// Standard acceleration of gravity (m/s²).
///
/// The accelerometer reports in g; multiplying by this gives m/s².
///
/// Source: CGPM 1901, ISO 80000-3
pub const STANDARD_GRAVITY_M_PER_S2: f64 = 9.806_65;

/// Degrees to radians (π/180).
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// Radians to degrees (180/π).
pub const RAD_TO_DEG: f64 = 180.0 / PI;

/// Accepted deviation of a quaternion norm from 1.0.
///
/// The sensor streams single-precision quaternions; its fusion output
/// drifts from unit length by far less than this.
pub const QUATERNION_NORM_TOLERANCE: f64 = 1e-3;
