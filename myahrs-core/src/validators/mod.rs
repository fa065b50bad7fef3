//! Sample Validators
//!
//! ## Overview
//!
//! A sample is checked once, before it is written to the store, so the store
//! only ever holds something the converter can map. A rejected sample does
//! not advance the sequence counter and is never published.
//!
//! ## Checks
//!
//! ### 1. Finiteness
//! Every quaternion and IMU component must be a real number. NaN or infinity
//! means a corrupted frame or a fusion blow-up on the device.
//!
//! ### 2. Unit Norm
//! The quaternion must be a rotation: `| |q| - 1 | <= tolerance`. The sensor
//! streams single-precision values, so the default tolerance is loose
//! (1e-3); a zero quaternion or a half-decoded frame is far outside it.
//!
//! ## Usage
//!
//! ```rust
//! use myahrs_core::{RawSample, SampleValidator, Validator};
//!
//! let validator = SampleValidator::default();
//! assert!(validator.validate(&RawSample::default()).is_ok());
//! ```

pub mod sample;
pub mod utils;

pub use sample::SampleValidator;
