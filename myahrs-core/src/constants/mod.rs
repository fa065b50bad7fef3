//! Constants for the myAHRS+ bridge
//!
//! All numeric values used by the pipeline live here, with units in the name.
//!
//! ## Organization
//!
//! - **Physics**: unit conversion factors and numeric tolerances
//! - **Frames**: default frame identifiers and sensor mounting offset
//! - **Device**: serial link and sampling parameters handed to the session
//! - **Time**: worker and polling intervals

/// Unit conversion factors and numeric tolerances.
pub mod physics;

/// Frame identifiers and mounting geometry.
pub mod frames;

/// Device session defaults (serial link, handshake values).
pub mod device;

/// Timing parameters for the publish worker and session polling.
pub mod time;

pub use physics::{DEG_TO_RAD, RAD_TO_DEG, STANDARD_GRAVITY_M_PER_S2};
pub use frames::{IMU_BASE_FRAME, IMU_FRAME, SENSOR_OFFSET_Z_M};
pub use device::{DEFAULT_BAUD_RATE, DEFAULT_DIVIDER};
