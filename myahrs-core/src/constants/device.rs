//! Device session defaults
//!
//! These are handed to the device session during initialization. The core
//! never opens the serial port itself.

/// Serial device the sensor enumerates as.
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyACM1";

/// Serial link speed (baud).
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Output rate divider. The sensor runs at 100 Hz / divider.
pub const DEFAULT_DIVIDER: u32 = 1;

/// Base output rate before the divider is applied (Hz).
pub const BASE_OUTPUT_RATE_HZ: u32 = 100;

/// Binary frame contents requested during the handshake.
pub const BINARY_DATA_FORMAT: &str = "QUATERNION, IMU";

/// Output mode requested during the handshake (binary, continuous).
pub const OUTPUT_MODE: &str = "BC";
