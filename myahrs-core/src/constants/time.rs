//! Timing parameters

/// How long the publish worker waits for a new sample before re-checking
/// its stop flag (ms).
///
/// Bounds shutdown latency of a decoupled publisher.
pub const DEFAULT_IDLE_TIMEOUT_MS: u64 = 100;

/// Sleep between polls when the device session has nothing pending (ms).
///
/// One tenth of the 100 Hz sample period.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1;
