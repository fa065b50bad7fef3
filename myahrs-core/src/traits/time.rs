//! Time Source Abstraction
//!
//! Publish stamps come from an injected clock so tests can pin them and
//! embedded targets can use whatever timer they have.
//!
//! ## Common Implementations
//!
//! - `SystemTime`: wall clock (may jump with NTP)
//! - `FixedTime`: constant stamp for tests
//! - `ManualClock`: shared, advanceable clock for tests

use crate::time::Timestamp;

/// Source of publish stamps
///
/// ## Implementation Requirements
///
/// - `now()` is called once per published sample and must not block
/// - Implementations used by the publish worker must be `Send`
pub trait TimeSource {
    /// Current time in milliseconds
    fn now(&self) -> Timestamp;

    /// Whether [`Self::now`] is wall-clock time (vs. monotonic or synthetic)
    fn is_wall_clock(&self) -> bool;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }

    fn is_wall_clock(&self) -> bool {
        (**self).is_wall_clock()
    }
}
