//! Clocks for publish stamps
//!
//! Every published message and transform pair is stamped with a single
//! reading taken when the sample is published, not when it arrived.

pub use crate::traits::TimeSource;

/// Timestamp in milliseconds since the Unix epoch (or since boot for
/// non-wall-clock sources)
pub type Timestamp = u64;

/// System time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }

    fn is_wall_clock(&self) -> bool {
        true
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone, Copy)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    #[allow(missing_docs)]
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    #[allow(missing_docs)]
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

/// Clock shared between a test and the publisher it drives
///
/// Clones observe the same time; advancing one advances all.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: std::sync::Arc<core::sync::atomic::AtomicU64>,
}

#[cfg(feature = "std")]
impl ManualClock {
    #[allow(missing_docs)]
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: std::sync::Arc::new(core::sync::atomic::AtomicU64::new(start)),
        }
    }

    /// Move every clone forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, core::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(feature = "std")]
impl TimeSource for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(core::sync::atomic::Ordering::SeqCst)
    }

    fn is_wall_clock(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let mut time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(10);
        let other = clock.clone();

        clock.advance(5);
        assert_eq!(other.now(), 15);
    }

    #[test]
    fn system_time_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemTime.now() > 1_577_836_800_000);
        assert!(SystemTime.is_wall_clock());
    }
}
