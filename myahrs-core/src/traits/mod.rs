//! Core Traits
//!
//! The seams where the pipeline meets code it does not own:
//!
//! - [`core`] - sample validation
//! - [`time`] - clocks for publish stamps
//! - [`sink`] - where finished messages and transforms go
//! - [`source`] - the device session that delivers samples (std)
//!
//! Everything the core calls through these traits is injected; nothing is
//! reached through globals or subclassing.

pub mod core;
pub mod sink;
pub mod time;

#[cfg(feature = "std")]
pub mod source;

pub use self::core::Validator;
pub use self::sink::{MessageSink, TransformSink};
pub use self::time::TimeSource;

#[cfg(feature = "std")]
pub use self::source::{SampleListener, SampleSource, SourceEvent};
