//! Sample handoff and conversion core for the myAHRS+ IMU bridge
//!
//! Takes fused attitude samples delivered by a device session, keeps the
//! latest one in a lock-guarded single-slot store and republishes it as a
//! kinematic message plus a spatial transform at sensor rate.
//!
//! ```text
//! SampleSource ─→ AcquisitionHandler ─→ SampleStore ─→ Publisher ─→ sinks
//!                  (derive rpy, write)    (one slot)    (convert)
//! ```
//!
//! The data model, converter and validators are `no_std`; the store and
//! everything that locks, waits or spawns needs the `std` feature.
//!
//! ```no_run
//! use std::sync::Arc;
//! use myahrs_core::{
//!     AcquisitionHandler, MemorySink, Publisher, RawSample, SampleStore,
//!     time::SystemTime,
//! };
//!
//! let store = Arc::new(SampleStore::new());
//! let sink = MemorySink::new();
//! let publisher = Publisher::new(sink.clone(), sink.clone(), SystemTime);
//! let mut handler = AcquisitionHandler::new(store, publisher);
//!
//! // Normally driven by a device session
//! handler.accept(0, &RawSample::default()).ok();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod convert;
pub mod errors;
pub mod time;
pub mod traits;
pub mod types;
pub mod validators;

#[cfg(feature = "std")]
pub mod pipeline;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod sinks;
#[cfg(feature = "std")]
pub mod store;

// Public API
pub use errors::{
    AcquisitionError, ConfigError, ConversionError, InitError, PublishError, SessionError,
    SinkError, StoreError,
};
pub use traits::{MessageSink, TransformSink, Validator};
pub use types::{
    EulerAngle, FrameId, FusedSample, Header, ImuData, ImuMessage, Quaternion,
    RawSample, Record, SpatialTransform, Vector3,
};
pub use validators::SampleValidator;
pub use config::FrameConfig;

#[cfg(feature = "std")]
pub use config::{DeviceConfig, DriverConfig, PublishConfig, PublishMode};
#[cfg(feature = "std")]
pub use pipeline::{AcquisitionHandler, Deferred, PublishWorker, Publisher, SampleDispatch};
#[cfg(feature = "std")]
pub use session::{DeviceCommand, MemorySource};
#[cfg(feature = "std")]
pub use traits::{SampleListener, SampleSource, SourceEvent};
#[cfg(feature = "std")]
pub use sinks::MemorySink;
#[cfg(feature = "std")]
pub use store::{SampleStore, Snapshot};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
