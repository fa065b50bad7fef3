//! Acquisition handler
//!
//! The only writer of the [`SampleStore`]. For each decoded frame it:
//!
//! 1. validates the raw sample (finite, unit quaternion)
//! 2. derives roll/pitch/yaw from the quaternion
//! 3. writes the fused sample, advancing the sequence counter
//! 4. dispatches publication for that sample, synchronously and outside the
//!    store's lock
//!
//! A rejected sample is never written. A failed publish leaves the sample
//! stored. Either way the error is returned from [`AcquisitionHandler::accept`]
//! and, when driven as a [`SampleListener`], logged and dropped so the next
//! frame is processed normally.

use std::sync::Arc;

use crate::{
    errors::AcquisitionError,
    store::{SampleStore, Snapshot},
    traits::{SampleListener, Validator},
    types::{FusedSample, RawSample},
    validators::SampleValidator,
};

use super::SampleDispatch;

/// Counters kept by the acquisition handler
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionStats {
    /// Samples written to the store
    pub accepted: u64,
    /// Samples refused by validation
    pub rejected: u64,
    /// Written samples whose publication failed
    pub publish_failures: u64,
    /// Attribute acknowledgements received
    pub attribute_changes: u64,
}

/// Bridges decoded device frames into the store and on to publication
#[derive(Debug)]
pub struct AcquisitionHandler<D> {
    store: Arc<SampleStore>,
    dispatch: D,
    validator: SampleValidator,
    stats: AcquisitionStats,
}

impl<D: SampleDispatch> AcquisitionHandler<D> {
    /// Create a handler writing to `store` and publishing through `dispatch`
    pub fn new(store: Arc<SampleStore>, dispatch: D) -> Self {
        Self {
            store,
            dispatch,
            validator: SampleValidator::default(),
            stats: AcquisitionStats::default(),
        }
    }

    /// Replace the default validator
    pub fn with_validator(mut self, validator: SampleValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Process one decoded frame
    ///
    /// Returns the sequence number the sample was stored under.
    pub fn accept(&mut self, sensor_id: i32, raw: &RawSample) -> Result<u64, AcquisitionError> {
        if let Err(error) = self.validator.validate(raw) {
            self.stats.rejected += 1;
            return Err(AcquisitionError::Rejected(error));
        }

        let sample = FusedSample::from_raw(raw);
        let sequence = self.store.write(sample);
        self.stats.accepted += 1;
        trace_sample(sequence, sensor_id, &sample);

        if let Err(error) = self.dispatch.dispatch(&Snapshot { sequence, sample }) {
            self.stats.publish_failures += 1;
            return Err(AcquisitionError::Publish { sequence, error });
        }

        Ok(sequence)
    }

    /// Counters so far
    pub fn stats(&self) -> &AcquisitionStats {
        &self.stats
    }

    /// The store this handler writes to
    pub fn store(&self) -> &Arc<SampleStore> {
        &self.store
    }

    /// The dispatch strategy (e.g. to inspect an inline publisher)
    pub fn dispatch(&self) -> &D {
        &self.dispatch
    }
}

impl<D: SampleDispatch> SampleListener for AcquisitionHandler<D> {
    fn on_sample(&mut self, sensor_id: i32, sample: RawSample) {
        if let Err(error) = self.accept(sensor_id, &sample) {
            log::warn!("sensor {}: dropped sample: {}", sensor_id, error);
        }
    }

    fn on_attribute_change(&mut self, sensor_id: i32, name: &str, value: &str) {
        self.stats.attribute_changes += 1;
        log::info!("sensor {}: attribute {} = {}", sensor_id, name, value);
    }
}

fn trace_sample(sequence: u64, sensor_id: i32, sample: &FusedSample) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }

    let q = sample.quaternion();
    let e = sample.euler_angle();
    let imu = sample.imu();
    log::debug!(
        "{:04}) sensor_id {}, Quaternion(xyzw)={:.4},{:.4},{:.4},{:.4}, Angle(rpy)={:.1}, {:.1}, {:.1}, \
         Accel(xyz)={:.4},{:.4},{:.4}, Gyro(xyz)={:.4},{:.4},{:.4}, Magnet(xyz)={:.2},{:.2},{:.2}",
        sequence,
        sensor_id,
        q.x, q.y, q.z, q.w,
        e.roll, e.pitch, e.yaw,
        imu.accel.x, imu.accel.y, imu.accel.z,
        imu.gyro.x, imu.gyro.y, imu.gyro.z,
        imu.mag.x, imu.mag.y, imu.mag.z,
    );
}
