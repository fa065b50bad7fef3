//! In-process channel sink
//!
//! Hands records to another thread. The unbounded flavour never blocks the
//! publisher; the bounded flavour refuses records with [`SinkError::Full`]
//! instead of waiting when the consumer falls behind.

use std::sync::mpsc::{self, Receiver, Sender, SyncSender, TrySendError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use myahrs_core::{
    errors::SinkResult, ImuMessage, MessageSink, Record, SinkError, SpatialTransform,
    TransformSink,
};

use crate::{ConnectionStats, Connector, ConnectorError};

#[derive(Debug, Clone)]
enum Tx {
    Unbounded(Sender<Record>),
    Bounded(SyncSender<Record>),
}

#[derive(Debug, Default)]
struct Shared {
    stats: ConnectionStats,
    disconnected: bool,
}

/// Sink forwarding records over `std::sync::mpsc`
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Tx,
    shared: Arc<Mutex<Shared>>,
}

impl ChannelSink {
    /// Unbounded channel
    pub fn new() -> (Self, Receiver<Record>) {
        let (tx, rx) = mpsc::channel();
        (Self::with_tx(Tx::Unbounded(tx)), rx)
    }

    /// Channel holding at most `capacity` undelivered records
    pub fn bounded(capacity: usize) -> (Self, Receiver<Record>) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        (Self::with_tx(Tx::Bounded(tx)), rx)
    }

    fn with_tx(tx: Tx) -> Self {
        Self {
            tx,
            shared: Arc::new(Mutex::new(Shared::default())),
        }
    }

    /// Send one record
    pub fn send(&self, record: Record) -> Result<(), ConnectorError> {
        let result = match &self.tx {
            Tx::Unbounded(tx) => tx.send(record).map_err(|_| ConnectorError::Disconnected),
            Tx::Bounded(tx) => tx.try_send(record).map_err(|error| match error {
                TrySendError::Full(_) => ConnectorError::Full,
                TrySendError::Disconnected(_) => ConnectorError::Disconnected,
            }),
        };

        let mut shared = self.lock();
        match &result {
            Ok(()) => shared.stats.record_success(0),
            Err(error) => {
                shared.disconnected |= matches!(error, ConnectorError::Disconnected);
                shared.stats.record_failure(error);
            }
        }
        result
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, record: Record) -> SinkResult<()> {
        self.send(record).map_err(|error| SinkError::from(&error))
    }
}

impl MessageSink for ChannelSink {
    fn publish_message(&mut self, message: &ImuMessage) -> SinkResult<()> {
        self.publish(Record::Imu(message.clone()))
    }
}

impl TransformSink for ChannelSink {
    fn publish_transform(&mut self, transform: &SpatialTransform) -> SinkResult<()> {
        self.publish(Record::Tf(transform.clone()))
    }
}

impl Connector for ChannelSink {
    fn is_connected(&self) -> bool {
        !self.lock().disconnected
    }

    fn stats(&self) -> ConnectionStats {
        self.lock().stats.clone()
    }
}
