//! JSON lines sink
//!
//! Writes every record as one line of JSON and flushes after each line, so
//! a reader tailing the output sees complete records only. Clones share the
//! writer: hand one to the publisher as message sink and another as
//! transform sink and both streams interleave in publish order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use myahrs_core::{
    errors::SinkResult, ImuMessage, MessageSink, Record, SinkError, SpatialTransform,
    TransformSink,
};

use crate::{ConnectionStats, Connector, ConnectorError};

#[derive(Debug)]
struct Inner<W> {
    writer: W,
    stats: ConnectionStats,
}

/// Sink writing newline-delimited JSON
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    inner: Arc<Mutex<Inner<W>>>,
}

impl<W> Clone for JsonLinesSink<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Create (or truncate) `path` and write to it
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let file = File::create(path.as_ref())?;
        log::info!("writing records to {}", path.as_ref().display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Write to `writer`
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                writer,
                stats: ConnectionStats::default(),
            })),
        }
    }

    /// Serialize and write one record
    ///
    /// Returns the number of bytes written, newline included.
    pub fn write_record(&self, record: &Record) -> Result<usize, ConnectorError> {
        let mut inner = self.lock();
        let result = write_line(&mut inner.writer, record);
        match &result {
            Ok(bytes) => inner.stats.record_success(*bytes),
            Err(error) => {
                log::warn!("failed to write record: {}", error);
                inner.stats.record_failure(error);
            }
        }
        result
    }

    /// Flush the underlying writer
    pub fn flush(&self) -> Result<(), ConnectorError> {
        self.lock().writer.flush()?;
        Ok(())
    }

    /// Run `f` with the writer locked
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.lock().writer)
    }

    fn publish(&self, record: Record) -> SinkResult<()> {
        self.write_record(&record)
            .map(|_| ())
            .map_err(|error| SinkError::from(&error))
    }

    fn lock(&self) -> MutexGuard<'_, Inner<W>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write_line<W: Write>(writer: &mut W, record: &Record) -> Result<usize, ConnectorError> {
    let mut line = serde_json::to_vec(record)?;
    line.push(b'\n');
    writer.write_all(&line)?;
    writer.flush()?;
    Ok(line.len())
}

impl<W: Write> MessageSink for JsonLinesSink<W> {
    fn publish_message(&mut self, message: &ImuMessage) -> SinkResult<()> {
        self.publish(Record::Imu(message.clone()))
    }
}

impl<W: Write> TransformSink for JsonLinesSink<W> {
    fn publish_transform(&mut self, transform: &SpatialTransform) -> SinkResult<()> {
        self.publish(Record::Tf(transform.clone()))
    }
}

impl<W: Write> Connector for JsonLinesSink<W> {
    fn is_connected(&self) -> bool {
        true
    }

    fn stats(&self) -> ConnectionStats {
        self.lock().stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myahrs_core::{
        pipeline::Publisher, time::FixedTime, FusedSample, RawSample,
    };

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writes_one_line_per_record() {
        let sink = JsonLinesSink::new(Vec::new());
        let mut publisher = Publisher::new(sink.clone(), sink.clone(), FixedTime::new(7));

        publisher.publish(&FusedSample::from_raw(&RawSample::default())).unwrap();

        let text = sink.with_writer(|buf| String::from_utf8(buf.clone()).unwrap());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: Record = serde_json::from_str(lines[0]).unwrap();
        let second: Record = serde_json::from_str(lines[1]).unwrap();
        assert!(matches!(first, Record::Imu(ref m) if m.header.stamp == 7));
        assert!(matches!(second, Record::Tf(ref t) if t.child_frame_id.as_str() == "imu"));

        let stats = sink.stats();
        assert_eq!(stats.records_sent, 2);
        assert_eq!(stats.bytes_sent, text.len() as u64);
    }

    #[test]
    fn io_failure_maps_to_sink_error() {
        let sink = JsonLinesSink::new(BrokenPipe);
        let mut publisher = Publisher::new(sink.clone(), sink.clone(), FixedTime::new(0));

        let err = publisher
            .publish(&FusedSample::from_raw(&RawSample::default()))
            .unwrap_err();
        assert_eq!(err, myahrs_core::PublishError::Message(SinkError::Io));

        let stats = sink.stats();
        assert_eq!(stats.records_failed, 1);
        assert!(stats.last_error.is_some());
    }
}
