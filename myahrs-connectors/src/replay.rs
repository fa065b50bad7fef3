//! Replay of recorded device sessions
//!
//! Reads [`SourceEvent`]s from newline-delimited JSON and presents them as a
//! [`SampleSource`], so a capture can be pushed through the same pipeline as
//! a live sensor.
//!
//! - Blank lines are ignored.
//! - A line that does not parse is logged, counted in
//!   [`ReplayStats::malformed`] and skipped; replay continues with the next
//!   line.
//! - End of input closes the stream.
//!
//! Configuration commands are accepted and recorded but have no effect: the
//! capture already fixes the format and rate.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use myahrs_core::{
    errors::SessionResult, DeviceCommand, SampleSource, SessionError, SourceEvent,
};

use crate::ConnectorError;

/// Counters for one replay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    /// Lines read, blank ones included
    pub lines: u64,
    /// Events handed out
    pub events: u64,
    /// Lines skipped because they did not parse
    pub malformed: u64,
}

/// Device session replayed from a JSON lines capture
#[derive(Debug)]
pub struct JsonLinesSource<R> {
    reader: R,
    line: String,
    started: bool,
    commands: Vec<DeviceCommand>,
    stats: ReplayStats,
}

impl JsonLinesSource<BufReader<File>> {
    /// Open a capture file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let file = File::open(path.as_ref())?;
        log::info!("replaying {}", path.as_ref().display());
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    /// Replay from any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            started: false,
            commands: Vec::new(),
            stats: ReplayStats::default(),
        }
    }

    /// Counters so far
    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// Commands received during initialization
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    fn next_event(&mut self) -> Result<Option<SourceEvent>, ConnectorError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.stats.lines += 1;

            let text = self.line.trim();
            if text.is_empty() {
                continue;
            }

            match serde_json::from_str::<SourceEvent>(text) {
                Ok(event) => {
                    self.stats.events += 1;
                    return Ok(Some(event));
                }
                Err(error) => {
                    self.stats.malformed += 1;
                    log::warn!("line {}: skipping malformed event: {}", self.stats.lines, error);
                }
            }
        }
    }
}

impl<R: BufRead> SampleSource for JsonLinesSource<R> {
    fn start(&mut self) -> SessionResult<()> {
        self.started = true;
        Ok(())
    }

    fn send_command(&mut self, command: &DeviceCommand) -> SessionResult<()> {
        if !self.started {
            return Err(SessionError::NotConnected);
        }
        log::debug!("replay ignores {}", command);
        self.commands.push(command.clone());
        Ok(())
    }

    fn poll_event(&mut self) -> nb::Result<SourceEvent, SessionError> {
        match self.next_event() {
            Ok(Some(event)) => Ok(event),
            Ok(None) => {
                log::info!(
                    "replay finished: {} events, {} malformed lines",
                    self.stats.events,
                    self.stats.malformed
                );
                Err(nb::Error::Other(SessionError::Closed))
            }
            Err(error) => {
                log::error!("replay read failed: {}", error);
                Err(nb::Error::Other(SessionError::from(&error)))
            }
        }
    }
}

/// Append one event to a capture
pub fn write_event<W: Write>(writer: &mut W, event: &SourceEvent) -> Result<(), ConnectorError> {
    serde_json::to_writer(&mut *writer, event)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use myahrs_core::{convert::quaternion_from_rpy, types::Vector3, FusedSample, RawSample};
    use std::io::Cursor;

    fn capture(events: &[SourceEvent]) -> Vec<u8> {
        let mut buf = Vec::new();
        for event in events {
            write_event(&mut buf, event).unwrap();
        }
        buf
    }

    fn drain<R: BufRead>(source: &mut JsonLinesSource<R>) -> Vec<SourceEvent> {
        let mut events = Vec::new();
        loop {
            match source.poll_event() {
                Ok(event) => events.push(event),
                Err(nb::Error::Other(SessionError::Closed)) => return events,
                Err(other) => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn replays_written_events() {
        let mut raw = RawSample::default();
        raw.imu.gyro = Vector3::new(1.0, 2.0, 3.0);
        let events = vec![
            SourceEvent::AttributeChange {
                sensor_id: 0,
                name: "divider".into(),
                value: "1".into(),
            },
            SourceEvent::Sample { sensor_id: 0, sample: raw },
        ];

        let mut source = JsonLinesSource::new(Cursor::new(capture(&events)));
        assert_eq!(drain(&mut source), events);
        assert_eq!(source.stats().events, 2);
    }

    #[test]
    fn replayed_quaternions_are_bit_exact() {
        let samples: Vec<RawSample> = (1..200)
            .map(|k| {
                let k = f64::from(k);
                RawSample {
                    quaternion: quaternion_from_rpy(k * 0.0071, -k * 0.0043, k * 0.0137),
                    ..RawSample::default()
                }
            })
            .collect();
        let events: Vec<SourceEvent> = samples
            .iter()
            .map(|sample| SourceEvent::Sample { sensor_id: 0, sample: *sample })
            .collect();

        let mut source = JsonLinesSource::new(Cursor::new(capture(&events)));
        let replayed = drain(&mut source);
        assert_eq!(replayed.len(), samples.len());

        for (event, original) in replayed.iter().zip(&samples) {
            let SourceEvent::Sample { sample, .. } = event else {
                panic!("expected a sample, got {:?}", event);
            };
            assert_eq!(sample.quaternion, original.quaternion);
            assert_eq!(FusedSample::from_raw(sample), FusedSample::from_raw(original));
        }
    }

    #[test]
    fn malformed_and_blank_lines_are_skipped() {
        let mut data = capture(&[SourceEvent::Sample { sensor_id: 1, sample: RawSample::default() }]);
        data.extend_from_slice(b"\n{not json}\n{\"event\":\"unknown\"}\n");
        data.extend(capture(&[SourceEvent::Sample { sensor_id: 2, sample: RawSample::default() }]));

        let mut source = JsonLinesSource::new(Cursor::new(data));
        let events = drain(&mut source);

        assert_eq!(events.len(), 2);
        assert_eq!(source.stats().malformed, 2);
        assert_eq!(source.stats().lines, 5);
    }

    #[test]
    fn commands_need_start() {
        let mut source = JsonLinesSource::new(Cursor::new(Vec::new()));
        assert_eq!(
            source.send_command(&DeviceCommand::Divider(1)),
            Err(SessionError::NotConnected)
        );
        source.start().unwrap();
        source.send_command(&DeviceCommand::Divider(1)).unwrap();
        assert_eq!(source.commands(), &[DeviceCommand::Divider(1)]);
    }
}
