//! Scripted in-memory device session

use std::collections::VecDeque;

use crate::{
    errors::{SessionError, SessionResult},
    traits::{SampleSource, SourceEvent},
    types::RawSample,
};

use super::DeviceCommand;

/// A [`SampleSource`] fed from a queue
///
/// Queued events are returned one per poll. Once the queue is empty the
/// source reports `WouldBlock`, or `Closed` if
/// [`close_when_drained`](Self::close_when_drained) was set.
#[derive(Debug, Default)]
pub struct MemorySource {
    events: VecDeque<Result<SourceEvent, SessionError>>,
    commands: Vec<DeviceCommand>,
    started: bool,
    start_failure: Option<SessionError>,
    rejected_command: Option<&'static str>,
    close_when_drained: bool,
}

impl MemorySource {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `Closed` instead of `WouldBlock` once the queue is empty
    pub fn close_when_drained(mut self) -> Self {
        self.close_when_drained = true;
        self
    }

    /// Make `start` fail with `error`
    pub fn fail_start(mut self, error: SessionError) -> Self {
        self.start_failure = Some(error);
        self
    }

    /// Refuse the command whose [`DeviceCommand::name`] is `name`
    pub fn reject_command(mut self, name: &'static str) -> Self {
        self.rejected_command = Some(name);
        self
    }

    /// Queue a sample frame
    pub fn push_sample(&mut self, sensor_id: i32, sample: RawSample) {
        self.events.push_back(Ok(SourceEvent::Sample { sensor_id, sample }));
    }

    /// Queue an attribute acknowledgement
    pub fn push_attribute(&mut self, sensor_id: i32, name: &str, value: &str) {
        self.events.push_back(Ok(SourceEvent::AttributeChange {
            sensor_id,
            name: name.to_string(),
            value: value.to_string(),
        }));
    }

    /// Queue any event
    pub fn push_event(&mut self, event: SourceEvent) {
        self.events.push_back(Ok(event));
    }

    /// Queue a session failure
    pub fn push_error(&mut self, error: SessionError) {
        self.events.push_back(Err(error));
    }

    /// Events not yet polled
    pub fn pending(&self) -> usize {
        self.events.len()
    }

    /// Commands acknowledged so far, in order
    pub fn commands(&self) -> &[DeviceCommand] {
        &self.commands
    }

    /// True after a successful `start`
    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl SampleSource for MemorySource {
    fn start(&mut self) -> SessionResult<()> {
        if let Some(error) = self.start_failure {
            return Err(error);
        }
        self.started = true;
        Ok(())
    }

    fn send_command(&mut self, command: &DeviceCommand) -> SessionResult<()> {
        if !self.started {
            return Err(SessionError::NotConnected);
        }
        self.commands.push(command.clone());
        if self.rejected_command == Some(command.name()) {
            return Err(SessionError::CommandRejected { command: command.name() });
        }
        Ok(())
    }

    fn poll_event(&mut self) -> nb::Result<SourceEvent, SessionError> {
        match self.events.pop_front() {
            Some(Ok(event)) => Ok(event),
            Some(Err(error)) => Err(nb::Error::Other(error)),
            None if self.close_when_drained => Err(nb::Error::Other(SessionError::Closed)),
            None => Err(nb::Error::WouldBlock),
        }
    }
}
