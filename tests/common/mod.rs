//! Shared test infrastructure for blink-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use blink_sequencer::{Color, Delay, Report, Response, StopHandle, Transport};

// ============================================================================
// Mock Transport
// ============================================================================

/// Everything a [`MockTransport`] observed, shared with the test body.
#[derive(Debug, Default)]
pub struct TransportLog {
    pub writes: Vec<Report>,
    pub reads: Vec<Report>,
    pub closes: usize,
}

impl TransportLog {
    /// Colors carried by every set or fade report written so far.
    pub fn colors(&self) -> Vec<Color> {
        self.writes
            .iter()
            .map(|report| Color::new(report[2], report[3], report[4]))
            .collect()
    }

    /// Opcode byte of every report written so far.
    pub fn opcodes(&self) -> Vec<u8> {
        self.writes.iter().map(|report| report[1]).collect()
    }
}

/// Mock transport that records every report and can be told to fail
#[derive(Clone, Default)]
pub struct MockTransport {
    log: Rc<RefCell<TransportLog>>,
    fail_on_write: Option<usize>,
    response: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mock transfer failed")
    }
}

impl std::error::Error for MockError {}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the write with this zero-based index (counting successful writes).
    pub fn failing_on_write(mut self, index: usize) -> Self {
        self.fail_on_write = Some(index);
        self
    }

    /// Bytes returned by every read.
    pub fn responding(mut self, response: &[u8]) -> Self {
        self.response = response.to_vec();
        self
    }

    pub fn log(&self) -> Rc<RefCell<TransportLog>> {
        Rc::clone(&self.log)
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn write(&mut self, report: &Report) -> Result<(), MockError> {
        let mut log = self.log.borrow_mut();
        if self.fail_on_write == Some(log.writes.len()) {
            return Err(MockError);
        }
        log.writes.push(*report);
        Ok(())
    }

    fn read(&mut self, request: &Report) -> Result<Response, MockError> {
        self.log.borrow_mut().reads.push(*request);
        let mut response = Response::new();
        for &byte in &self.response {
            response.push(byte).map_err(|_| MockError)?;
        }
        Ok(response)
    }

    fn close(&mut self) {
        self.log.borrow_mut().closes += 1;
    }
}

// ============================================================================
// Mock Delays
// ============================================================================

/// Delay that records requested holds instead of sleeping
#[derive(Clone, Default)]
pub struct RecordingDelay {
    holds: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holds(&self) -> Rc<RefCell<Vec<Duration>>> {
        Rc::clone(&self.holds)
    }
}

impl Delay for RecordingDelay {
    type Duration = Duration;

    fn delay(&mut self, duration: Duration) {
        self.holds.borrow_mut().push(duration);
    }
}

/// Delay that fires a stop handle once it has been asked to hold `after` times
#[derive(Default)]
pub struct StoppingDelay {
    pub stop: Option<StopHandle>,
    pub after: usize,
    pub calls: usize,
}

impl StoppingDelay {
    pub fn new(stop: StopHandle, after: usize) -> Self {
        Self {
            stop: Some(stop),
            after,
            calls: 0,
        }
    }
}

impl Delay for StoppingDelay {
    type Duration = Duration;

    fn delay(&mut self, _duration: Duration) {
        self.calls += 1;
        if self.calls >= self.after {
            if let Some(stop) = self.stop.take() {
                stop.stop();
            }
        }
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
