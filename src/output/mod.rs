//! Session output: sinks for human-readable and machine-readable records.
//!
//! The engine emits through the [`SessionSink`] trait and owns none of the
//! formatting. This module provides the stock sinks:
//! - [`TerminalSink`]: colored operator display
//! - [`LogWriter`]: plain-text log file in separator-block format
//! - [`CsvWriter`]: one CSV row per completed measurement
//! - [`FanoutSink`]: fan out to several sinks at once
//!
//! plus [`record_to_json`] helpers for serializing individual records.

mod csv;
mod json;
mod log;
mod terminal;

pub use csv::{csv_header, csv_line, CsvWriter};
pub use json::{record_to_json, record_to_json_pretty};
pub use log::LogWriter;
pub use terminal::TerminalSink;

use std::fmt;

use crate::range::MeasurementRange;
use crate::session::{MeasurementRecord, SessionInfo};

/// Errors a sink can raise while persisting session output.
///
/// The engine propagates these unchanged; a failing sink aborts the session
/// loop rather than being silently skipped.
#[derive(Debug)]
pub enum SinkError {
    /// IO error writing to a file or stream.
    Io(std::io::Error),
    /// Record serialization failed.
    Json(serde_json::Error),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "IO error: {}", e),
            SinkError::Json(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(e) => Some(e),
            SinkError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::Io(e)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(e: serde_json::Error) -> Self {
        SinkError::Json(e)
    }
}

/// Consumer of session output events.
///
/// Every method except [`record`](Self::record) has a no-op default, so a
/// sink that only cares about completed measurements implements one method.
/// Field order and formatting are owned by the sink, not the engine.
pub trait SessionSink {
    /// Called once, before the first command is processed.
    fn begin_session(&mut self, _info: &SessionInfo) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called after every operator range change, with the new range.
    fn range_changed(&mut self, _range: MeasurementRange) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called when a measurement starts, before the first sample is read.
    fn measurement_started(
        &mut self,
        _index: u32,
        _range: MeasurementRange,
    ) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called once per sample during a measurement, in read order.
    ///
    /// `iteration` is 1-based within the current measurement.
    fn sample(&mut self, _iteration: usize, _value_amps: f64) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called once per completed measurement with the final record.
    fn record(&mut self, record: &MeasurementRecord) -> Result<(), SinkError>;
}

/// Fans every event out to a list of sinks, in order.
///
/// The first sink failure aborts the fan-out and propagates.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn SessionSink>>,
}

impl FanoutSink {
    /// Create an empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sink to the fan-out, returning self for chaining.
    pub fn with(mut self, sink: Box<dyn SessionSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl SessionSink for FanoutSink {
    fn begin_session(&mut self, info: &SessionInfo) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.begin_session(info)?;
        }
        Ok(())
    }

    fn range_changed(&mut self, range: MeasurementRange) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.range_changed(range)?;
        }
        Ok(())
    }

    fn measurement_started(
        &mut self,
        index: u32,
        range: MeasurementRange,
    ) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.measurement_started(index, range)?;
        }
        Ok(())
    }

    fn sample(&mut self, iteration: usize, value_amps: f64) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.sample(iteration, value_amps)?;
        }
        Ok(())
    }

    fn record(&mut self, record: &MeasurementRecord) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.record(record)?;
        }
        Ok(())
    }
}
