//! CSV record output: one row per completed measurement.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::session::{MeasurementRecord, SessionInfo};

use super::{SessionSink, SinkError};

/// CSV header row matching [`csv_line`] field order.
pub fn csv_header() -> String {
    [
        "measurement number",
        "range",
        "sample size",
        "specification (A)",
        "measured current (A)",
        "standard deviation (A)",
        "test current (A)",
        "standard uncertainty (A)",
    ]
    .join(", ")
}

/// Format one record as a CSV row.
///
/// Currents are plain amperes in scientific-friendly default float
/// formatting; NaN statistics from a poisoned measurement render as `NaN`.
pub fn csv_line(record: &MeasurementRecord) -> String {
    format!(
        "{}, {}, {}, {}, {}, {}, {}, {}",
        record.index,
        record.range,
        record.sample_size,
        record.specification.accuracy_amps,
        record.mean_amps,
        record.std_dev_amps,
        record.specification.test_current_amps,
        record.specification.test_current_uncertainty_amps,
    )
}

/// CSV sink over any [`Write`] target.
///
/// Writes the header when the session begins and one row per record, each
/// flushed immediately. CSV files hold exactly one session; opening an
/// existing file truncates it.
#[derive(Debug)]
pub struct CsvWriter<W: Write> {
    writer: W,
}

impl CsvWriter<File> {
    /// Create (or truncate) `path` and write CSV into it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> CsvWriter<W> {
    /// Wrap an existing writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, text: &str) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> SessionSink for CsvWriter<W> {
    fn begin_session(&mut self, _info: &SessionInfo) -> Result<(), SinkError> {
        self.line(&csv_header())
    }

    fn record(&mut self, record: &MeasurementRecord) -> Result<(), SinkError> {
        self.line(&csv_line(record))
    }
}
