//! Plain-text session log in separator-block format.
//!
//! The log file is append-mode by convention: one calibration session adds
//! one fat-separator header block and one thin-separator block per
//! measurement, so consecutive sessions accumulate in a single file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::range::MeasurementRange;
use crate::session::{MeasurementRecord, SessionInfo};

use super::{SessionSink, SinkError};

const SEPARATOR_LEN: usize = 80;

/// Session log writer over any [`Write`] target.
///
/// Every event is flushed immediately so a crashed session still leaves a
/// usable log.
#[derive(Debug)]
pub struct LogWriter<W: Write> {
    writer: W,
}

impl LogWriter<std::fs::File> {
    /// Open `path` for appending and log into it.
    pub fn append_to(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> LogWriter<W> {
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

    fn fat_separator(&mut self) -> Result<(), SinkError> {
        let sep = "=".repeat(SEPARATOR_LEN);
        self.line(&sep)
    }

    fn thin_separator(&mut self) -> Result<(), SinkError> {
        let sep = "-".repeat(SEPARATOR_LEN);
        self.line(&sep)
    }
}

impl<W: Write> SessionSink for LogWriter<W> {
    fn begin_session(&mut self, info: &SessionInfo) -> Result<(), SinkError> {
        self.fat_separator()?;
        self.line(&format!(
            "Application:     {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ))?;
        self.line(&format!(
            "StartTimeUTC:    {}",
            info.started_at.format("%d-%m-%Y %H:%M")
        ))?;
        self.line(&format!(
            "Samples (n):     {}",
            info.samples_per_measurement
        ))?;
        self.line(&format!("Comment:         {}", info.comment))?;
        self.line(&format!("InitialRange:    {}", info.initial_range))?;
        self.fat_separator()
    }

    fn range_changed(&mut self, range: MeasurementRange) -> Result<(), SinkError> {
        self.line(&format!("Range changed to:     {}", range))
    }

    fn record(&mut self, record: &MeasurementRecord) -> Result<(), SinkError> {
        self.line(&format!(
            "Measurement number:   {} ({})",
            record.index, record.range
        ))?;
        self.line(&format!(
            "Triggered at:         {}",
            record.started_at.format("%d-%m-%Y %H:%M:%S")
        ))?;
        self.line(&format!(
            "Actual sample size:   {}",
            record.sample_size
        ))?;
        self.line(&format!(
            "Current:              {:.3} \u{00b1} {:.3} nA",
            record.mean_amps * 1e9,
            record.std_dev_amps * 1e9
        ))?;
        self.thin_separator()
    }
}
