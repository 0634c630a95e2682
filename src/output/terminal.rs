//! Terminal output for the operator, with colors.
//!
//! Values are displayed in nanoamperes, the natural magnitude for
//! photodiode test currents; records carry plain amperes.

use std::io::{self, Write};

use colored::Colorize;

use crate::range::MeasurementRange;
use crate::session::{MeasurementRecord, SessionInfo};

use super::{SessionSink, SinkError};

/// Human-readable session display on stdout.
#[derive(Debug, Default)]
pub struct TerminalSink {
    _private: (),
}

impl TerminalSink {
    /// Create a terminal sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }
}

impl SessionSink for TerminalSink {
    fn begin_session(&mut self, info: &SessionInfo) -> Result<(), SinkError> {
        for line in format_session_header(info) {
            self.write_line(&line)?;
        }
        Ok(())
    }

    fn range_changed(&mut self, range: MeasurementRange) -> Result<(), SinkError> {
        self.write_line("")?;
        self.write_line(&format!(
            "Current measurement range: {}",
            range.to_string().cyan().bold()
        ))?;
        self.write_line("")
    }

    fn measurement_started(
        &mut self,
        index: u32,
        range: MeasurementRange,
    ) -> Result<(), SinkError> {
        self.write_line("")?;
        self.write_line(
            &format!("Measurement #{} at {}", index, range)
                .bold()
                .to_string(),
        )
    }

    fn sample(&mut self, iteration: usize, value_amps: f64) -> Result<(), SinkError> {
        self.write_line(&format_sample_line(iteration, value_amps))
    }

    fn record(&mut self, record: &MeasurementRecord) -> Result<(), SinkError> {
        self.write_line("")?;
        for line in format_record(record) {
            self.write_line(&line)?;
        }
        self.write_line("")
    }
}

/// Format the session banner lines.
pub fn format_session_header(info: &SessionInfo) -> Vec<String> {
    vec![
        format!(
            "Application:     {} {}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
        format!(
            "StartTimeUTC:    {}",
            info.started_at.format("%d-%m-%Y %H:%M")
        ),
        format!("Samples (n):     {}", info.samples_per_measurement),
        format!("Comment:         {}", info.comment),
        format!("InitialRange:    {}", info.initial_range),
        String::new(),
    ]
}

/// Format one live sample line, value in nanoamperes.
pub fn format_sample_line(iteration: usize, value_amps: f64) -> String {
    format!("{:4}:  {:.3} nA", iteration, value_amps * 1e9)
}

/// Format the summary lines for one completed measurement.
pub fn format_record(record: &MeasurementRecord) -> Vec<String> {
    let current = format!(
        "Current:              {:.3} \u{00b1} {:.3} nA",
        record.mean_amps * 1e9,
        record.std_dev_amps * 1e9
    );
    let current = if record.mean_amps.is_nan() {
        current.yellow().to_string()
    } else {
        current.green().to_string()
    };
    vec![
        format!("Actual sample size:   {}", record.sample_size),
        current,
        format!(
            "Specification:        {:.3} nA",
            record.specification.accuracy_amps * 1e9
        ),
    ]
}
