//! The calibration session engine.
//!
//! One [`SessionEngine`] drives exactly one interactive session: it pulls
//! operator commands, switches the measurement range, runs bounded sampling
//! loops, and emits one [`MeasurementRecord`] per completed measurement.
//! Everything is synchronous and single-threaded; the engine blocks on the
//! command source between commands and on the sample source within a
//! measurement.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::measurement::{SampleSource, Specification, SpecificationProvider};
use crate::output::{SessionSink, SinkError};
use crate::range::MeasurementRange;
use crate::statistics::RunningStats;

/// One discrete operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Terminate the session; no further commands are processed.
    Quit,
    /// Switch to the next less sensitive range (saturating at the top).
    RangeUp,
    /// Switch to the next more sensitive range (saturating at the bottom).
    RangeDown,
    /// Run one bounded measurement at the current range.
    StartMeasurement,
}

/// A blocking source of operator commands.
///
/// The engine pulls one command at a time and blocks until the next one is
/// available; there is no callback registration and no queueing beyond what
/// the source itself does.
pub trait CommandSource {
    /// Block until the operator issues the next command.
    fn next_command(&mut self) -> Command;
}

/// What a processed command did, for display and control flow.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The session is over; the run loop stops.
    Terminated,
    /// The active range changed (or saturated unchanged at an extreme).
    RangeChanged(MeasurementRange),
    /// A measurement ran to completion and its record was emitted.
    MeasurementComplete(MeasurementRecord),
}

/// Session-level metadata announced to sinks before the first command.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    /// UTC time the session began.
    pub started_at: DateTime<Utc>,
    /// Effective samples per measurement (after the >= 2 clamp).
    pub samples_per_measurement: usize,
    /// Operator comment, already normalized.
    pub comment: String,
    /// Range active at session start.
    pub initial_range: MeasurementRange,
}

/// The record emitted for one completed measurement.
///
/// Records are append-only: once emitted they are never revised, and their
/// index is never reused even across range changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    /// Session-relative measurement number, starting at 1.
    pub index: u32,
    /// Range the measurement was taken at.
    pub range: MeasurementRange,
    /// Number of samples actually collected.
    pub sample_size: u64,
    /// Accuracy figures from the specification collaborator.
    pub specification: Specification,
    /// Mean photocurrent in amperes. NaN if any sample was unmeasurable.
    pub mean_amps: f64,
    /// Sample standard deviation in amperes. NaN if poisoned or n < 2.
    pub std_dev_amps: f64,
    /// UTC time the first sample was requested.
    pub started_at: DateTime<Utc>,
}

/// Drives one interactive calibration session.
///
/// The engine exclusively owns its range state and accumulator; no other
/// component mutates them, so no locking is needed anywhere.
#[derive(Debug)]
pub struct SessionEngine<S, P> {
    source: S,
    provider: P,
    range: MeasurementRange,
    stats: RunningStats,
    max_samples: usize,
    comment: String,
    measurement_index: u32,
}

impl<S: SampleSource, P: SpecificationProvider> SessionEngine<S, P> {
    /// Create an engine for one session.
    ///
    /// The requested sample count is clamped to at least 2 and the
    /// configured initial range is pushed to the source immediately.
    pub fn new(mut source: S, provider: P, config: &SessionConfig) -> Self {
        let range = config.initial_range;
        source.apply_range(range);
        Self {
            source,
            provider,
            range,
            stats: RunningStats::new(),
            max_samples: config.effective_samples(),
            comment: config.normalized_comment().to_string(),
            measurement_index: 0,
        }
    }

    /// The currently active measurement range.
    pub fn current_range(&self) -> MeasurementRange {
        self.range
    }

    /// Number of measurements completed so far in this session.
    pub fn measurement_index(&self) -> u32 {
        self.measurement_index
    }

    /// Effective samples per measurement (after clamping).
    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    /// Run the session loop: announce the session, then pull and process
    /// commands until the operator quits.
    pub fn run(
        &mut self,
        commands: &mut dyn CommandSource,
        sink: &mut dyn SessionSink,
    ) -> Result<(), SinkError> {
        sink.begin_session(&self.session_info())?;
        loop {
            let command = commands.next_command();
            if let CommandOutcome::Terminated = self.process_command(command, sink)? {
                return Ok(());
            }
        }
    }

    /// Session metadata for sink announcement.
    pub fn session_info(&self) -> SessionInfo {
        SessionInfo {
            started_at: Utc::now(),
            samples_per_measurement: self.max_samples,
            comment: self.comment.clone(),
            initial_range: self.range,
        }
    }

    /// Dispatch one operator command.
    ///
    /// This is the single dispatch point: every command, however delivered,
    /// goes through here exactly once. Sink failures propagate; the engine
    /// itself has no fatal path.
    pub fn process_command(
        &mut self,
        command: Command,
        sink: &mut dyn SessionSink,
    ) -> Result<CommandOutcome, SinkError> {
        match command {
            Command::Quit => Ok(CommandOutcome::Terminated),
            Command::RangeUp => self.change_range(self.range.increment(), sink),
            Command::RangeDown => self.change_range(self.range.decrement(), sink),
            Command::StartMeasurement => {
                let record = self.measure(sink)?;
                Ok(CommandOutcome::MeasurementComplete(record))
            }
        }
    }

    fn change_range(
        &mut self,
        next: MeasurementRange,
        sink: &mut dyn SessionSink,
    ) -> Result<CommandOutcome, SinkError> {
        self.range = next;
        self.source.apply_range(next);
        sink.range_changed(next)?;
        Ok(CommandOutcome::RangeChanged(next))
    }

    /// Run one bounded measurement at the current range.
    ///
    /// Exactly `max_samples` read/update cycles, in strict sequence; an
    /// unmeasurable (infinite) sample poisons the statistics but never stops
    /// the loop, so the record always carries the full sample count.
    fn measure(&mut self, sink: &mut dyn SessionSink) -> Result<MeasurementRecord, SinkError> {
        self.measurement_index += 1;
        self.stats.restart();
        sink.measurement_started(self.measurement_index, self.range)?;
        let started_at = Utc::now();

        for iteration in 1..=self.max_samples {
            let value = self.source.read_sample();
            self.stats.update(value);
            sink.sample(iteration, value)?;
        }

        let mean = self.stats.mean();
        let record = MeasurementRecord {
            index: self.measurement_index,
            range: self.range,
            sample_size: self.stats.sample_size(),
            specification: self.provider.specification_for(mean, self.range),
            mean_amps: mean,
            std_dev_amps: self.stats.standard_deviation(),
            started_at,
        };
        sink.record(&record)?;
        Ok(record)
    }
}
