//! Test doubles and a simulated instrument.
//!
//! Nothing here touches hardware: [`SimulatedPhotodiode`] produces plausible
//! noisy photocurrents for demos and soak runs, while [`ScriptedSource`],
//! [`ScriptedCommands`], and [`MemorySink`] replay and capture exact
//! sequences for deterministic tests.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::measurement::SampleSource;
use crate::output::{SessionSink, SinkError};
use crate::range::MeasurementRange;
use crate::session::{Command, CommandSource, MeasurementRecord, SessionInfo};

/// A photodiode simulator with Gaussian measurement noise.
///
/// Reads are drawn from a normal distribution around the configured level.
/// A level above the active range's full scale saturates the input and the
/// read returns infinity, exercising the engine's poisoning path the same
/// way an over-ranged instrument would.
#[derive(Debug)]
pub struct SimulatedPhotodiode {
    level_amps: f64,
    noise: Normal<f64>,
    range: MeasurementRange,
    rng: StdRng,
}

impl SimulatedPhotodiode {
    /// Create a simulator producing `level_amps` with `relative_noise`
    /// (fraction of the level, e.g. 0.05 for 5 %) and a fixed RNG seed.
    pub fn new(level_amps: f64, relative_noise: f64, seed: u64) -> Self {
        assert!(level_amps.is_finite(), "level_amps must be finite");
        assert!(
            relative_noise.is_finite() && relative_noise >= 0.0,
            "relative_noise must be finite and non-negative"
        );
        let sigma = (level_amps.abs() * relative_noise).max(f64::MIN_POSITIVE);
        Self {
            level_amps,
            // sigma is finite and positive given the asserts above
            noise: Normal::new(0.0, sigma).expect("valid standard deviation"),
            range: MeasurementRange::Range03,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Change the simulated photocurrent level mid-session.
    pub fn set_level(&mut self, level_amps: f64) {
        self.level_amps = level_amps;
    }
}

impl SampleSource for SimulatedPhotodiode {
    fn read_sample(&mut self) -> f64 {
        let value = self.level_amps + self.noise.sample(&mut self.rng);
        if value.abs() > self.range.full_scale_amps() {
            f64::INFINITY
        } else {
            value
        }
    }

    fn apply_range(&mut self, range: MeasurementRange) {
        self.range = range;
    }
}

/// Replays a fixed sequence of samples, then repeats the last one.
///
/// Repeating the tail keeps the source total (a source that runs dry is an
/// upstream failure outside the session contract) while letting tests script
/// exact sequences shorter than the sample count.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    samples: VecDeque<f64>,
    last: f64,
    applied: Vec<MeasurementRange>,
}

impl ScriptedSource {
    /// Script the given samples, in order.
    pub fn new(samples: Vec<f64>) -> Self {
        Self {
            samples: samples.into(),
            last: f64::NAN,
            applied: Vec::new(),
        }
    }

    /// Every range pushed to this source so far, in order.
    pub fn applied_ranges(&self) -> &[MeasurementRange] {
        &self.applied
    }
}

impl SampleSource for ScriptedSource {
    fn read_sample(&mut self) -> f64 {
        if let Some(value) = self.samples.pop_front() {
            self.last = value;
        }
        self.last
    }

    fn apply_range(&mut self, range: MeasurementRange) {
        self.applied.push(range);
    }
}

/// Replays a fixed command sequence, then quits.
#[derive(Debug, Default)]
pub struct ScriptedCommands {
    commands: VecDeque<Command>,
}

impl ScriptedCommands {
    /// Script the given commands; once exhausted, every further pull
    /// returns [`Command::Quit`].
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            commands: commands.into(),
        }
    }
}

impl CommandSource for ScriptedCommands {
    fn next_command(&mut self) -> Command {
        self.commands.pop_front().unwrap_or(Command::Quit)
    }
}

/// Captures every sink event for assertions.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Session headers seen (one per run).
    pub sessions: Vec<SessionInfo>,
    /// Range changes, in order.
    pub range_changes: Vec<MeasurementRange>,
    /// `(index, range)` pairs for every measurement start.
    pub measurement_starts: Vec<(u32, MeasurementRange)>,
    /// `(iteration, value)` pairs for every sample, in read order.
    pub samples: Vec<(usize, f64)>,
    /// Completed measurement records, in emission order.
    pub records: Vec<MeasurementRecord>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionSink for MemorySink {
    fn begin_session(&mut self, info: &SessionInfo) -> Result<(), SinkError> {
        self.sessions.push(info.clone());
        Ok(())
    }

    fn range_changed(&mut self, range: MeasurementRange) -> Result<(), SinkError> {
        self.range_changes.push(range);
        Ok(())
    }

    fn measurement_started(
        &mut self,
        index: u32,
        range: MeasurementRange,
    ) -> Result<(), SinkError> {
        self.measurement_starts.push((index, range));
        Ok(())
    }

    fn sample(&mut self, iteration: usize, value_amps: f64) -> Result<(), SinkError> {
        self.samples.push((iteration, value_amps));
        Ok(())
    }

    fn record(&mut self, record: &MeasurementRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}
