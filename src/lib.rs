//! # photocal
//!
//! Interactive calibration session engine for optical power meter
//! photocurrent measurements.
//!
//! This crate drives one calibration session against a laboratory instrument:
//! it repeatedly samples the photodiode current, accumulates numerically
//! stable running statistics per measurement, lets the operator switch the
//! instrument's measurement range between measurements, and emits a
//! human-readable log plus a machine-readable record for every completed
//! measurement.
//!
//! Instrument communication, command-line parsing, and file persistence are
//! deliberately outside the engine: they are supplied through the narrow
//! [`SampleSource`], [`CommandSource`], and [`SessionSink`] traits, so the
//! session logic can be tested without hardware.
//!
//! ## Common Pitfall: Unmeasurable Readings
//!
//! A saturated or disconnected input reports an infinite current. The engine
//! never aborts a measurement over this: the reading is folded into the
//! statistics as NaN, poisoning the mean and standard deviation for that
//! measurement while the sample count keeps advancing. The operator still
//! gets a record with the full sample count and NaN statistics.
//!
//! ## Quick Start
//!
//! ```no_run
//! use photocal::{
//!     Command, CommandSource, ManufacturerSpec, SessionConfig, SessionEngine,
//!     SimulatedPhotodiode, TerminalSink,
//! };
//!
//! struct OneShot(bool);
//! impl CommandSource for OneShot {
//!     fn next_command(&mut self) -> Command {
//!         if self.0 {
//!             Command::Quit
//!         } else {
//!             self.0 = true;
//!             Command::StartMeasurement
//!         }
//!     }
//! }
//!
//! let config = SessionConfig::new().samples(20).comment("detector SN 1234");
//! let source = SimulatedPhotodiode::new(2.0e-9, 0.05, 42);
//! let mut engine = SessionEngine::new(source, ManufacturerSpec::default(), &config);
//! let mut sink = TerminalSink::new();
//! engine.run(&mut OneShot(false), &mut sink).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod range;
mod session;

// Functional modules
pub mod helpers;
pub mod measurement;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use config::SessionConfig;
pub use helpers::{MemorySink, ScriptedCommands, ScriptedSource, SimulatedPhotodiode};
pub use measurement::{ManufacturerSpec, SampleSource, Specification, SpecificationProvider};
pub use output::{CsvWriter, FanoutSink, LogWriter, SessionSink, SinkError, TerminalSink};
pub use range::MeasurementRange;
pub use session::{
    Command, CommandOutcome, CommandSource, MeasurementRecord, SessionEngine, SessionInfo,
};
pub use statistics::RunningStats;
