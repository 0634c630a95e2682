//! Interactive calibration session CLI.
//!
//! Wires a command loop on stdin to the session engine, with output fanned
//! out to the terminal, an append-mode log file, and a per-session CSV file.
//! Instrument communication is out of scope here, so the sample source is
//! the crate's simulated photodiode; a hardware build swaps in a driver
//! implementing `SampleSource`.
//!
//! Commands, one per line: empty line (or anything unrecognized) starts a
//! measurement, `+`/`u` steps the range up, `-`/`d` steps it down, `q`
//! quits. Take care: the CSV file is overwritten without warning.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use rand::Rng;

use photocal::{
    Command, CommandSource, CsvWriter, FanoutSink, LogWriter, ManufacturerSpec, SessionConfig,
    SessionEngine, SimulatedPhotodiode, TerminalSink,
};

#[derive(Parser, Debug)]
#[command(version, about = "Calibration session for an optical power meter (simulated source)")]
struct Options {
    /// Number of samples per measurement.
    #[arg(short = 'n', long = "number", default_value_t = 10)]
    samples: usize,

    /// User supplied comment string.
    #[arg(long, default_value = "")]
    comment: String,

    /// Log and CSV base file name.
    #[arg(long = "logfile", default_value = "photocal")]
    logfile: String,

    /// Simulated photocurrent level in amperes.
    #[arg(long, default_value_t = 2.0e-6)]
    level: f64,

    /// Relative noise of the simulated source.
    #[arg(long, default_value_t = 0.02)]
    noise: f64,

    /// Seed for the simulated source; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

/// Blocking operator commands from stdin, one per line.
struct StdinCommands {
    stdin: io::Stdin,
}

impl StdinCommands {
    fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl CommandSource for StdinCommands {
    fn next_command(&mut self) -> Command {
        print!("ENTER to start a measurement - 'q' to quit, '+'/'-' to change range > ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match self.stdin.lock().read_line(&mut line) {
            // EOF: treat a closed stdin as quit
            Ok(0) | Err(_) => Command::Quit,
            Ok(_) => match line.trim() {
                "q" | "Q" => Command::Quit,
                "+" | "u" => Command::RangeUp,
                "-" | "d" => Command::RangeDown,
                _ => Command::StartMeasurement,
            },
        }
    }
}

fn main() -> Result<()> {
    let options = Options::parse();

    let config = SessionConfig::new()
        .samples(options.samples)
        .comment(options.comment.clone());
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid session configuration")?;

    let seed = options.seed.unwrap_or_else(|| rand::rng().random());
    let source = SimulatedPhotodiode::new(options.level, options.noise, seed);
    let mut engine = SessionEngine::new(source, ManufacturerSpec::default(), &config);

    let log_path = format!("{}.log", options.logfile);
    let csv_path = format!("{}.csv", options.logfile);
    let mut sink = FanoutSink::new()
        .with(Box::new(TerminalSink::new()))
        .with(Box::new(
            LogWriter::append_to(&log_path)
                .with_context(|| format!("cannot open log file {log_path}"))?,
        ))
        .with(Box::new(
            CsvWriter::create(&csv_path)
                .with_context(|| format!("cannot create CSV file {csv_path}"))?,
        ));

    let mut commands = StdinCommands::new();
    engine
        .run(&mut commands, &mut sink)
        .context("session aborted on output failure")?;

    println!("bye.");
    Ok(())
}
