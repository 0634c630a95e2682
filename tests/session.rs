//! End-to-end session scenarios through the public API.

use photocal::{
    Command, CommandOutcome, ManufacturerSpec, MeasurementRange, MemorySink, ScriptedCommands,
    ScriptedSource, SessionConfig, SessionEngine,
};

fn engine(
    samples: Vec<f64>,
    config: &SessionConfig,
) -> SessionEngine<ScriptedSource, ManufacturerSpec> {
    SessionEngine::new(
        ScriptedSource::new(samples),
        ManufacturerSpec::default(),
        config,
    )
}

#[test]
fn nanoamp_measurement_yields_exact_statistics() {
    let config = SessionConfig::new().samples(3);
    let mut engine = engine(vec![1.0e-9, 2.0e-9, 3.0e-9], &config);
    let mut sink = MemorySink::new();
    let mut commands = ScriptedCommands::new(vec![Command::StartMeasurement, Command::Quit]);

    engine.run(&mut commands, &mut sink).unwrap();

    assert_eq!(sink.records.len(), 1);
    let record = &sink.records[0];
    assert_eq!(record.sample_size, 3);
    assert!((record.mean_amps - 2.0e-9).abs() <= 1e-9 * 2.0e-9);
    assert!((record.std_dev_amps - 1.0e-9).abs() <= 1e-9 * 1.0e-9);
}

#[test]
fn unmeasurable_sample_poisons_statistics_but_completes_measurement() {
    let config = SessionConfig::new().samples(3);
    let mut engine = engine(vec![5.0, f64::INFINITY, 5.0], &config);
    let mut sink = MemorySink::new();
    let mut commands = ScriptedCommands::new(vec![Command::StartMeasurement, Command::Quit]);

    engine.run(&mut commands, &mut sink).unwrap();

    let record = &sink.records[0];
    assert_eq!(record.sample_size, 3);
    assert!(record.mean_amps.is_nan());
    assert!(record.std_dev_amps.is_nan());
    // The loop ran to completion: all three samples were read and reported.
    assert_eq!(sink.samples.len(), 3);
}

#[test]
fn decrement_saturates_at_the_bottom_range() {
    let config = SessionConfig::new().initial_range(MeasurementRange::Range01);
    let mut engine = engine(vec![], &config);
    let mut sink = MemorySink::new();
    let mut commands = ScriptedCommands::new(vec![
        Command::RangeDown,
        Command::RangeDown,
        Command::RangeDown,
        Command::Quit,
    ]);

    engine.run(&mut commands, &mut sink).unwrap();

    assert_eq!(engine.current_range(), MeasurementRange::Range01);
    assert_eq!(engine.current_range().index(), 0);
    assert_eq!(
        sink.range_changes,
        vec![MeasurementRange::Range01; 3],
        "saturating transitions still announce the (unchanged) range"
    );
}

#[test]
fn increment_saturates_at_the_top_range() {
    let config = SessionConfig::new().initial_range(MeasurementRange::Range07);
    let mut engine = engine(vec![], &config);
    let mut sink = MemorySink::new();

    let outcome = engine.process_command(Command::RangeUp, &mut sink).unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::RangeChanged(MeasurementRange::Range07)
    );
}

#[test]
fn measurement_index_counts_only_completed_measurements() {
    let config = SessionConfig::new().samples(2);
    let mut engine = engine(vec![1.0, 1.1, 1.2, 1.3, 1.4, 1.5], &config);
    let mut sink = MemorySink::new();
    let mut commands = ScriptedCommands::new(vec![
        Command::RangeUp,
        Command::StartMeasurement,
        Command::RangeDown,
        Command::RangeDown,
        Command::StartMeasurement,
        Command::StartMeasurement,
        Command::Quit,
    ]);

    engine.run(&mut commands, &mut sink).unwrap();

    assert_eq!(engine.measurement_index(), 3);
    let indices: Vec<u32> = sink.records.iter().map(|r| r.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(sink.measurement_starts.len(), 3);
}

#[test]
fn quitting_never_increments_the_index() {
    let config = SessionConfig::new();
    let mut engine = engine(vec![], &config);
    let mut sink = MemorySink::new();
    let mut commands = ScriptedCommands::new(vec![Command::Quit]);

    engine.run(&mut commands, &mut sink).unwrap();
    assert_eq!(engine.measurement_index(), 0);
    assert!(sink.records.is_empty());
}

#[test]
fn requested_sample_counts_below_two_are_clamped() {
    for requested in [0, 1] {
        let config = SessionConfig::new().samples(requested);
        let mut engine = engine(vec![1.0, 2.0, 3.0], &config);
        let mut sink = MemorySink::new();

        engine
            .process_command(Command::StartMeasurement, &mut sink)
            .unwrap();

        assert_eq!(engine.max_samples(), 2);
        assert_eq!(sink.records[0].sample_size, 2);
        assert_eq!(sink.samples.len(), 2);
    }
}

#[test]
fn session_header_carries_normalized_comment_and_clamped_count() {
    let config = SessionConfig::new().samples(1).comment("  ");
    let mut engine = engine(vec![], &config);
    let mut sink = MemorySink::new();
    let mut commands = ScriptedCommands::new(vec![Command::Quit]);

    engine.run(&mut commands, &mut sink).unwrap();

    assert_eq!(sink.sessions.len(), 1);
    let info = &sink.sessions[0];
    assert_eq!(info.samples_per_measurement, 2);
    assert_eq!(info.comment, "---");
    assert_eq!(info.initial_range, MeasurementRange::Range03);
}

#[test]
fn records_capture_the_range_at_measurement_time() {
    let config = SessionConfig::new().samples(2);
    let mut engine = engine(vec![1.0, 1.0, 2.0, 2.0], &config);
    let mut sink = MemorySink::new();
    let mut commands = ScriptedCommands::new(vec![
        Command::StartMeasurement,
        Command::RangeUp,
        Command::RangeUp,
        Command::StartMeasurement,
        Command::Quit,
    ]);

    engine.run(&mut commands, &mut sink).unwrap();

    assert_eq!(sink.records[0].range, MeasurementRange::Range03);
    assert_eq!(sink.records[1].range, MeasurementRange::Range05);
}

#[test]
fn specification_fields_come_from_the_provider() {
    let config = SessionConfig::new().samples(2);
    let mut engine = engine(vec![2.0e-6, 2.0e-6], &config);
    let mut sink = MemorySink::new();

    engine
        .process_command(Command::StartMeasurement, &mut sink)
        .unwrap();

    let spec = sink.records[0].specification;
    // Default provider: 0.5 % of reading + 0.05 % of the 5 µA full scale.
    let expected = 0.005 * 2.0e-6 + 0.0005 * 5.0e-6;
    assert!((spec.accuracy_amps - expected).abs() < 1e-18);
    assert!((spec.test_current_amps - 2.0e-6).abs() < 1e-18);
    assert!(spec.test_current_uncertainty_amps < spec.accuracy_amps);
}
