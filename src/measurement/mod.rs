//! Instrument-facing collaborator seams.
//!
//! The session engine never talks to hardware directly. It consumes two
//! narrow traits: [`SampleSource`] for raw photocurrent readings and
//! [`SpecificationProvider`] for the accuracy figures attached to each
//! completed measurement. A driver for a real power meter implements both
//! over its bus protocol; tests and demos use the doubles in
//! [`helpers`](crate::helpers).

use serde::Serialize;

use crate::range::MeasurementRange;

/// A blocking source of raw photocurrent readings.
///
/// `read_sample` may return positive or negative infinity to signal an
/// unmeasurable condition (saturated or open input); the engine folds such
/// readings into the statistics as NaN. Any harder failure (bus error,
/// device gone) is outside the session contract and should abort the
/// surrounding program instead of being masked here.
pub trait SampleSource {
    /// Read one raw photocurrent sample in amperes. Blocks until a value
    /// is available.
    fn read_sample(&mut self) -> f64;

    /// Push a range change to the instrument.
    ///
    /// Called once at session start with the configured initial range and
    /// again on every operator range change. Sources without a range
    /// concept can ignore it.
    fn apply_range(&mut self, _range: MeasurementRange) {}
}

/// Accuracy figures for one completed measurement.
///
/// These fields travel opaquely through the engine into the emitted record;
/// only the [`SpecificationProvider`] that produced them gives them meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Specification {
    /// Instrument accuracy specification at this reading and range, in
    /// amperes.
    pub accuracy_amps: f64,
    /// Test current assigned to the calibration point, in amperes.
    pub test_current_amps: f64,
    /// Standard uncertainty of the test current, in amperes.
    pub test_current_uncertainty_amps: f64,
}

/// Supplies the accuracy specification for a completed measurement.
///
/// Consulted exactly once per record, with the measurement's mean value and
/// the range it was taken at.
pub trait SpecificationProvider {
    /// Compute the specification for a mean reading on a given range.
    fn specification_for(&self, mean_amps: f64, range: MeasurementRange) -> Specification;
}

/// Manufacturer-style accuracy model: a gain error proportional to the
/// reading plus an offset proportional to the range's full scale.
///
/// The standard uncertainty of the test current is derived from the accuracy
/// bound assuming a rectangular distribution (division by sqrt 3), the usual
/// treatment for a manufacturer tolerance.
#[derive(Debug, Clone, Copy)]
pub struct ManufacturerSpec {
    /// Relative gain error, as a fraction of the reading.
    pub gain_error: f64,
    /// Offset error, as a fraction of full scale.
    pub offset_fraction: f64,
}

impl Default for ManufacturerSpec {
    /// 0.5 % of reading + 0.05 % of full scale.
    fn default() -> Self {
        Self {
            gain_error: 0.005,
            offset_fraction: 0.0005,
        }
    }
}

impl SpecificationProvider for ManufacturerSpec {
    fn specification_for(&self, mean_amps: f64, range: MeasurementRange) -> Specification {
        let accuracy =
            self.gain_error * mean_amps.abs() + self.offset_fraction * range.full_scale_amps();
        Specification {
            accuracy_amps: accuracy,
            test_current_amps: mean_amps,
            test_current_uncertainty_amps: accuracy / 3f64.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manufacturer_spec_combines_gain_and_offset() {
        let provider = ManufacturerSpec {
            gain_error: 0.01,
            offset_fraction: 0.001,
        };
        // Range03 full scale is 5 µA.
        let spec = provider.specification_for(2.0e-6, MeasurementRange::Range03);

        let expected = 0.01 * 2.0e-6 + 0.001 * 5.0e-6;
        assert!((spec.accuracy_amps - expected).abs() < 1e-18);
        assert_eq!(spec.test_current_amps, 2.0e-6);
        assert!((spec.test_current_uncertainty_amps - expected / 3f64.sqrt()).abs() < 1e-18);
    }

    #[test]
    fn test_gain_term_uses_magnitude() {
        let provider = ManufacturerSpec::default();
        let pos = provider.specification_for(1.0e-6, MeasurementRange::Range03);
        let neg = provider.specification_for(-1.0e-6, MeasurementRange::Range03);
        assert_eq!(pos.accuracy_amps, neg.accuracy_amps);
    }

    #[test]
    fn test_nan_mean_yields_nan_specification() {
        // A poisoned measurement still gets a record; its specification
        // fields are NaN like its statistics.
        let provider = ManufacturerSpec::default();
        let spec = provider.specification_for(f64::NAN, MeasurementRange::Range03);
        assert!(spec.accuracy_amps.is_nan());
        assert!(spec.test_current_amps.is_nan());
        assert!(spec.test_current_uncertainty_amps.is_nan());
    }
}
