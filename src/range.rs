//! Measurement range state machine.
//!
//! The instrument exposes a fixed ladder of photocurrent ranges. Range
//! transitions are pure and saturating: stepping past either end of the
//! ladder returns the same range unchanged, never wraps and never fails.

use std::fmt;

use serde::Serialize;

/// A photocurrent measurement range.
///
/// Ranges are ordered from the most sensitive (`Range01`, 50 nA full scale)
/// to the least sensitive (`Range07`, 50 mA full scale), one decade apart.
/// The engine holds the current range; [`increment`](Self::increment) and
/// [`decrement`](Self::decrement) produce the neighbouring range and the
/// caller assigns the result back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MeasurementRange {
    /// 50 nA full scale.
    Range01,
    /// 500 nA full scale.
    Range02,
    /// 5 µA full scale.
    Range03,
    /// 50 µA full scale.
    Range04,
    /// 500 µA full scale.
    Range05,
    /// 5 mA full scale.
    Range06,
    /// 50 mA full scale.
    Range07,
}

impl MeasurementRange {
    /// All ranges in ascending full-scale order.
    pub const ALL: [MeasurementRange; 7] = [
        MeasurementRange::Range01,
        MeasurementRange::Range02,
        MeasurementRange::Range03,
        MeasurementRange::Range04,
        MeasurementRange::Range05,
        MeasurementRange::Range06,
        MeasurementRange::Range07,
    ];

    /// Zero-based position of this range in [`ALL`](Self::ALL).
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }

    /// Full-scale photocurrent of this range in amperes.
    ///
    /// This is the specification value handed to the specification
    /// collaborator when a record is assembled; the engine itself never
    /// interprets it.
    pub fn full_scale_amps(self) -> f64 {
        match self {
            Self::Range01 => 50.0e-9,
            Self::Range02 => 500.0e-9,
            Self::Range03 => 5.0e-6,
            Self::Range04 => 50.0e-6,
            Self::Range05 => 500.0e-6,
            Self::Range06 => 5.0e-3,
            Self::Range07 => 50.0e-3,
        }
    }

    /// The next range one step up the ladder, saturating at the top.
    pub fn increment(self) -> Self {
        Self::ALL[(self.index() + 1).min(Self::ALL.len() - 1)]
    }

    /// The next range one step down the ladder, saturating at the bottom.
    pub fn decrement(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }
}

impl fmt::Display for MeasurementRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Range{:02}", self.index() + 1)
    }
}
