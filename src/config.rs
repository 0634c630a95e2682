//! Configuration for a calibration session.

use crate::range::MeasurementRange;

/// Configuration options for [`SessionEngine`](crate::SessionEngine).
///
/// All settings are fixed for the whole session. The requested sample count
/// may be anything here; the engine clamps it to at least 2 at construction,
/// since a sample standard deviation is undefined below that.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Requested number of samples per measurement. Default: 10.
    pub samples: usize,

    /// Operator-supplied comment carried into the session header.
    ///
    /// A blank comment is normalized to `"---"` so log consumers always see
    /// a value in the field. Default: empty (normalized on read).
    pub comment: String,

    /// Measurement range active when the session begins.
    ///
    /// Default: [`MeasurementRange::Range03`] (5 µA full scale), a sensible
    /// starting point for typical photodiode test currents.
    pub initial_range: MeasurementRange,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            samples: 10,
            comment: String::new(),
            initial_range: MeasurementRange::Range03,
        }
    }
}

impl SessionConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested number of samples per measurement.
    pub fn samples(mut self, n: usize) -> Self {
        self.samples = n;
        self
    }

    /// Set the operator comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Set the initial measurement range.
    pub fn initial_range(mut self, range: MeasurementRange) -> Self {
        self.initial_range = range;
        self
    }

    /// The comment with blank input normalized to `"---"`.
    pub fn normalized_comment(&self) -> &str {
        if self.comment.trim().is_empty() {
            "---"
        } else {
            &self.comment
        }
    }

    /// The sample count the engine will actually use: at least 2.
    pub fn effective_samples(&self) -> usize {
        self.samples.max(2)
    }

    /// Check if the configuration is valid.
    ///
    /// Returns an error message if the configuration is invalid. The engine
    /// clamps a sub-minimum sample count on its own; this check is for
    /// front-ends that want to reject such input up front instead.
    pub fn validate(&self) -> Result<(), String> {
        if self.samples == 0 {
            return Err("samples must be positive".to_string());
        }
        if self.comment.contains('\n') || self.comment.contains('\r') {
            return Err("comment must be a single line".to_string());
        }
        Ok(())
    }
}
