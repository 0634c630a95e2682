//! Numerically stable running mean and variance (Welford's algorithm).

/// Running mean, variance, and count over a stream of samples.
///
/// The accumulator is restartable and tolerant of invalid samples: an
/// infinite reading is substituted with NaN before being folded in, which
/// poisons the mean and standard deviation for the current accumulation
/// (IEEE arithmetic propagates NaN through every later update) while the
/// sample count keeps advancing. [`restart`](Self::restart) clears the
/// poison along with everything else.
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    /// Accumulated sum of squared deviations from the running mean.
    sum_sq: f64,
}

impl RunningStats {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to the empty state. Idempotent.
    pub fn restart(&mut self) {
        self.count = 0;
        self.mean = 0.0;
        self.sum_sq = 0.0;
    }

    /// Fold one sample into the running statistics.
    ///
    /// Infinite samples mark an unmeasurable condition (saturated or open
    /// input) and are folded in as NaN. The update never fails; NaN inputs
    /// poison the derived values by propagation, never the count.
    pub fn update(&mut self, x: f64) {
        let x = if x.is_infinite() { f64::NAN } else { x };
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = x - self.mean;
        self.sum_sq += delta * delta2;
    }

    /// Number of samples folded in since the last restart.
    pub fn sample_size(&self) -> u64 {
        self.count
    }

    /// The running mean. NaN when no samples have been folded in.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.mean
        }
    }

    /// The Bessel-corrected sample standard deviation.
    ///
    /// NaN when fewer than two samples have been folded in.
    pub fn standard_deviation(&self) -> f64 {
        if self.count < 2 {
            f64::NAN
        } else {
            (self.sum_sq / (self.count - 1) as f64).sqrt()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1e-300);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_accumulator() {
        let stats = RunningStats::new();
        assert_eq!(stats.sample_size(), 0);
        assert!(stats.mean().is_nan());
        assert!(stats.standard_deviation().is_nan());
    }

    #[test]
    fn test_single_sample_has_no_std_dev() {
        let mut stats = RunningStats::new();
        stats.update(3.5);
        assert_eq!(stats.sample_size(), 1);
        assert_close(stats.mean(), 3.5);
        assert!(stats.standard_deviation().is_nan());
    }

    #[test]
    fn test_mean_and_std_dev_match_closed_form() {
        // Nanoampere-scale values, where naive sum-of-squares accumulation
        // would lose precision.
        let mut stats = RunningStats::new();
        for x in [1.0e-9, 2.0e-9, 3.0e-9] {
            stats.update(x);
        }
        assert_eq!(stats.sample_size(), 3);
        assert_close(stats.mean(), 2.0e-9);
        assert_close(stats.standard_deviation(), 1.0e-9);
    }

    #[test]
    fn test_longer_sequence_against_two_pass_formulas() {
        let samples = [4.7, 1.2, -0.3, 8.9, 4.4, 3.1, 0.0, 2.2];
        let mut stats = RunningStats::new();
        for x in samples {
            stats.update(x);
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

        assert_close(stats.mean(), mean);
        assert_close(stats.standard_deviation(), var.sqrt());
    }

    #[test]
    fn test_infinite_sample_poisons_values_but_not_count() {
        let mut stats = RunningStats::new();
        stats.update(5.0);
        stats.update(f64::INFINITY);
        stats.update(5.0);

        assert_eq!(stats.sample_size(), 3);
        assert!(stats.mean().is_nan());
        assert!(stats.standard_deviation().is_nan());
    }

    #[test]
    fn test_negative_infinity_also_poisons() {
        let mut stats = RunningStats::new();
        stats.update(f64::NEG_INFINITY);
        stats.update(1.0);

        assert_eq!(stats.sample_size(), 2);
        assert!(stats.mean().is_nan());
        assert!(stats.standard_deviation().is_nan());
    }

    #[test]
    fn test_nan_input_propagates() {
        let mut stats = RunningStats::new();
        stats.update(f64::NAN);
        stats.update(2.0);
        stats.update(3.0);

        assert_eq!(stats.sample_size(), 3);
        assert!(stats.mean().is_nan());
        assert!(stats.standard_deviation().is_nan());
    }

    #[test]
    fn test_restart_behaves_like_fresh_accumulator() {
        let mut reused = RunningStats::new();
        reused.update(f64::INFINITY);
        reused.update(99.0);
        reused.restart();

        let mut fresh = RunningStats::new();
        for x in [1.5, 2.5, 3.5] {
            reused.update(x);
            fresh.update(x);
        }

        assert_eq!(reused.sample_size(), fresh.sample_size());
        assert_close(reused.mean(), fresh.mean());
        assert_close(reused.standard_deviation(), fresh.standard_deviation());
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut stats = RunningStats::new();
        stats.update(1.0);
        stats.restart();
        stats.restart();
        assert_eq!(stats.sample_size(), 0);
        assert!(stats.mean().is_nan());
    }
}
