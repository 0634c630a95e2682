//! Streaming statistics for measurement sessions.
//!
//! One measurement feeds every sample through [`RunningStats`], a one-pass
//! Welford accumulator: O(1) memory regardless of session length, and no
//! catastrophic cancellation from accumulating raw sums of squares.

mod welford;

pub use welford::RunningStats;
