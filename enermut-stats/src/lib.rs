#![warn(missing_docs)]
//! Enermut Statistical Engine
//!
//! Provides the numeric core for mutation-significance analysis:
//! - Descriptive statistics (mean, sample standard deviation)
//! - Stability verdicts via the coefficient of variation
//! - Welch's unequal-variance two-sample t-test
//! - One-sided lower-tail p-value conversion

mod descriptive;
mod welch;

pub use descriptive::{coefficient_of_variation, is_stable, mean, std_dev};
pub use welch::{one_sided_lower_p, welch_t_test, WelchTTest};

/// Minimum number of samples required for a variance estimate
pub const MIN_SAMPLES: usize = 2;

/// Default significance level for hypothesis tests
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Errors from statistical computations
#[derive(Debug, Clone, thiserror::Error)]
pub enum StatsError {
    /// A group had too few samples for the requested statistic
    #[error("need at least {needed} samples, got {got}")]
    InsufficientSamples {
        /// Minimum sample count the statistic requires
        needed: usize,
        /// Sample count actually supplied
        got: usize,
    },
}
