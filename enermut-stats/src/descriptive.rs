//! Descriptive Statistics
//!
//! Mean, sample standard deviation, and the coefficient of variation used
//! by the stability filter. The stability verdict is scale-invariant:
//! multiplying every sample by a positive constant scales mean and stdev
//! alike, leaving the verdict unchanged.

use crate::{StatsError, MIN_SAMPLES};

/// Arithmetic mean of a sample group.
///
/// Returns 0.0 for an empty slice; callers enforce non-emptiness upstream.
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
///
/// Requires at least [`MIN_SAMPLES`] values; variance is undefined below
/// that.
pub fn std_dev(samples: &[f64]) -> Result<f64, StatsError> {
    if samples.len() < MIN_SAMPLES {
        return Err(StatsError::InsufficientSamples {
            needed: MIN_SAMPLES,
            got: samples.len(),
        });
    }
    let m = mean(samples);
    let variance =
        samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (samples.len() - 1) as f64;
    Ok(variance.sqrt())
}

/// Coefficient of variation: stdev / mean.
///
/// Energy readings are non-negative, so a zero mean means an all-zero
/// group: 0/0 is taken as 0.0 (perfectly flat), while any spread around a
/// zero mean yields infinity (never stable).
pub fn coefficient_of_variation(samples: &[f64]) -> Result<f64, StatsError> {
    let sd = std_dev(samples)?;
    let m = mean(samples);
    if m == 0.0 {
        if sd == 0.0 {
            return Ok(0.0);
        }
        return Ok(f64::INFINITY);
    }
    Ok(sd / m)
}

/// Stability verdict for a measurement group.
///
/// A group is stable when its relative spread (stdev / mean) does not
/// exceed `threshold`. The default threshold of 1.0 is permissive and
/// effectively disables filtering unless tightened.
pub fn is_stable(samples: &[f64], threshold: f64) -> Result<bool, StatsError> {
    Ok(coefficient_of_variation(samples)? <= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert!((mean(&[1.0, 2.0, 3.0, 4.0, 5.0]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_basic() {
        // Sample stdev of [2, 4, 6, 8]: variance = 20/3
        let sd = std_dev(&[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert!((sd - (20.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_constant_group() {
        assert_eq!(std_dev(&[5.0, 5.0, 5.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_std_dev_insufficient() {
        assert!(matches!(
            std_dev(&[1.0]),
            Err(StatsError::InsufficientSamples { needed: 2, got: 1 })
        ));
    }

    #[test]
    fn test_stability_verdict() {
        // CV of [10, 10, 10] is 0 -> stable under any threshold
        assert!(is_stable(&[10.0, 10.0, 10.0], 0.0).unwrap());

        // [1, 100]: mean 50.5, sd 70.0 -> CV > 1
        assert!(!is_stable(&[1.0, 100.0], 1.0).unwrap());
        assert!(is_stable(&[1.0, 100.0], 2.0).unwrap());
    }

    #[test]
    fn test_stability_scale_invariant() {
        let group = [3.0, 4.0, 5.0, 6.0];
        let scaled: Vec<f64> = group.iter().map(|x| x * 1000.0).collect();
        for threshold in [0.05, 0.2, 1.0] {
            assert_eq!(
                is_stable(&group, threshold).unwrap(),
                is_stable(&scaled, threshold).unwrap()
            );
        }
    }

    #[test]
    fn test_zero_mean_groups() {
        // All-zero group is flat, hence stable
        assert!(is_stable(&[0.0, 0.0, 0.0], 1.0).unwrap());
        // Spread around a zero mean can never be stable
        assert!(!is_stable(&[-1.0, 1.0], 1e9).unwrap());
    }
}
