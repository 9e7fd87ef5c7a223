//! Welch's Unequal-Variance t-Test
//!
//! Two-sample test that does not assume equal variances, with degrees of
//! freedom from the Welch–Satterthwaite equation. The two-sided p-value
//! comes from the Student-t CDF; [`one_sided_lower_p`] converts it into
//! the lower-tail form used by the significance classifier.

use crate::descriptive::mean;
use crate::{StatsError, MIN_SAMPLES};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a Welch two-sample t-test
#[derive(Debug, Clone, Copy)]
pub struct WelchTTest {
    /// t-statistic; negative when the test group's mean is below the
    /// reference group's mean
    pub statistic: f64,
    /// Welch–Satterthwaite degrees of freedom
    pub df: f64,
    /// Two-sided p-value
    pub p_two_sided: f64,
}

/// Run Welch's t-test comparing `test` against `reference`.
///
/// Both groups need at least [`MIN_SAMPLES`] values. When both groups have
/// zero variance the standard error degenerates to zero; the limit
/// behavior is pinned so downstream classification stays deterministic:
/// equal means give `t = 0, p = 1`, unequal means give `t = ±inf, p = 0`.
pub fn welch_t_test(test: &[f64], reference: &[f64]) -> Result<WelchTTest, StatsError> {
    for group in [test, reference] {
        if group.len() < MIN_SAMPLES {
            return Err(StatsError::InsufficientSamples {
                needed: MIN_SAMPLES,
                got: group.len(),
            });
        }
    }

    let n1 = test.len() as f64;
    let n2 = reference.len() as f64;
    let m1 = mean(test);
    let m2 = mean(reference);

    let v1 = test.iter().map(|x| (x - m1).powi(2)).sum::<f64>() / (n1 - 1.0);
    let v2 = reference.iter().map(|x| (x - m2).powi(2)).sum::<f64>() / (n2 - 1.0);

    let se1 = v1 / n1;
    let se2 = v2 / n2;
    let se = (se1 + se2).sqrt();

    if se == 0.0 {
        // Degenerate: both groups constant
        let (statistic, p_two_sided) = if m1 == m2 {
            (0.0, 1.0)
        } else if m1 < m2 {
            (f64::NEG_INFINITY, 0.0)
        } else {
            (f64::INFINITY, 0.0)
        };
        return Ok(WelchTTest {
            statistic,
            df: n1 + n2 - 2.0,
            p_two_sided,
        });
    }

    let statistic = (m1 - m2) / se;
    let df = (se1 + se2).powi(2) / (se1.powi(2) / (n1 - 1.0) + se2.powi(2) / (n2 - 1.0));

    // statrs only rejects df <= 0, which cannot happen past the guards above
    let dist = StudentsT::new(0.0, 1.0, df).expect("Welch df is always positive");
    let p_two_sided = 2.0 * (1.0 - dist.cdf(statistic.abs()));

    Ok(WelchTTest {
        statistic,
        df,
        p_two_sided,
    })
}

/// Convert a two-sided p-value into the one-sided lower-tail p-value
/// testing whether the test group's mean is significantly *below* the
/// reference group's mean.
///
/// The branch shape follows the original analysis: `t > 0` strictly, so
/// `t == 0` falls into the lower-tail `p/2` branch. At exactly `t == 0`
/// the two-sided p is 1.0 and both branches evaluate to 0.5.
pub fn one_sided_lower_p(statistic: f64, p_two_sided: f64) -> f64 {
    if statistic > 0.0 {
        1.0 - p_two_sided / 2.0
    } else {
        p_two_sided / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_ALPHA;

    #[test]
    fn test_identical_groups_not_significant() {
        let g = [10.0, 12.0, 11.0, 13.0, 10.0];
        let t = welch_t_test(&g, &g).unwrap();
        assert!(t.statistic.abs() < 1e-12);
        assert!((t.p_two_sided - 1.0).abs() < 1e-9);
        assert!((one_sided_lower_p(t.statistic, t.p_two_sided) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_clearly_lower_group() {
        let test = [5.0, 5.2, 4.8, 5.1, 4.9];
        let reference = [10.0, 10.3, 9.7, 10.1, 9.9];
        let t = welch_t_test(&test, &reference).unwrap();
        assert!(t.statistic < 0.0);
        assert!(one_sided_lower_p(t.statistic, t.p_two_sided) < DEFAULT_ALPHA);
    }

    #[test]
    fn test_clearly_higher_group_is_upper_tail() {
        let test = [20.0, 20.2, 19.8, 20.1, 19.9];
        let reference = [10.0, 10.3, 9.7, 10.1, 9.9];
        let t = welch_t_test(&test, &reference).unwrap();
        assert!(t.statistic > 0.0);
        // Lower-tail p approaches 1 for a higher test group
        assert!(one_sided_lower_p(t.statistic, t.p_two_sided) > 0.95);
    }

    #[test]
    fn test_degenerate_zero_variance() {
        let t = welch_t_test(&[5.0, 5.0, 5.0], &[10.0, 10.0, 10.0]).unwrap();
        assert_eq!(t.statistic, f64::NEG_INFINITY);
        assert_eq!(t.p_two_sided, 0.0);
        assert_eq!(one_sided_lower_p(t.statistic, t.p_two_sided), 0.0);

        let equal = welch_t_test(&[5.0, 5.0], &[5.0, 5.0]).unwrap();
        assert_eq!(equal.statistic, 0.0);
        assert_eq!(equal.p_two_sided, 1.0);
    }

    #[test]
    fn test_insufficient_samples() {
        assert!(matches!(
            welch_t_test(&[1.0], &[1.0, 2.0]),
            Err(StatsError::InsufficientSamples { .. })
        ));
        assert!(matches!(
            welch_t_test(&[1.0, 2.0], &[]),
            Err(StatsError::InsufficientSamples { .. })
        ));
    }

    #[test]
    fn test_df_between_pooled_bounds() {
        // Welch df lies between min(n1, n2) - 1 and n1 + n2 - 2
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [10.0, 30.0, 20.0];
        let t = welch_t_test(&a, &b).unwrap();
        assert!(t.df >= 2.0 - 1e-9);
        assert!(t.df <= 7.0 + 1e-9);
    }
}
