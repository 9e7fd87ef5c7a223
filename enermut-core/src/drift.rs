//! Reference Drift Detection
//!
//! Compares adjacent reference groups in the time-ordered baseline
//! sequence with the plain two-sided Welch test. A significant pair means
//! the measurement environment shifted between epochs. No tolerance
//! scaling applies in this mode.

use crate::model::{ReferenceRecord, ResultGroup};
use crate::AnalysisError;
use enermut_stats::{coefficient_of_variation, mean, std_dev, welch_t_test};
use serde::{Deserialize, Serialize};

/// One significant shift between adjacent baseline epochs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftPoint {
    /// Index of the later group of the pair (compared against index - 1)
    pub index: usize,
    /// Symmetric relative shift between the two group means:
    /// `2 * (m[i] - m[i-1]) / (m[i] + m[i-1])`
    pub relative_shift: f64,
}

/// Survey of a baseline sequence plus its drift points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    /// Mean energy per epoch, in sequence order
    pub group_means: Vec<f64>,
    /// Sample stdev per epoch
    pub group_spreads: Vec<f64>,
    /// Smallest epoch mean
    pub min_mean: f64,
    /// Largest epoch mean
    pub max_mean: f64,
    /// Mean of the per-epoch normalized stdev (coefficient of variation)
    pub cv_mean: f64,
    /// Spread of the per-epoch normalized stdev
    pub cv_spread: f64,
    /// Adjacent pairs whose difference is significant at the configured
    /// level
    pub drifts: Vec<DriftPoint>,
}

/// Survey a reference sequence and flag adjacent epochs whose energy
/// distributions differ significantly.
pub fn detect_drift(
    references: &[ReferenceRecord],
    alpha: f64,
) -> Result<DriftReport, AnalysisError> {
    if references.is_empty() {
        return Err(AnalysisError::EmptyReference);
    }

    let groups: Vec<ResultGroup> = references
        .iter()
        .map(|r| ResultGroup::from_samples(&r.results))
        .collect();

    let mut group_means = Vec::with_capacity(groups.len());
    let mut group_spreads = Vec::with_capacity(groups.len());
    let mut cvs = Vec::with_capacity(groups.len());
    for group in &groups {
        group_means.push(group.mean());
        group_spreads.push(std_dev(group.values())?);
        cvs.push(coefficient_of_variation(group.values())?);
    }

    let min_mean = group_means.iter().copied().fold(f64::INFINITY, f64::min);
    let max_mean = group_means
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let cv_mean = mean(&cvs);
    let cv_spread = if cvs.len() < 2 {
        0.0
    } else {
        std_dev(&cvs)?
    };

    let mut drifts = Vec::new();
    for i in 1..groups.len() {
        let test = welch_t_test(groups[i].values(), groups[i - 1].values())?;
        if test.p_two_sided < alpha {
            let (m_prev, m_cur) = (group_means[i - 1], group_means[i]);
            drifts.push(DriftPoint {
                index: i,
                relative_shift: 2.0 * (m_cur - m_prev) / (m_cur + m_prev),
            });
        }
    }

    Ok(DriftReport {
        group_means,
        group_spreads,
        min_mean,
        max_mean,
        cv_mean,
        cv_spread,
        drifts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reference(mileage: u64, totals: &[f64]) -> ReferenceRecord {
        ReferenceRecord {
            mileage,
            results: totals
                .iter()
                .map(|t| serde_json::from_value(json!({ "a": t })).unwrap())
                .collect(),
        }
    }

    #[test]
    fn test_flat_sequence_has_no_drift() {
        let refs = vec![
            reference(0, &[10.0, 10.2, 9.8, 10.1]),
            reference(1, &[10.1, 9.9, 10.0, 10.2]),
            reference(2, &[9.9, 10.1, 10.2, 9.8]),
        ];
        let report = detect_drift(&refs, 0.05).unwrap();
        assert!(report.drifts.is_empty());
        assert_eq!(report.group_means.len(), 3);
    }

    #[test]
    fn test_step_change_is_flagged() {
        let refs = vec![
            reference(0, &[10.0, 10.2, 9.8, 10.1]),
            reference(1, &[20.0, 20.2, 19.8, 20.1]),
        ];
        let report = detect_drift(&refs, 0.05).unwrap();
        assert_eq!(report.drifts.len(), 1);
        assert_eq!(report.drifts[0].index, 1);
        // 2 * (20 - 10) / (20 + 10) = 2/3
        assert!((report.drifts[0].relative_shift - 2.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn test_survey_numbers() {
        let refs = vec![
            reference(0, &[10.0, 10.0, 10.0]),
            reference(1, &[30.0, 30.0, 30.0]),
        ];
        let report = detect_drift(&refs, 0.05).unwrap();
        assert_eq!(report.min_mean, 10.0);
        assert_eq!(report.max_mean, 30.0);
        assert_eq!(report.cv_mean, 0.0);
        assert_eq!(report.cv_spread, 0.0);
    }

    #[test]
    fn test_empty_sequence() {
        assert!(matches!(
            detect_drift(&[], 0.05),
            Err(AnalysisError::EmptyReference)
        ));
    }
}
