//! Analysis Pipeline
//!
//! Wires the baseline matcher, stability filter, best-mutation selector,
//! and significance classifier into one batch pass over the measurement
//! store. Data flows strictly forward; per-parameter data-quality issues
//! are recovered locally (the parameter is skipped, logged, and recorded)
//! while structural errors abort the run.

use crate::matcher::match_baselines;
use crate::model::{
    AnalysisOutcome, MutationRecord, ReferenceRecord, ResultGroup, SkipReason, SkippedParameter,
};
use crate::AnalysisError;
use enermut_stats::{is_stable, one_sided_lower_p, welch_t_test, StatsError, DEFAULT_ALPHA};

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Maximum tolerated coefficient of variation (stdev / mean) for a
    /// measurement group to be trusted. The default of 1.0 is permissive.
    pub stability_threshold: f64,
    /// Fractional margin subtracted from the reference before comparison:
    /// a mutation must beat the reference by more than this fraction to
    /// count as significant. Default 0 (no scaling).
    pub tolerance: f64,
    /// Significance level for the one-sided test
    pub alpha: f64,
    /// Compatibility policy: when an unstable mutation attempt is
    /// encountered, discard the best candidate accumulated so far and
    /// start over from "no candidate yet". Off, unstable attempts are
    /// merely skipped and earlier stable candidates survive.
    pub reset_on_unstable: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stability_threshold: 1.0,
            tolerance: 0.0,
            alpha: DEFAULT_ALPHA,
            reset_on_unstable: true,
        }
    }
}

/// Output of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    /// One outcome per parameter that survived filtering and selection
    pub outcomes: Vec<AnalysisOutcome>,
    /// Parameters that produced no outcome, with the reason
    pub skipped: Vec<SkippedParameter>,
}

impl AnalysisReport {
    /// Outcomes classified as significant.
    pub fn significant(&self) -> impl Iterator<Item = &AnalysisOutcome> {
        self.outcomes.iter().filter(|o| o.is_significant)
    }
}

/// Classify whether `mutation` consumes significantly less energy than
/// `reference`, with the reference scaled down by `tolerance` first.
///
/// Runs Welch's unequal-variance t-test and converts its two-sided
/// p-value into the one-sided lower-tail form; significant iff that
/// p-value is below `alpha`. The tolerance scaling moves the reference
/// toward the mutation, so raising `tolerance` tightens the bar: verdicts
/// can only flip from significant to not, never the other way.
pub fn classify(
    mutation: &[f64],
    reference: &[f64],
    tolerance: f64,
    alpha: f64,
) -> Result<bool, StatsError> {
    let scaled: Vec<f64> = reference.iter().map(|r| r * (1.0 - tolerance)).collect();
    let test = welch_t_test(mutation, &scaled)?;
    Ok(one_sided_lower_p(test.statistic, test.p_two_sided) < alpha)
}

/// Run the full mutation-significance pipeline.
///
/// For each mutation record: match its baseline epoch, require a stable
/// reference group, select the stable attempt with the lowest mean
/// energy, and classify the selection against the baseline.
pub fn analyze(
    references: &[ReferenceRecord],
    mutations: &[MutationRecord],
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let mapping = match_baselines(references, mutations.len())?;

    let mut report = AnalysisReport::default();
    for (i, record) in mutations.iter().enumerate() {
        let path = record.canonical_path();
        let reference_group = ResultGroup::from_samples(&references[mapping[i]].results);

        if !is_stable(reference_group.values(), config.stability_threshold)? {
            tracing::warn!(parameter = path, index = i, "unstable reference, skipping");
            report.skipped.push(SkippedParameter {
                parameter_index: i,
                parameter_path: path.to_string(),
                reason: SkipReason::UnstableReference,
            });
            continue;
        }

        match select_best_attempt(record, config)? {
            Some(best) => {
                let is_significant = classify(
                    best.group.values(),
                    reference_group.values(),
                    config.tolerance,
                    config.alpha,
                )?;
                let relative_energy_delta = 1.0 - best.group.mean() / reference_group.mean();
                report.outcomes.push(AnalysisOutcome {
                    parameter_index: i,
                    parameter_path: path.to_string(),
                    chosen_mutation_value: best.value,
                    reference_group,
                    mutation_group: best.group,
                    is_significant,
                    relative_energy_delta,
                });
            }
            None => {
                tracing::warn!(
                    parameter = path,
                    index = i,
                    "all mutations crashed or unstable"
                );
                report.skipped.push(SkippedParameter {
                    parameter_index: i,
                    parameter_path: path.to_string(),
                    reason: SkipReason::AllAttemptsExhausted,
                });
            }
        }
    }
    Ok(report)
}

struct BestAttempt {
    mean: f64,
    value: serde_json::Value,
    group: ResultGroup,
}

/// Scan a parameter's attempts for the stable one with the lowest mean.
///
/// Attempts without results (crashed runs) never participate. Ties break
/// toward the first attempt encountered. Under the reset-on-unstable
/// policy, an unstable attempt also discards the candidate accumulated so
/// far, reproducing the original accumulator behavior.
fn select_best_attempt(
    record: &MutationRecord,
    config: &AnalysisConfig,
) -> Result<Option<BestAttempt>, AnalysisError> {
    let mut best: Option<BestAttempt> = None;
    for attempt in &record.mutations {
        let Some(samples) = &attempt.results else {
            continue;
        };
        let group = ResultGroup::from_samples(samples);
        if !is_stable(group.values(), config.stability_threshold)? {
            tracing::warn!(
                parameter = record.canonical_path(),
                "unstable mutation attempt"
            );
            if config.reset_on_unstable {
                best = None;
            }
            continue;
        }
        let mean = group.mean();
        if best.as_ref().is_none_or(|b| mean < b.mean) {
            best = Some(BestAttempt {
                mean,
                value: attempt.value().cloned().unwrap_or(serde_json::Value::Null),
                group,
            });
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(total: f64) -> crate::ResultSample {
        serde_json::from_value(json!({ "a": total })).unwrap()
    }

    fn reference(mileage: u64, totals: &[f64]) -> ReferenceRecord {
        ReferenceRecord {
            mileage,
            results: totals.iter().copied().map(sample).collect(),
        }
    }

    fn attempt(value: serde_json::Value, totals: Option<&[f64]>) -> crate::MutationAttempt {
        crate::MutationAttempt {
            mutation: vec![value],
            results: totals.map(|t| t.iter().copied().map(sample).collect()),
        }
    }

    fn mutation(path: &str, attempts: Vec<crate::MutationAttempt>) -> MutationRecord {
        MutationRecord {
            paths: vec![path.to_string()],
            mutations: attempts,
        }
    }

    #[test]
    fn test_end_to_end_single_parameter() {
        let references = vec![
            reference(0, &[10.0, 10.0, 10.0]),
            reference(1, &[10.0, 10.0, 10.0]),
        ];
        let mutations = vec![mutation(
            "cfg/app.xml:poll_interval",
            vec![
                attempt(json!(30), Some(&[5.0, 5.0, 5.0])),
                attempt(json!(60), None), // crashed
            ],
        )];

        let report = analyze(&references, &mutations, &AnalysisConfig::default()).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.outcomes.len(), 1);

        let outcome = &report.outcomes[0];
        assert_eq!(outcome.parameter_index, 0);
        assert_eq!(outcome.chosen_mutation_value, json!(30));
        assert_eq!(outcome.reference_group.values(), &[10.0, 10.0, 10.0]);
        assert_eq!(outcome.mutation_group.values(), &[5.0, 5.0, 5.0]);
        assert!(outcome.is_significant);
        assert!((outcome.relative_energy_delta - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_selector_skips_unstable_and_crashed() {
        // Means [5.0 (unstable), 3.0, 4.0] at threshold 0.1: the unstable
        // first attempt is discarded, 3.0 wins over 4.0.
        let references = vec![reference(0, &[10.0, 10.1, 9.9])];
        let mutations = vec![mutation(
            "p",
            vec![
                attempt(json!(1), Some(&[1.0, 9.0, 5.0])), // mean 5.0, CV > 0.1
                attempt(json!(2), Some(&[3.0, 3.01, 2.99])),
                attempt(json!(3), Some(&[4.0, 4.01, 3.99])),
                attempt(json!(4), None),
            ],
        )];

        let config = AnalysisConfig {
            stability_threshold: 0.1,
            ..Default::default()
        };
        let report = analyze(&references, &mutations, &config).unwrap();
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].chosen_mutation_value, json!(2));
        assert!((report.outcomes[0].mutation_group.mean() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_on_unstable_policy() {
        // A stable candidate followed by an unstable attempt: the compat
        // policy forgets it, the corrected policy keeps it.
        let references = vec![reference(0, &[10.0, 10.1, 9.9])];
        let mutations = vec![mutation(
            "p",
            vec![
                attempt(json!("best"), Some(&[3.0, 3.01, 2.99])),
                attempt(json!("noisy"), Some(&[1.0, 9.0, 5.0])),
                attempt(json!("worse"), Some(&[4.0, 4.01, 3.99])),
            ],
        )];

        let compat = AnalysisConfig {
            stability_threshold: 0.1,
            ..Default::default()
        };
        let report = analyze(&references, &mutations, &compat).unwrap();
        assert_eq!(report.outcomes[0].chosen_mutation_value, json!("worse"));

        let corrected = AnalysisConfig {
            stability_threshold: 0.1,
            reset_on_unstable: false,
            ..Default::default()
        };
        let report = analyze(&references, &mutations, &corrected).unwrap();
        assert_eq!(report.outcomes[0].chosen_mutation_value, json!("best"));
    }

    #[test]
    fn test_unstable_reference_skips_parameter() {
        let references = vec![reference(0, &[1.0, 100.0, 50.0])];
        let mutations = vec![mutation(
            "p",
            vec![attempt(json!(1), Some(&[3.0, 3.0, 3.0]))],
        )];

        let config = AnalysisConfig {
            stability_threshold: 0.1,
            ..Default::default()
        };
        let report = analyze(&references, &mutations, &config).unwrap();
        assert!(report.outcomes.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::UnstableReference);
    }

    #[test]
    fn test_all_attempts_exhausted() {
        let references = vec![reference(0, &[10.0, 10.0, 10.0])];
        let mutations = vec![mutation(
            "p",
            vec![attempt(json!(1), None), attempt(json!(2), None)],
        )];

        let report = analyze(&references, &mutations, &AnalysisConfig::default()).unwrap();
        assert!(report.outcomes.is_empty());
        assert_eq!(report.skipped[0].reason, SkipReason::AllAttemptsExhausted);
    }

    #[test]
    fn test_classify_self_comparison_never_significant() {
        let g = [10.0, 11.0, 9.5, 10.2, 10.8];
        assert!(!classify(&g, &g, 0.0, DEFAULT_ALPHA).unwrap());
    }

    #[test]
    fn test_classify_tolerance_monotonicity() {
        // Raising tolerance moves the reference toward the mutation, so
        // verdicts only ever flip from significant to not.
        let mutation = [9.0, 9.2, 8.8, 9.1, 8.9];
        let reference = [10.0, 10.3, 9.7, 10.1, 9.9];
        let mut previous = true;
        for step in 0..10 {
            let tolerance = step as f64 * 0.05;
            let verdict = classify(&mutation, &reference, tolerance, DEFAULT_ALPHA).unwrap();
            assert!(previous || !verdict, "verdict flipped back at {tolerance}");
            previous = verdict;
        }
        // Clearly significant without a margin, clearly not at a 50% margin
        assert!(classify(&mutation, &reference, 0.0, DEFAULT_ALPHA).unwrap());
        assert!(!classify(&mutation, &reference, 0.5, DEFAULT_ALPHA).unwrap());
    }

    #[test]
    fn test_insufficient_samples_is_fatal() {
        let references = vec![reference(0, &[10.0])];
        let mutations = vec![mutation(
            "p",
            vec![attempt(json!(1), Some(&[5.0, 5.0, 5.0]))],
        )];
        assert!(matches!(
            analyze(&references, &mutations, &AnalysisConfig::default()),
            Err(AnalysisError::Stats(_))
        ));
    }
}
