//! Measurement Store Data Structures
//!
//! Leaf data structures for the two input shapes (reference and mutation
//! files) and the pipeline's output records. All downstream components
//! operate on read-only views of these and produce new derived values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One trial run: named sub-measurement components mapped to their energy
/// contributions. The scalar value of a sample is the sum of all
/// components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSample(pub BTreeMap<String, f64>);

impl ResultSample {
    /// Total energy of this trial: the sum over all components.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

/// Ordered sequence of per-trial energy scalars for one configuration
/// (one baseline epoch, or one specific mutation value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultGroup(pub Vec<f64>);

impl ResultGroup {
    /// Collapse a sequence of samples into their scalar totals.
    pub fn from_samples(samples: &[ResultSample]) -> Self {
        Self(samples.iter().map(ResultSample::total).collect())
    }

    /// The raw scalar values.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of trials in the group.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the group holds no trials.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Arithmetic mean of the group.
    pub fn mean(&self) -> f64 {
        enermut_stats::mean(&self.0)
    }
}

/// One baseline measurement epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Monotonically increasing epoch counter, unique across the sequence
    pub mileage: u64,
    /// Repeated trials of the unmodified program at this epoch
    pub results: Vec<ResultSample>,
}

/// All attempted perturbations of one parameter, in execution order.
/// The execution order defines the implicit mileage correspondence to the
/// reference sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationRecord {
    /// Identifiers for the parameter; the first is the canonical path
    pub paths: Vec<String>,
    /// Attempted perturbations, in the order they were executed
    pub mutations: Vec<MutationAttempt>,
}

impl MutationRecord {
    /// Canonical parameter path (first entry), or "" for a pathless record.
    pub fn canonical_path(&self) -> &str {
        self.paths.first().map(String::as_str).unwrap_or("")
    }
}

/// One trial of a specific perturbed parameter value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationAttempt {
    /// The perturbation; the first element is the perturbed value
    pub mutation: Vec<serde_json::Value>,
    /// Measurements, absent when the mutated program crashed or failed to
    /// produce any. An absent group is excluded, never treated as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ResultSample>>,
}

impl MutationAttempt {
    /// The perturbed value itself, if recorded.
    pub fn value(&self) -> Option<&serde_json::Value> {
        self.mutation.first()
    }
}

/// Pipeline output: one classified parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Index of the parameter in the mutation sequence
    pub parameter_index: usize,
    /// Canonical parameter path
    pub parameter_path: String,
    /// The best-performing perturbed value
    pub chosen_mutation_value: serde_json::Value,
    /// Matched baseline group
    pub reference_group: ResultGroup,
    /// Result group of the chosen mutation
    pub mutation_group: ResultGroup,
    /// One-sided Welch verdict at the configured significance level
    pub is_significant: bool,
    /// `1 - mean(mutation) / mean(reference)`: fraction of energy saved
    pub relative_energy_delta: f64,
}

/// Why a parameter produced no outcome. Recovered locally; the pipeline
/// continues past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The matched reference group was too noisy to use
    UnstableReference,
    /// Every attempt either crashed or was filtered as unstable
    AllAttemptsExhausted,
}

/// A parameter skipped by the pipeline, reported by path and index rather
/// than silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedParameter {
    /// Index of the parameter in the mutation sequence
    pub parameter_index: usize,
    /// Canonical parameter path
    pub parameter_path: String,
    /// What disqualified it
    pub reason: SkipReason,
}
