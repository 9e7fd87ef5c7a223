#![warn(missing_docs)]
//! Enermut Core - Mutation-Significance Analysis Pipeline
//!
//! Analyzes energy measurements collected from repeated executions of a
//! reference program and many mutated variants of it. For each mutated
//! parameter the pipeline decides whether the mutation changed measured
//! energy consumption in a statistically defensible way:
//!
//! 1. Match each mutation record to its reference baseline epoch
//! 2. Reject measurement groups that are too noisy to trust
//! 3. Pick the best-performing (lowest mean energy) mutation value
//! 4. Classify significance with a one-sided Welch t-test
//!
//! The pipeline is a single-threaded batch computation over an in-memory
//! dataset; source records are never mutated.

mod drift;
mod matcher;
mod model;
mod pipeline;

pub use drift::{detect_drift, DriftPoint, DriftReport};
pub use matcher::match_baselines;
pub use model::{
    AnalysisOutcome, MutationAttempt, MutationRecord, ReferenceRecord, ResultGroup, ResultSample,
    SkipReason, SkippedParameter,
};
pub use pipeline::{analyze, classify, AnalysisConfig, AnalysisReport};

use enermut_stats::StatsError;

/// Errors from the analysis pipeline
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnalysisError {
    /// The reference sequence was empty
    #[error("reference sequence is empty")]
    EmptyReference,
    /// A mutation index fell beyond the final reference epoch
    #[error(
        "mutation index {mutation_index} is beyond the final reference mileage {last_mileage}"
    )]
    BaselineOutOfRange {
        /// Index of the mutation record with no covering baseline
        mutation_index: usize,
        /// Mileage of the last reference record
        last_mileage: u64,
    },
    /// A measurement group was too small for a statistic
    #[error(transparent)]
    Stats(#[from] StatsError),
}
