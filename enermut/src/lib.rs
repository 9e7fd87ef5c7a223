#![warn(missing_docs)]
//! # Enermut
//!
//! Mutation-significance analysis for energy-measurement campaigns.
//!
//! Enermut takes energy measurements from repeated executions of a
//! reference program and of many mutated variants (each mutation
//! perturbing one configuration parameter) and decides, per parameter,
//! whether the mutation changed energy consumption in a statistically
//! defensible way:
//!
//! - **Baseline matching**: each mutation record is aligned to its
//!   reference measurement epoch by a forward-only mileage watermark
//! - **Stability filtering**: groups whose relative spread exceeds a
//!   threshold are too noisy to trust
//! - **Best-mutation selection**: the stable attempt with the lowest mean
//!   energy represents the parameter
//! - **Significance classification**: a one-sided Welch t-test decides
//!   whether the selected mutation beats its baseline
//!
//! ## Quick Start
//!
//! ```
//! use enermut::{analyze, AnalysisConfig, ReferenceRecord, MutationRecord};
//!
//! let references: Vec<ReferenceRecord> = serde_json::from_str(
//!     r#"[{"mileage": 0, "results": [{"a": 10.0}, {"a": 10.1}, {"a": 9.9}]}]"#,
//! ).unwrap();
//! let mutations: Vec<MutationRecord> = serde_json::from_str(
//!     r#"[{"paths": ["cfg/interval"], "mutations": [
//!         {"mutation": [30], "results": [{"a": 5.0}, {"a": 5.1}, {"a": 4.9}]}
//!     ]}]"#,
//! ).unwrap();
//!
//! let report = analyze(&references, &mutations, &AnalysisConfig::default()).unwrap();
//! assert!(report.outcomes[0].is_significant);
//! ```

// Re-export the analysis pipeline
pub use enermut_core::{
    analyze, classify, detect_drift, match_baselines, AnalysisConfig, AnalysisError,
    AnalysisOutcome, AnalysisReport, DriftPoint, DriftReport, MutationAttempt, MutationRecord,
    ReferenceRecord, ResultGroup, ResultSample, SkipReason, SkippedParameter,
};

// Re-export the statistical engine
pub use enermut_stats::{
    is_stable, one_sided_lower_p, welch_t_test, StatsError, WelchTTest, DEFAULT_ALPHA,
};

// Re-export reporting
pub use enermut_report::{
    build_report, drift_panels, format_drift_output, format_human_output, generate_json_report,
    overview_chart, significant_panels, ErrorBarChart, PanelGrid, Report,
};

/// Run the enermut CLI harness.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     enermut::run()
/// }
/// ```
pub use enermut_cli::run;
