//! Report Data Structures

use chrono::{DateTime, Utc};
use enermut_core::{AnalysisConfig, AnalysisOutcome, AnalysisReport, SkipReason, SkippedParameter};
use serde::{Deserialize, Serialize};

/// Schema version of the JSON report document
pub const SCHEMA_VERSION: u32 = 1;

/// Complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Run metadata
    pub meta: ReportMeta,
    /// One entry per analyzed parameter, in mutation-sequence order
    pub outcomes: Vec<AnalysisOutcome>,
    /// Parameters that produced no outcome
    pub skipped: Vec<SkippedParameter>,
    /// Aggregate counts
    pub summary: ReportSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// JSON schema version
    pub schema_version: u32,
    /// enermut version that produced the report
    pub version: String,
    /// When the analysis ran
    pub timestamp: DateTime<Utc>,
    /// Configuration the pipeline ran with
    pub config: ReportConfig,
}

/// Pipeline configuration echoed into the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Stability threshold (maximum coefficient of variation)
    pub stability_threshold: f64,
    /// Tolerance margin applied to the reference
    pub tolerance: f64,
    /// Significance level
    pub alpha: f64,
    /// Whether the reset-on-unstable compatibility policy was active
    pub reset_on_unstable: bool,
}

impl From<&AnalysisConfig> for ReportConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            stability_threshold: config.stability_threshold,
            tolerance: config.tolerance,
            alpha: config.alpha,
            reset_on_unstable: config.reset_on_unstable,
        }
    }
}

/// Aggregate counts over one pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Parameters present in the mutation file
    pub total_parameters: usize,
    /// Parameters that survived filtering and selection
    pub analyzed: usize,
    /// Analyzed parameters classified as significant
    pub significant: usize,
    /// Parameters skipped for an unstable reference group
    pub skipped_unstable_reference: usize,
    /// Parameters whose attempts all crashed or were unstable
    pub skipped_exhausted: usize,
}

/// Assemble the report document from a pipeline run.
pub fn build_report(analysis: &AnalysisReport, config: &AnalysisConfig) -> Report {
    let summary = ReportSummary {
        total_parameters: analysis.outcomes.len() + analysis.skipped.len(),
        analyzed: analysis.outcomes.len(),
        significant: analysis.significant().count(),
        skipped_unstable_reference: analysis
            .skipped
            .iter()
            .filter(|s| s.reason == SkipReason::UnstableReference)
            .count(),
        skipped_exhausted: analysis
            .skipped
            .iter()
            .filter(|s| s.reason == SkipReason::AllAttemptsExhausted)
            .count(),
    };

    Report {
        meta: ReportMeta {
            schema_version: SCHEMA_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            config: config.into(),
        },
        outcomes: analysis.outcomes.clone(),
        skipped: analysis.skipped.clone(),
        summary,
    }
}
