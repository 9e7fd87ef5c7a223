//! Human-Readable Console Output

use crate::report::Report;
use enermut_core::{DriftReport, SkipReason};

/// Format an analysis report for terminal display.
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Enermut Mutation Analysis\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for skip in &report.skipped {
        let reason = match skip.reason {
            SkipReason::UnstableReference => "unstable reference",
            SkipReason::AllAttemptsExhausted => "all mutations crashed/unstable",
        };
        output.push_str(&format!(
            "  skipped [{}] {} ({})\n",
            skip.parameter_index, skip.parameter_path, reason
        ));
    }
    if !report.skipped.is_empty() {
        output.push('\n');
    }

    for outcome in &report.outcomes {
        let marker = if outcome.is_significant { "*" } else { " " };
        output.push_str(&format!(
            "{} [{}] {} = {}  ref {:.2} -> mut {:.2}  ({:+.1}%)\n",
            marker,
            outcome.parameter_index,
            outcome.parameter_path,
            outcome.chosen_mutation_value,
            outcome.reference_group.mean(),
            outcome.mutation_group.mean(),
            -outcome.relative_energy_delta * 100.0,
        ));
    }

    output.push('\n');
    output.push_str("Summary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Parameters: {}  Analyzed: {}  Significant: {}  Skipped: {}\n",
        report.summary.total_parameters,
        report.summary.analyzed,
        report.summary.significant,
        report.summary.skipped_unstable_reference + report.summary.skipped_exhausted,
    ));

    output
}

/// Format a reference drift survey for terminal display.
pub fn format_drift_output(drift: &DriftReport) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Enermut Reference Drift Survey\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    output.push_str(&format!(
        "  Group means: min {:.2}, max {:.2}\n",
        drift.min_mean, drift.max_mean
    ));
    output.push_str(&format!(
        "  Normalized stdev: mean {:.4}, spread {:.4}\n\n",
        drift.cv_mean, drift.cv_spread
    ));

    if drift.drifts.is_empty() {
        output.push_str("  No significant drift between adjacent groups.\n");
    } else {
        for point in &drift.drifts {
            output.push_str(&format!(
                "  drift at group {} (vs {}): {:+.1}% shift\n",
                point.index,
                point.index - 1,
                point.relative_shift * 100.0
            ));
        }
    }

    output
}
