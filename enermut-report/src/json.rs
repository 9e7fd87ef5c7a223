//! JSON Output

use crate::report::Report;

/// Generate a prettified JSON report.
pub fn generate_json_report(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::build_report;
    use enermut_core::{AnalysisConfig, AnalysisReport};

    #[test]
    fn test_json_round_trips() {
        let report = build_report(&AnalysisReport::default(), &AnalysisConfig::default());
        let json = generate_json_report(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary.total_parameters, 0);
        assert_eq!(parsed.meta.schema_version, report.meta.schema_version);
    }
}
