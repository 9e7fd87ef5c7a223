//! Rendering Instructions
//!
//! Pure functions from analysis output to value objects a plotting front
//! end can draw: an overall reference-vs-mutation error-bar chart and
//! small-multiple panel grids. No figure state lives here; callers decide
//! how (and whether) to draw.

use enermut_core::{AnalysisOutcome, DriftReport, ReferenceRecord, ResultGroup};
use enermut_stats::std_dev;

/// Maximum number of small-multiple panels in a grid
pub const MAX_PANELS: usize = 4;

const ENERGY_LABEL: &str = "Energy (µAh)";

/// One error-bar series: mean ± spread per x position.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBarSeries {
    /// Legend label
    pub label: String,
    /// Series means, one per parameter
    pub means: Vec<f64>,
    /// Series spreads (sample stdev), one per parameter
    pub spreads: Vec<f64>,
}

/// Scatter chart of all analyzed parameters with error bars.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBarChart {
    /// X-axis label
    pub x_label: String,
    /// Y-axis label
    pub y_label: String,
    /// Reference and mutation series, same length
    pub series: Vec<ErrorBarSeries>,
}

/// One small-multiple panel: two point sequences on a shared index axis,
/// the second starting where the first ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Panel title
    pub title: String,
    /// Points of the first (earlier / unmodified) group
    pub first: Vec<f64>,
    /// Points of the second (later / modified) group
    pub second: Vec<f64>,
}

/// Row of small-multiple panels sharing a y-axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelGrid {
    /// Shared y-axis label
    pub y_label: String,
    /// Panels, at most [`MAX_PANELS`]
    pub panels: Vec<Panel>,
}

fn spread_of(group: &ResultGroup) -> f64 {
    std_dev(group.values()).unwrap_or(0.0)
}

/// Build the overall reference-vs-mutation error-bar chart.
///
/// Both series carry one point per analyzed parameter, in outcome order.
pub fn overview_chart(outcomes: &[AnalysisOutcome]) -> ErrorBarChart {
    let mut reference = ErrorBarSeries {
        label: "Unmodified".to_string(),
        means: Vec::with_capacity(outcomes.len()),
        spreads: Vec::with_capacity(outcomes.len()),
    };
    let mut mutation = ErrorBarSeries {
        label: "Modified".to_string(),
        means: Vec::with_capacity(outcomes.len()),
        spreads: Vec::with_capacity(outcomes.len()),
    };

    for outcome in outcomes {
        reference.means.push(outcome.reference_group.mean());
        reference.spreads.push(spread_of(&outcome.reference_group));
        mutation.means.push(outcome.mutation_group.mean());
        mutation.spreads.push(spread_of(&outcome.mutation_group));
    }

    ErrorBarChart {
        x_label: "Parameters".to_string(),
        y_label: ENERGY_LABEL.to_string(),
        series: vec![reference, mutation],
    }
}

/// Build per-parameter panels for the significant outcomes, capped at
/// [`MAX_PANELS`].
pub fn significant_panels(outcomes: &[AnalysisOutcome]) -> PanelGrid {
    let panels = outcomes
        .iter()
        .filter(|o| o.is_significant)
        .take(MAX_PANELS)
        .map(|o| Panel {
            title: format!("Parameter {}", o.parameter_index),
            first: o.reference_group.values().to_vec(),
            second: o.mutation_group.values().to_vec(),
        })
        .collect();

    PanelGrid {
        y_label: ENERGY_LABEL.to_string(),
        panels,
    }
}

/// Build panels for drift-adjacent reference group pairs, capped at
/// [`MAX_PANELS`].
pub fn drift_panels(references: &[ReferenceRecord], drift: &DriftReport) -> PanelGrid {
    let panels = drift
        .drifts
        .iter()
        .take(MAX_PANELS)
        .map(|point| Panel {
            title: format!("Groups {} and {}", point.index - 1, point.index),
            first: ResultGroup::from_samples(&references[point.index - 1].results)
                .values()
                .to_vec(),
            second: ResultGroup::from_samples(&references[point.index].results)
                .values()
                .to_vec(),
        })
        .collect();

    PanelGrid {
        y_label: ENERGY_LABEL.to_string(),
        panels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outcome(index: usize, significant: bool) -> AnalysisOutcome {
        AnalysisOutcome {
            parameter_index: index,
            parameter_path: format!("p/{index}"),
            chosen_mutation_value: json!(index),
            reference_group: ResultGroup(vec![10.0, 11.0, 9.0]),
            mutation_group: ResultGroup(vec![5.0, 5.5, 4.5]),
            is_significant: significant,
            relative_energy_delta: 0.5,
        }
    }

    #[test]
    fn test_overview_series_lengths_match_outcomes() {
        let outcomes: Vec<_> = (0..5).map(|i| outcome(i, i % 2 == 0)).collect();
        let chart = overview_chart(&outcomes);
        assert_eq!(chart.series.len(), 2);
        for series in &chart.series {
            assert_eq!(series.means.len(), 5);
            assert_eq!(series.spreads.len(), 5);
        }
        assert_eq!(chart.series[0].label, "Unmodified");
        assert_eq!(chart.series[1].label, "Modified");
    }

    #[test]
    fn test_panel_cap() {
        let outcomes: Vec<_> = (0..10).map(|i| outcome(i, true)).collect();
        let grid = significant_panels(&outcomes);
        assert_eq!(grid.panels.len(), MAX_PANELS);
        assert_eq!(grid.panels[0].title, "Parameter 0");
    }

    #[test]
    fn test_only_significant_get_panels() {
        let outcomes = vec![outcome(0, false), outcome(1, true), outcome(2, false)];
        let grid = significant_panels(&outcomes);
        assert_eq!(grid.panels.len(), 1);
        assert_eq!(grid.panels[0].title, "Parameter 1");
    }

    #[test]
    fn test_empty_outcomes() {
        let chart = overview_chart(&[]);
        assert_eq!(chart.series[0].means.len(), 0);
        assert!(significant_panels(&[]).panels.is_empty());
    }
}
