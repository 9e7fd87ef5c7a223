#![warn(missing_docs)]
//! Enermut Report - Reporting and Rendering Instructions
//!
//! Consumes the pipeline's outcomes and produces:
//! - JSON (machine-readable)
//! - Human-readable console summaries
//! - Rendering-instruction value objects (series + labels) for plotting
//!   front ends; the core pipeline carries no presentation-library
//!   dependency and no ambient figure state

mod human;
mod json;
mod render;
mod report;

pub use human::{format_drift_output, format_human_output};
pub use json::generate_json_report;
pub use render::{
    drift_panels, overview_chart, significant_panels, ErrorBarChart, ErrorBarSeries, Panel,
    PanelGrid, MAX_PANELS,
};
pub use report::{build_report, Report, ReportConfig, ReportMeta, ReportSummary};
