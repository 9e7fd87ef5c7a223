//! Configuration loading from enermut.toml
//!
//! Analysis settings can be specified in an `enermut.toml` file, which is
//! discovered by walking up from the current directory. CLI flags override
//! file values.

use enermut_core::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Enermut configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EnermutConfig {
    /// Analysis pipeline settings
    #[serde(default)]
    pub analysis: AnalysisSection,
    /// Output settings
    #[serde(default)]
    pub output: OutputSection,
}

/// Analysis pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Maximum tolerated coefficient of variation for a group
    #[serde(default = "default_stability_threshold")]
    pub stability_threshold: f64,
    /// Fractional margin the mutation must beat the reference by
    #[serde(default)]
    pub tolerance: f64,
    /// Significance level for the one-sided test
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Compatibility policy: discard the accumulated best candidate when
    /// an unstable attempt is encountered
    #[serde(default = "default_reset_on_unstable")]
    pub reset_on_unstable: bool,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            stability_threshold: default_stability_threshold(),
            tolerance: 0.0,
            alpha: default_alpha(),
            reset_on_unstable: default_reset_on_unstable(),
        }
    }
}

fn default_stability_threshold() -> f64 {
    1.0
}
fn default_alpha() -> f64 {
    0.05
}
fn default_reset_on_unstable() -> bool {
    true
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Default output format: "human" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl EnermutConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Discover and load configuration by walking up from the current
    /// directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("enermut.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Build the pipeline configuration from this file-level config.
    pub fn to_analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            stability_threshold: self.analysis.stability_threshold,
            tolerance: self.analysis.tolerance,
            alpha: self.analysis.alpha,
            reset_on_unstable: self.analysis.reset_on_unstable,
        }
    }

    /// Default configuration as a TOML string.
    pub fn default_toml() -> String {
        r#"# Enermut Configuration

[analysis]
# Maximum tolerated coefficient of variation (stdev / mean) per group.
# 1.0 is permissive and effectively disables the filter.
stability_threshold = 1.0
# Fractional margin the mutation must beat the reference by
tolerance = 0.0
# Significance level for the one-sided Welch test
alpha = 0.05
# Compatibility: discard the best candidate so far when an unstable
# mutation attempt is encountered. Set false for the corrected selector.
reset_on_unstable = true

[output]
# Default output format: human or json
format = "human"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EnermutConfig::default();
        assert!((config.analysis.stability_threshold - 1.0).abs() < f64::EPSILON);
        assert!((config.analysis.alpha - 0.05).abs() < f64::EPSILON);
        assert!(config.analysis.reset_on_unstable);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [analysis]
            stability_threshold = 0.2
            tolerance = 0.1
        "#;
        let config: EnermutConfig = toml::from_str(toml_str).unwrap();
        assert!((config.analysis.stability_threshold - 0.2).abs() < f64::EPSILON);
        assert!((config.analysis.tolerance - 0.1).abs() < f64::EPSILON);
        // Defaults still apply
        assert!((config.analysis.alpha - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_default_toml_parses() {
        let config: EnermutConfig = toml::from_str(&EnermutConfig::default_toml()).unwrap();
        assert!(config.analysis.reset_on_unstable);
    }

    #[test]
    fn test_to_analysis_config() {
        let config: EnermutConfig = toml::from_str(
            r#"
            [analysis]
            tolerance = 0.05
            reset_on_unstable = false
        "#,
        )
        .unwrap();
        let analysis = config.to_analysis_config();
        assert!((analysis.tolerance - 0.05).abs() < f64::EPSILON);
        assert!(!analysis.reset_on_unstable);
    }
}
