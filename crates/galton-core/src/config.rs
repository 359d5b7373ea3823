use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GaltonError;

/// Top-level configuration loaded from `.galton.toml`.
///
/// Supports layered resolution: CLI flags > local config > defaults.
///
/// # Examples
///
/// ```
/// use galton_core::GaltonConfig;
///
/// let config = GaltonConfig::default();
/// assert_eq!(config.generate.rows, 500);
/// assert_eq!(config.analysis.alpha, 0.05);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GaltonConfig {
    /// Dataset generation settings.
    #[serde(default)]
    pub generate: GenerateConfig,
    /// Statistical analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Dashboard rendering settings.
    #[serde(default)]
    pub report: ReportConfig,
}

impl GaltonConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GaltonError::Io`] if the file cannot be read, or
    /// [`GaltonError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use galton_core::GaltonConfig;
    /// use std::path::Path;
    ///
    /// let config = GaltonConfig::from_file(Path::new(".galton.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, GaltonError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`GaltonError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use galton_core::GaltonConfig;
    ///
    /// let toml = r#"
    /// [generate]
    /// rows = 1000
    /// "#;
    /// let config = GaltonConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.generate.rows, 1000);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, GaltonError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Dataset generation configuration.
///
/// # Examples
///
/// ```
/// use galton_core::GenerateConfig;
///
/// let config = GenerateConfig::default();
/// assert_eq!(config.rows, 500);
/// assert_eq!(config.seed, 42);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Number of repository records to synthesize (default: 500).
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// RNG seed; the same seed reproduces the same dataset (default: 42).
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Where the dataset CSV lives (default: `data/repositories.csv`).
    #[serde(default = "default_data_path")]
    pub path: String,
}

fn default_rows() -> usize {
    500
}

fn default_seed() -> u64 {
    42
}

fn default_data_path() -> String {
    "data/repositories.csv".into()
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            seed: default_seed(),
            path: default_data_path(),
        }
    }
}

/// Statistical analysis configuration.
///
/// # Examples
///
/// ```
/// use galton_core::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.alpha, 0.05);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Significance threshold for hypothesis tests (default: 0.05).
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Where the analysis result document lives (default: `results/analysis.json`).
    #[serde(default = "default_results_path")]
    pub path: String,
}

fn default_alpha() -> f64 {
    0.05
}

fn default_results_path() -> String {
    "results/analysis.json".into()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            path: default_results_path(),
        }
    }
}

/// Dashboard rendering configuration.
///
/// # Examples
///
/// ```
/// use galton_core::ReportConfig;
///
/// let config = ReportConfig::default();
/// assert_eq!(config.title, "Synthetic Repository Analytics");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Dashboard page title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Where the dashboard HTML lives (default: `reports/dashboard.html`).
    #[serde(default = "default_report_path")]
    pub path: String,
}

fn default_title() -> String {
    "Synthetic Repository Analytics".into()
}

fn default_report_path() -> String {
    "reports/dashboard.html".into()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            path: default_report_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = GaltonConfig::default();
        assert_eq!(config.generate.rows, 500);
        assert_eq!(config.generate.seed, 42);
        assert_eq!(config.generate.path, "data/repositories.csv");
        assert_eq!(config.analysis.alpha, 0.05);
        assert_eq!(config.analysis.path, "results/analysis.json");
        assert_eq!(config.report.title, "Synthetic Repository Analytics");
        assert_eq!(config.report.path, "reports/dashboard.html");
    }

    #[test]
    fn parse_minimal_toml() {
        let toml = r#"
[generate]
rows = 1000
seed = 7
"#;
        let config = GaltonConfig::from_toml(toml).unwrap();
        assert_eq!(config.generate.rows, 1000);
        assert_eq!(config.generate.seed, 7);
        assert_eq!(config.analysis.alpha, 0.05);
    }

    #[test]
    fn parse_full_toml() {
        let toml = r#"
[generate]
rows = 250
seed = 99
path = "fixtures/small.csv"

[analysis]
alpha = 0.01
path = "out/rqs.json"

[report]
title = "Pilot Study"
path = "out/pilot.html"
"#;
        let config = GaltonConfig::from_toml(toml).unwrap();
        assert_eq!(config.generate.rows, 250);
        assert_eq!(config.generate.seed, 99);
        assert_eq!(config.generate.path, "fixtures/small.csv");
        assert_eq!(config.analysis.alpha, 0.01);
        assert_eq!(config.analysis.path, "out/rqs.json");
        assert_eq!(config.report.title, "Pilot Study");
        assert_eq!(config.report.path, "out/pilot.html");
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = GaltonConfig::from_toml("").unwrap();
        assert_eq!(config.generate.rows, 500);
        assert_eq!(config.analysis.alpha, 0.05);
    }

    #[test]
    fn invalid_toml_returns_error() {
        let result = GaltonConfig::from_toml("{{invalid}}");
        assert!(result.is_err());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let toml = r#"
[analysis]
alpha = 0.10
"#;
        let config = GaltonConfig::from_toml(toml).unwrap();
        assert_eq!(config.analysis.alpha, 0.10);
        assert_eq!(config.analysis.path, "results/analysis.json");
        assert_eq!(config.generate.rows, 500);
    }
}
