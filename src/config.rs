// ⚙️ Configuration - Economic parameters and analysis options
//
// Resolution order: built-in defaults → TOML file → command-line overrides.

use crate::entry::HoursPolicy;
use crate::error::{AnalysisError, Result};
use crate::projection::{ProjectionEngine, ProjectionParams, Scenario};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Blended billing rate used to value saved hours
    pub hourly_rate: f64,

    /// Fraction of automatable time actually saved (0-1)
    pub efficiency_gain: f64,

    pub ai_cost_per_hour: f64,

    /// Rate-type tag that marks fixed-fee entries
    pub flat_fee_tag: String,

    /// Nominal hours counted for each flat-fee entry
    pub flat_fee_hours: f64,

    /// Year to project; latest year in the data when unset
    pub analysis_year: Option<i32>,

    pub scenarios: Vec<Scenario>,

    /// Row limit for ranked report tables
    pub top_n: usize,

    /// Minimum task potential listed as high-automation
    pub high_automation_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            hourly_rate: 500.0,
            efficiency_gain: 0.60,
            ai_cost_per_hour: 10.0,
            flat_fee_tag: "Flat Fee".to_string(),
            flat_fee_hours: 1.0,
            analysis_year: None,
            scenarios: Scenario::defaults(),
            top_n: 15,
            high_automation_threshold: 0.85,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = toml::from_str(&text)?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Defaults when no path is given or the file does not exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::from_file(path),
            Some(path) => {
                info!("No configuration at {:?}, using defaults", path);
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_non_negative("hourly_rate", self.hourly_rate)?;
        check_non_negative("ai_cost_per_hour", self.ai_cost_per_hour)?;
        check_non_negative("flat_fee_hours", self.flat_fee_hours)?;
        check_fraction("efficiency_gain", self.efficiency_gain)?;
        check_fraction("high_automation_threshold", self.high_automation_threshold)?;

        for scenario in &self.scenarios {
            check_fraction(&format!("scenario '{}'", scenario.name), scenario.efficiency_gain)?;
        }
        if self.flat_fee_tag.trim().is_empty() {
            return Err(AnalysisError::InvalidConfig(
                "flat_fee_tag must not be empty".to_string(),
            ));
        }
        if self.top_n == 0 {
            return Err(AnalysisError::InvalidConfig("top_n must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Apply command-line values on top of the file/defaults and re-validate
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self> {
        if let Some(rate) = overrides.hourly_rate {
            self.hourly_rate = rate;
        }
        if let Some(gain) = overrides.efficiency_gain {
            self.efficiency_gain = gain;
        }
        if let Some(cost) = overrides.ai_cost_per_hour {
            self.ai_cost_per_hour = cost;
        }
        if let Some(hours) = overrides.flat_fee_hours {
            self.flat_fee_hours = hours;
        }
        if overrides.analysis_year.is_some() {
            self.analysis_year = overrides.analysis_year;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn hours_policy(&self) -> HoursPolicy {
        HoursPolicy {
            flat_fee_hours: self.flat_fee_hours,
        }
    }

    pub fn projection_params(&self) -> ProjectionParams {
        ProjectionParams {
            efficiency_gain: self.efficiency_gain,
            hourly_rate: self.hourly_rate,
            ai_cost_per_hour: self.ai_cost_per_hour,
        }
    }

    pub fn projection_engine(&self) -> ProjectionEngine {
        ProjectionEngine::with_params(self.projection_params(), self.scenarios.clone())
    }
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub hourly_rate: Option<f64>,
    pub efficiency_gain: Option<f64>,
    pub ai_cost_per_hour: Option<f64>,
    pub flat_fee_hours: Option<f64>,
    pub analysis_year: Option<i32>,
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidConfig(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )))
    }
}

fn check_fraction(field: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(AnalysisError::InvalidConfig(format!(
            "{} must be between 0 and 1, got {}",
            field, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hourly_rate, 500.0);
        assert_eq!(config.scenarios.len(), 3);
        assert_eq!(config.hours_policy().flat_fee_hours, 1.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("hourly_rate = 350.0\nanalysis_year = 2024\n");
        let config = AnalysisConfig::from_file(file.path()).unwrap();

        assert_eq!(config.hourly_rate, 350.0);
        assert_eq!(config.analysis_year, Some(2024));
        assert_eq!(config.efficiency_gain, 0.60);
        assert_eq!(config.flat_fee_tag, "Flat Fee");
    }

    #[test]
    fn test_custom_scenarios() {
        let file = write_config(
            r#"
[[scenarios]]
name = "Pilot"
efficiency_gain = 0.25
"#,
        );
        let config = AnalysisConfig::from_file(file.path()).unwrap();
        assert_eq!(config.scenarios, vec![Scenario::new("Pilot", 0.25)]);
        assert_eq!(config.projection_engine().scenarios.len(), 1);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let file = write_config("efficiency_gain = 1.5\n");
        assert!(matches!(
            AnalysisConfig::from_file(file.path()),
            Err(AnalysisError::InvalidConfig(_))
        ));

        let negative = AnalysisConfig {
            hourly_rate: -1.0,
            ..AnalysisConfig::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("hourly_rate = \"lots\"\n");
        assert!(matches!(
            AnalysisConfig::from_file(file.path()),
            Err(AnalysisError::Toml(_))
        ));
    }

    #[test]
    fn test_overrides_win_and_are_validated() {
        let overrides = ConfigOverrides {
            hourly_rate: Some(650.0),
            analysis_year: Some(2025),
            ..ConfigOverrides::default()
        };
        let config = AnalysisConfig::default().with_overrides(&overrides).unwrap();
        assert_eq!(config.hourly_rate, 650.0);
        assert_eq!(config.analysis_year, Some(2025));
        assert_eq!(config.ai_cost_per_hour, 10.0);

        let bad = ConfigOverrides {
            efficiency_gain: Some(-0.1),
            ..ConfigOverrides::default()
        };
        assert!(AnalysisConfig::default().with_overrides(&bad).is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalysisConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(AnalysisConfig::load(None).unwrap(), AnalysisConfig::default());
    }
}
