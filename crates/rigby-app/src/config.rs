//! Configuration management for rigby
//!
//! Config stored at: ~/.config/rigby/config.json

use std::path::PathBuf;

use rigby_domain::service::{ASSUMED_REVENUE_PER_LOAD, DEFAULT_FACTORING_RATE_PERCENT};
use rigby_types::{ConfigError, OutputFormat, Period, Result};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory override (loads, expenses, fleet snapshot, roster)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Percent of gross revenue paid to the factoring service
    #[serde(default = "default_factoring_rate")]
    pub factoring_rate_percent: f64,

    /// Period the dashboard shows when none is given
    #[serde(default)]
    pub default_period: Period,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Revenue assumed per load in the fleet snapshot estimate
    #[serde(default = "default_revenue_per_load")]
    pub revenue_per_load_estimate: f64,
}

fn default_factoring_rate() -> f64 {
    DEFAULT_FACTORING_RATE_PERCENT
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_revenue_per_load() -> f64 {
    ASSUMED_REVENUE_PER_LOAD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            factoring_rate_percent: default_factoring_rate(),
            default_period: Period::default(),
            output_format: default_output_format(),
            revenue_per_load_estimate: default_revenue_per_load(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("rigby");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join("rigby");
        Ok(data_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        check_rate("factoring_rate_percent", self.factoring_rate_percent)?;
        check_rate("revenue_per_load_estimate", self.revenue_per_load_estimate)?;
        Ok(())
    }
}

fn check_rate(key: &str, value: f64) -> std::result::Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("must be a non-negative number, got {}", value),
        });
    }
    Ok(())
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Rigby Configuration")?;
        writeln!(f, "===================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Data dir:         {}",
            self.data_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Factoring rate:   {:.2}%", self.factoring_rate_percent)?;
        writeln!(f, "Default period:   {}", self.default_period)?;
        writeln!(f, "Output format:    {}", self.output_format)?;
        writeln!(f, "Revenue per load: ${:.2}", self.revenue_per_load_estimate)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:      {}", path.display())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigby_types::Error;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.factoring_rate_percent, 2.2);
        assert_eq!(config.default_period, Period::Ytd);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert_eq!(config.revenue_per_load_estimate, 2500.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"default_period":"q2"}"#).unwrap();
        assert_eq!(config.default_period, Period::Q2);
        assert_eq!(config.factoring_rate_percent, 2.2);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let config = Config {
            factoring_rate_percent: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_data_dir_override() {
        let config = Config {
            data_dir: Some(PathBuf::from("/tmp/rigby-data")),
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/rigby-data"));
    }
}
