//! Driver roster loader from TOML
//!
//! The roster file lists drivers with their per-mile pay rate and the alternate
//! spellings that appear on imported rate confirmations.

use std::fs;
use std::path::Path;

use rigby_domain::model::{DriverProfile, DriverRoster};
use rigby_types::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};

/// Container for parsing drivers.toml
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct RosterFile {
    #[serde(default)]
    pub(crate) drivers: Vec<DriverProfile>,
}

/// Load a roster from a TOML file; a missing file is an empty roster
pub fn load_from_file(path: &Path) -> Result<DriverRoster> {
    Ok(DriverRoster::new(read_profiles(path)?))
}

/// Load a roster from a TOML string
pub fn load_from_str(toml_content: &str) -> Result<DriverRoster> {
    Ok(DriverRoster::new(parse_profiles(toml_content)?))
}

pub(crate) fn read_profiles(path: &Path) -> Result<Vec<DriverProfile>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!(
            "Failed to read driver roster {}: {}",
            path.display(),
            e
        )))
    })?;
    parse_profiles(&content)
}

pub(crate) fn parse_profiles(toml_content: &str) -> Result<Vec<DriverProfile>> {
    let file: RosterFile = toml::from_str(toml_content).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!(
            "Failed to parse driver roster TOML: {}",
            e
        )))
    })?;

    for driver in &file.drivers {
        if driver.name.trim().is_empty() {
            return Err(Error::Config(ConfigError::InvalidValue {
                key: "drivers.name".to_string(),
                reason: "driver name must not be empty".to_string(),
            }));
        }
        if !driver.pay_rate.is_finite() || driver.pay_rate < 0.0 {
            return Err(Error::Config(ConfigError::InvalidValue {
                key: format!("drivers.{}.pay_rate", driver.name),
                reason: format!("must be a non-negative number, got {}", driver.pay_rate),
            }));
        }
    }

    Ok(file.drivers)
}

pub(crate) fn write_profiles(path: &Path, drivers: &[DriverProfile]) -> Result<()> {
    let file = RosterFile {
        drivers: drivers.to_vec(),
    };
    let content = toml::to_string_pretty(&file).map_err(|e| {
        Error::Config(ConfigError::ParseError(format!(
            "Failed to serialize driver roster: {}",
            e
        )))
    })?;
    fs::write(path, content)?;
    Ok(())
}
