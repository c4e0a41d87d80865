//! Driver roster with per-mile pay rates and name aliases

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A driver on the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverProfile {
    pub name: String,
    /// Pay per mile driven
    #[serde(default)]
    pub pay_rate: f64,
    /// Alternate spellings seen on rate confirmations
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl DriverProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pay_rate: 0.0,
            aliases: Vec::new(),
            active: true,
        }
    }

    /// Whether `raw` names this driver, by name or alias, ignoring case and spacing
    pub fn answers_to(&self, raw: &str) -> bool {
        let needle = normalize_name(raw);
        normalize_name(&self.name) == needle
            || self.aliases.iter().any(|a| normalize_name(a) == needle)
    }
}

/// Read-only view over the roster used to canonicalize driver names
#[derive(Debug, Clone, Default)]
pub struct DriverRoster {
    drivers: Vec<DriverProfile>,
}

impl DriverRoster {
    pub fn new(drivers: Vec<DriverProfile>) -> Self {
        Self { drivers }
    }

    /// Canonical driver name for `raw`; unknown names pass through trimmed
    pub fn resolve(&self, raw: &str) -> String {
        self.find(raw)
            .map(|d| d.name.clone())
            .unwrap_or_else(|| raw.trim().to_string())
    }

    pub fn find(&self, raw: &str) -> Option<&DriverProfile> {
        self.drivers.iter().find(|d| d.answers_to(raw))
    }

    /// Pay rate for a driver, 0 when unset or unknown
    pub fn pay_rate(&self, name: &str) -> f64 {
        self.find(name).map(|d| d.pay_rate).unwrap_or(0.0)
    }

    pub fn drivers(&self) -> &[DriverProfile] {
        &self.drivers
    }
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
