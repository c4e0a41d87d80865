//! Fleet snapshot used by the "what-if" overview

use rigby_types::ValidationError;
use serde::{Deserialize, Serialize};

/// Monthly fleet snapshot edited by the user or by assistant suggestions.
///
/// There is exactly one snapshot per data directory. It starts at zero and is
/// only ever overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetMetrics {
    #[serde(default)]
    pub trucks: u32,
    #[serde(default)]
    pub drivers: u32,
    #[serde(default)]
    pub loads_per_month: u32,
    #[serde(default)]
    pub miles_per_month: u32,
    #[serde(default)]
    pub fuel_cost: f64,
    #[serde(default)]
    pub insurance: f64,
    #[serde(default)]
    pub maintenance: f64,
    #[serde(default)]
    pub other_expenses: f64,
}

impl FleetMetrics {
    /// Sum of the four monthly expense fields
    pub fn total_expenses(&self) -> f64 {
        self.fuel_cost + self.insurance + self.maintenance + self.other_expenses
    }

    /// Reject negative or non-finite monetary fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        ValidationError::check_amount("fuel_cost", self.fuel_cost)?;
        ValidationError::check_amount("insurance", self.insurance)?;
        ValidationError::check_amount("maintenance", self.maintenance)?;
        ValidationError::check_amount("other_expenses", self.other_expenses)?;
        Ok(())
    }

    /// Merge a partial update over this snapshot
    pub fn apply(&self, update: &FleetMetricsUpdate) -> FleetMetrics {
        FleetMetrics {
            trucks: update.trucks.unwrap_or(self.trucks),
            drivers: update.drivers.unwrap_or(self.drivers),
            loads_per_month: update.loads_per_month.unwrap_or(self.loads_per_month),
            miles_per_month: update.miles_per_month.unwrap_or(self.miles_per_month),
            fuel_cost: update.fuel_cost.unwrap_or(self.fuel_cost),
            insurance: update.insurance.unwrap_or(self.insurance),
            maintenance: update.maintenance.unwrap_or(self.maintenance),
            other_expenses: update.other_expenses.unwrap_or(self.other_expenses),
        }
    }
}

/// Partial snapshot edit; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetMetricsUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trucks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drivers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loads_per_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miles_per_month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_expenses: Option<f64>,
}

impl FleetMetricsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == FleetMetricsUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let metrics = FleetMetrics::default();
        assert_eq!(metrics.trucks, 0);
        assert_eq!(metrics.total_expenses(), 0.0);
        assert!(metrics.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_expense() {
        let metrics = FleetMetrics {
            maintenance: -10.0,
            ..Default::default()
        };
        let err = metrics.validate().unwrap_err();
        assert!(matches!(err, ValidationError::Negative { ref field, .. } if field == "maintenance"));
    }

    #[test]
    fn test_apply_merges_only_given_fields() {
        let base = FleetMetrics {
            trucks: 3,
            miles_per_month: 30_000,
            fuel_cost: 18_000.0,
            ..Default::default()
        };
        let update = FleetMetricsUpdate {
            trucks: Some(4),
            insurance: Some(2_400.0),
            ..Default::default()
        };
        let merged = base.apply(&update);
        assert_eq!(merged.trucks, 4);
        assert_eq!(merged.miles_per_month, 30_000);
        assert_eq!(merged.fuel_cost, 18_000.0);
        assert_eq!(merged.insurance, 2_400.0);
    }

    #[test]
    fn test_deserialize_partial_record() {
        let metrics: FleetMetrics = serde_json::from_str(r#"{"trucks": 2}"#).unwrap();
        assert_eq!(metrics.trucks, 2);
        assert_eq!(metrics.fuel_cost, 0.0);
    }
}
