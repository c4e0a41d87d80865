use chrono::NaiveDate;
use rigby_types::ValidationError;
use serde::{Deserialize, Serialize};

/// A single freight shipment attributed to a driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub id: u64,
    pub load_number: String,
    pub driver_name: String,
    pub gross_amount: f64,
    pub net_amount: f64,
    pub miles: u32,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub dropoff_location: String,
    #[serde(default)]
    pub pickup_date: Option<NaiveDate>,
    #[serde(default)]
    pub dropoff_date: Option<NaiveDate>,
    /// Import batch this load came from
    #[serde(default)]
    pub batch_id: Option<String>,
}

impl Load {
    /// Gross amount per mile, 0 for zero-mile loads
    pub fn rate_per_mile(&self) -> f64 {
        if self.miles == 0 {
            0.0
        } else {
            self.gross_amount / self.miles as f64
        }
    }

    /// Apply a user edit after validating it
    pub fn apply_edit(&mut self, edit: &LoadEdit) -> Result<(), ValidationError> {
        if let Some(gross) = edit.gross_amount {
            self.gross_amount = ValidationError::check_amount("gross_amount", gross)?;
        }
        if let Some(miles) = edit.miles {
            self.miles = miles;
        }
        if let Some(ref pickup) = edit.pickup_location {
            self.pickup_location = pickup.clone();
        }
        if let Some(ref dropoff) = edit.dropoff_location {
            self.dropoff_location = dropoff.clone();
        }
        Ok(())
    }
}

/// Editable load fields
#[derive(Debug, Clone, Default)]
pub struct LoadEdit {
    pub gross_amount: Option<f64>,
    pub miles: Option<u32>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
}

impl LoadEdit {
    pub fn is_empty(&self) -> bool {
        self.gross_amount.is_none()
            && self.miles.is_none()
            && self.pickup_location.is_none()
            && self.dropoff_location.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_load() -> Load {
        Load {
            id: 1,
            load_number: "RC-1001".to_string(),
            driver_name: "Marcus".to_string(),
            gross_amount: 3000.0,
            net_amount: 2934.0,
            miles: 1200,
            pickup_location: "Dallas, TX".to_string(),
            dropoff_location: "Atlanta, GA".to_string(),
            pickup_date: NaiveDate::from_ymd_opt(2024, 3, 4),
            dropoff_date: None,
            batch_id: None,
        }
    }

    #[test]
    fn test_rate_per_mile() {
        assert!((sample_load().rate_per_mile() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_rate_per_mile_zero_miles() {
        let load = Load {
            miles: 0,
            ..sample_load()
        };
        assert_eq!(load.rate_per_mile(), 0.0);
    }

    #[test]
    fn test_apply_edit_updates_fields() {
        let mut load = sample_load();
        load.apply_edit(&LoadEdit {
            gross_amount: Some(3600.0),
            miles: Some(1000),
            dropoff_location: Some("Macon, GA".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(load.gross_amount, 3600.0);
        assert_eq!(load.miles, 1000);
        assert_eq!(load.pickup_location, "Dallas, TX");
        assert_eq!(load.dropoff_location, "Macon, GA");
    }

    #[test]
    fn test_apply_edit_rejects_negative_gross_without_mutating() {
        let mut load = sample_load();
        let result = load.apply_edit(&LoadEdit {
            gross_amount: Some(-5.0),
            miles: Some(10),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(load, sample_load());
    }
}
