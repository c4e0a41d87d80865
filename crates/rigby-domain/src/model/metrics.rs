//! Input and output shapes of the metrics engine

use serde::{Deserialize, Serialize};

use super::expense::ExpenseBreakdown;
use super::load::Load;

/// Aggregates for one driver over the selected period
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsInput {
    pub driver_name: String,
    /// Sum of gross amounts of the driver's loads, >= 0
    pub gross_revenue: f64,
    /// Sum of miles of the same loads
    pub total_miles: u64,
    pub expenses: ExpenseBreakdown,
    pub factoring_rate_percent: f64,
    /// Pay per mile, 0 when unset
    pub driver_pay_rate: f64,
    pub loads: Vec<Load>,
}

impl MetricsInput {
    pub fn new(
        gross_revenue: f64,
        total_miles: u64,
        expenses: ExpenseBreakdown,
        factoring_rate_percent: f64,
        driver_pay_rate: f64,
    ) -> Self {
        Self {
            driver_name: String::new(),
            gross_revenue,
            total_miles,
            expenses,
            factoring_rate_percent,
            driver_pay_rate,
            loads: Vec::new(),
        }
    }

    /// Build the input from the driver's loads, summing gross and miles
    pub fn from_loads(
        driver_name: impl Into<String>,
        loads: Vec<Load>,
        expenses: ExpenseBreakdown,
        factoring_rate_percent: f64,
        driver_pay_rate: f64,
    ) -> Self {
        let gross_revenue = loads.iter().map(|l| l.gross_amount).sum();
        let total_miles = loads.iter().map(|l| u64::from(l.miles)).sum();
        Self {
            driver_name: driver_name.into(),
            gross_revenue,
            total_miles,
            expenses,
            factoring_rate_percent,
            driver_pay_rate,
            loads,
        }
    }

    pub fn with_driver_name(mut self, name: impl Into<String>) -> Self {
        self.driver_name = name.into();
        self
    }
}

/// Derived financials for one driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverMetrics {
    pub driver_name: String,
    pub gross_revenue: f64,
    pub factoring_fee: f64,
    pub net_revenue: f64,
    pub fixed_expenses: f64,
    /// Includes factoring fee and driver pay
    pub variable_expenses: f64,
    pub driver_pay: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub total_miles: u64,
    pub fixed_cpm: f64,
    pub variable_cpm: f64,
    pub total_cpm: f64,
    pub rpm: f64,
    pub profit_per_mile: f64,
    pub expenses: ExpenseBreakdown,
    pub loads: Vec<Load>,
}

impl DriverMetrics {
    /// Net profit as a percentage of gross revenue, 0 without revenue
    pub fn profit_margin(&self) -> f64 {
        if self.gross_revenue == 0.0 {
            0.0
        } else {
            self.net_profit / self.gross_revenue * 100.0
        }
    }
}

/// Fleet-wide totals over a set of drivers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub driver_count: usize,
    pub load_count: usize,
    pub total_revenue: f64,
    pub factoring_fee: f64,
    pub net_revenue: f64,
    pub fixed_expenses: f64,
    pub variable_expenses: f64,
    pub driver_pay: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub total_miles: u64,
    pub avg_rpm: f64,
    pub avg_cpm: f64,
    pub fixed_cpm: f64,
    pub variable_cpm: f64,
    pub profit_per_mile: f64,
    pub profit_margin: f64,
}

/// Rough monthly planning figures from the fleet snapshot.
///
/// Revenue here is `loads_per_month` times an assumed rate per load, not the
/// sum of real loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialsEstimate {
    pub total_expenses: f64,
    pub estimated_revenue: f64,
    pub cpm: f64,
    pub rpm: f64,
    pub profit_per_mile: f64,
    pub monthly_profit: f64,
}
