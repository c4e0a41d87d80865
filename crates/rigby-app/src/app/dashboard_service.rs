//! Dashboard Service - per-driver and fleet-wide financials for a period
//!
//! Reads loads, expenses and the driver roster, groups them per canonical
//! driver for the selected period and runs every driver through the metrics
//! engine. The summary is computed from the per-driver results.

use chrono::NaiveDate;
use rigby_domain::model::{DriverMetrics, DriverRoster, MetricsInput, SummaryMetrics};
use rigby_domain::repository::{DriverRepository, ExpenseRepository, LoadRepository};
use rigby_domain::service::aggregation::{
    drivers_with_expenses_only, expenses_for_driver, group_loads_by_driver,
};
use rigby_domain::service::{compute_driver_metrics, compute_summary_metrics};
use rigby_types::{Error, Period, Result, ValidationError};
use serde::Serialize;

use crate::config::Config;

/// Options for building the dashboard
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub period: Period,
    /// Reference date for period ranges
    pub as_of: NaiveDate,
    pub factoring_rate_percent: f64,
    /// Restrict to one driver (name or alias)
    pub driver: Option<String>,
}

impl DashboardOptions {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            period: Period::default(),
            as_of,
            factoring_rate_percent: rigby_domain::service::DEFAULT_FACTORING_RATE_PERCENT,
            driver: None,
        }
    }

    /// Options seeded from the configured defaults
    pub fn from_config(config: &Config, as_of: NaiveDate) -> Self {
        Self::new(as_of)
            .with_period(config.default_period)
            .with_factoring_rate(config.factoring_rate_percent)
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    pub fn with_factoring_rate(mut self, rate_percent: f64) -> Self {
        self.factoring_rate_percent = rate_percent;
        self
    }

    pub fn with_driver(mut self, driver: String) -> Self {
        self.driver = Some(driver);
        self
    }
}

/// Dashboard content: the summary plus one row per driver
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub period: Period,
    pub as_of: NaiveDate,
    pub factoring_rate_percent: f64,
    pub summary: SummaryMetrics,
    pub drivers: Vec<DriverMetrics>,
}

/// Build the dashboard for the selected period
pub fn build_dashboard(
    loads: &impl LoadRepository,
    expenses: &impl ExpenseRepository,
    drivers: &impl DriverRepository,
    options: &DashboardOptions,
) -> Result<Dashboard> {
    ValidationError::check_amount("factoring_rate_percent", options.factoring_rate_percent)?;

    let roster = DriverRoster::new(drivers.find_all()?);
    let all_loads = loads.find_all()?;
    let all_expenses = expenses.find_all()?;

    let mut grouped = group_loads_by_driver(&all_loads, &roster, options.period, options.as_of);
    for name in drivers_with_expenses_only(
        &all_expenses,
        &grouped,
        &roster,
        options.period,
        options.as_of,
    ) {
        grouped.insert(name, Vec::new());
    }

    if let Some(ref raw) = options.driver {
        let name = roster.resolve(raw);
        let driver_loads = grouped.remove(&name);
        if driver_loads.is_none() && roster.find(raw).is_none() {
            return Err(Error::NotFound(format!("driver {}", raw.trim())));
        }
        grouped.clear();
        grouped.insert(name, driver_loads.unwrap_or_default());
    }

    let driver_metrics: Vec<DriverMetrics> = grouped
        .into_iter()
        .map(|(name, driver_loads)| {
            let breakdown = expenses_for_driver(
                &all_expenses,
                &name,
                &roster,
                options.period,
                options.as_of,
            );
            let pay_rate = roster.pay_rate(&name);
            let input = MetricsInput::from_loads(
                name,
                driver_loads,
                breakdown,
                options.factoring_rate_percent,
                pay_rate,
            );
            compute_driver_metrics(&input)
        })
        .collect();

    let summary = compute_summary_metrics(&driver_metrics);
    tracing::debug!(
        period = %options.period,
        drivers = summary.driver_count,
        loads = summary.load_count,
        "dashboard computed"
    );

    Ok(Dashboard {
        period: options.period,
        as_of: options.as_of,
        factoring_rate_percent: options.factoring_rate_percent,
        summary,
        drivers: driver_metrics,
    })
}
