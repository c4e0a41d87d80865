//! Domain services

pub mod aggregation;
pub mod insights;
pub mod metrics_engine;
pub mod report;

pub use insights::{fleet_insights, FleetInsight};
pub use metrics_engine::{
    compute_driver_metrics, compute_fleet_snapshot_financials, compute_summary_metrics,
    estimate_fleet_financials, ASSUMED_REVENUE_PER_LOAD, DEFAULT_FACTORING_RATE_PERCENT,
};
pub use report::{
    format_currency, generate_dashboard_report, generate_driver_report, generate_fleet_report,
};
