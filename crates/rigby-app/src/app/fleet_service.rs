//! Fleet snapshot use cases: view, partial update, estimate and insights

use rigby_domain::model::{FinancialsEstimate, FleetMetrics, FleetMetricsUpdate};
use rigby_domain::repository::FleetRepository;
use rigby_domain::service::{estimate_fleet_financials, fleet_insights, FleetInsight};
use rigby_types::Result;
use serde::Serialize;

/// Snapshot with its derived estimate and advice
#[derive(Debug, Clone, Serialize)]
pub struct FleetOverview {
    pub metrics: FleetMetrics,
    pub financials: FinancialsEstimate,
    pub insights: Vec<FleetInsight>,
}

/// Load the snapshot and derive the estimate from it
pub fn fleet_overview(repo: &impl FleetRepository, revenue_per_load: f64) -> Result<FleetOverview> {
    let metrics = repo.load()?;
    let financials = estimate_fleet_financials(&metrics, revenue_per_load);
    let insights = fleet_insights(&metrics, &financials);
    Ok(FleetOverview {
        metrics,
        financials,
        insights,
    })
}

/// Merge a partial update into the stored snapshot.
///
/// The merged record is validated before anything is written; on error the
/// stored snapshot is unchanged.
pub fn update_fleet(repo: &impl FleetRepository, update: &FleetMetricsUpdate) -> Result<FleetMetrics> {
    let current = repo.load()?;
    if update.is_empty() {
        return Ok(current);
    }
    let merged = current.apply(update);
    merged.validate()?;
    repo.save(&merged)?;
    tracing::info!(trucks = merged.trucks, miles = merged.miles_per_month, "fleet snapshot updated");
    Ok(merged)
}

/// Apply an update given as JSON, the shape the assistant produces
pub fn update_fleet_from_json(repo: &impl FleetRepository, json: &str) -> Result<FleetMetrics> {
    let update: FleetMetricsUpdate = serde_json::from_str(json)?;
    update_fleet(repo, &update)
}
