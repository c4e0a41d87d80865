//! Rule-of-thumb advice for the fleet snapshot

use serde::{Deserialize, Serialize};

use crate::model::{FinancialsEstimate, FleetMetrics};

pub const INDUSTRY_AVERAGE_CPM: f64 = 1.80;
pub const HIGH_CPM_THRESHOLD: f64 = 2.00;
pub const THIN_PROFIT_PER_MILE: f64 = 0.30;
pub const STRONG_PROFIT_PER_MILE: f64 = 1.00;
pub const TARGET_LOADS_PER_TRUCK: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FleetInsight {
    HighCpm { cpm: f64 },
    ThinMargin { profit_per_mile: f64 },
    Underutilized { loads_per_truck: f64 },
    EfficientCpm { cpm: f64 },
    StrongProfit { profit_per_mile: f64 },
}

impl FleetInsight {
    pub fn message(&self) -> String {
        match self {
            FleetInsight::HighCpm { cpm } => format!(
                "CPM is ${:.2}, industry average is ${:.2}. Look for costs to cut.",
                cpm, INDUSTRY_AVERAGE_CPM
            ),
            FleetInsight::ThinMargin { .. } => {
                "Profit margin is thin. Find better paying lanes or reduce expenses.".to_string()
            }
            FleetInsight::Underutilized { loads_per_truck } => format!(
                "Trucks could handle more loads. Current average: {:.1} loads/truck.",
                loads_per_truck
            ),
            FleetInsight::EfficientCpm { .. } => {
                "Great CPM. You're operating efficiently compared to industry standards.".to_string()
            }
            FleetInsight::StrongProfit { .. } => {
                "Strong profit margins. Consider expanding the fleet.".to_string()
            }
        }
    }
}

/// Evaluate the advice rules; an empty fleet gets no advice
pub fn fleet_insights(metrics: &FleetMetrics, financials: &FinancialsEstimate) -> Vec<FleetInsight> {
    let mut insights = Vec::new();
    if metrics.trucks == 0 {
        return insights;
    }

    if financials.cpm > HIGH_CPM_THRESHOLD {
        insights.push(FleetInsight::HighCpm { cpm: financials.cpm });
    }
    if financials.profit_per_mile > 0.0 && financials.profit_per_mile < THIN_PROFIT_PER_MILE {
        insights.push(FleetInsight::ThinMargin {
            profit_per_mile: financials.profit_per_mile,
        });
    }
    let target_loads = u64::from(metrics.trucks) * u64::from(TARGET_LOADS_PER_TRUCK);
    if u64::from(metrics.loads_per_month) < target_loads {
        insights.push(FleetInsight::Underutilized {
            loads_per_truck: f64::from(metrics.loads_per_month) / f64::from(metrics.trucks),
        });
    }
    if financials.cpm <= INDUSTRY_AVERAGE_CPM {
        insights.push(FleetInsight::EfficientCpm { cpm: financials.cpm });
    }
    if financials.profit_per_mile > STRONG_PROFIT_PER_MILE {
        insights.push(FleetInsight::StrongProfit {
            profit_per_mile: financials.profit_per_mile,
        });
    }

    insights
}
