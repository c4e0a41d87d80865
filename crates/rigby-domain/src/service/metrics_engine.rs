//! Fleet financial metrics derivation
//!
//! Every view that shows cost per mile, revenue per mile or profit goes through
//! these functions. They are pure: no I/O, no retained state, and zero mileage
//! degrades to zero rates instead of NaN or infinity.
//!
//! Net profit is `gross_revenue - total_expenses`. The factoring fee is part of
//! `variable_expenses`, so it is subtracted exactly once. `net_revenue` is
//! reported for display only.

use crate::model::{
    DriverMetrics, ExpenseKind, FinancialsEstimate, FleetMetrics, MetricsInput, SummaryMetrics,
};

/// Factoring rate applied when none is configured
pub const DEFAULT_FACTORING_RATE_PERCENT: f64 = 2.2;

/// Placeholder revenue per load for the fleet snapshot estimate
pub const ASSUMED_REVENUE_PER_LOAD: f64 = 2500.0;

/// `amount / miles`, or 0 when there are no miles
pub fn per_mile(amount: f64, miles: u64) -> f64 {
    if miles == 0 {
        0.0
    } else {
        amount / miles as f64
    }
}

pub fn factoring_fee(gross_revenue: f64, factoring_rate_percent: f64) -> f64 {
    gross_revenue * factoring_rate_percent / 100.0
}

pub fn compute_driver_metrics(input: &MetricsInput) -> DriverMetrics {
    let miles = input.total_miles;
    let gross_revenue = input.gross_revenue;

    let fixed_expenses = input.expenses.total_of(ExpenseKind::Fixed);
    let factoring_fee = factoring_fee(gross_revenue, input.factoring_rate_percent);
    let driver_pay = input.driver_pay_rate * miles as f64;
    let variable_expenses =
        input.expenses.total_of(ExpenseKind::Variable) + factoring_fee + driver_pay;
    let total_expenses = fixed_expenses + variable_expenses;

    let fixed_cpm = per_mile(fixed_expenses, miles);
    let variable_cpm = per_mile(variable_expenses, miles);
    let total_cpm = fixed_cpm + variable_cpm;
    let rpm = per_mile(gross_revenue, miles);

    DriverMetrics {
        driver_name: input.driver_name.clone(),
        gross_revenue,
        factoring_fee,
        net_revenue: gross_revenue - factoring_fee,
        fixed_expenses,
        variable_expenses,
        driver_pay,
        total_expenses,
        net_profit: gross_revenue - total_expenses,
        total_miles: miles,
        fixed_cpm,
        variable_cpm,
        total_cpm,
        rpm,
        profit_per_mile: rpm - total_cpm,
        expenses: input.expenses.clone(),
        loads: input.loads.clone(),
    }
}

/// Sum drivers into fleet totals.
///
/// Rates are recomputed from the combined totals, never averaged across drivers.
pub fn compute_summary_metrics(drivers: &[DriverMetrics]) -> SummaryMetrics {
    let mut summary = SummaryMetrics {
        driver_count: drivers.len(),
        ..Default::default()
    };

    for d in drivers {
        summary.load_count += d.loads.len();
        summary.total_revenue += d.gross_revenue;
        summary.factoring_fee += d.factoring_fee;
        summary.net_revenue += d.net_revenue;
        summary.fixed_expenses += d.fixed_expenses;
        summary.variable_expenses += d.variable_expenses;
        summary.driver_pay += d.driver_pay;
        summary.total_expenses += d.total_expenses;
        summary.net_profit += d.net_profit;
        summary.total_miles += d.total_miles;
    }

    let miles = summary.total_miles;
    summary.avg_rpm = per_mile(summary.total_revenue, miles);
    summary.avg_cpm = per_mile(summary.total_expenses, miles);
    summary.fixed_cpm = per_mile(summary.fixed_expenses, miles);
    summary.variable_cpm = per_mile(summary.variable_expenses, miles);
    summary.profit_per_mile = summary.avg_rpm - summary.avg_cpm;
    summary.profit_margin = if summary.total_revenue == 0.0 {
        0.0
    } else {
        summary.net_profit / summary.total_revenue * 100.0
    };

    summary
}

/// "What-if" estimate for the fleet snapshot using [`ASSUMED_REVENUE_PER_LOAD`]
pub fn compute_fleet_snapshot_financials(metrics: &FleetMetrics) -> FinancialsEstimate {
    estimate_fleet_financials(metrics, ASSUMED_REVENUE_PER_LOAD)
}

/// "What-if" estimate with an explicit revenue-per-load assumption
pub fn estimate_fleet_financials(metrics: &FleetMetrics, revenue_per_load: f64) -> FinancialsEstimate {
    let miles = u64::from(metrics.miles_per_month);
    let total_expenses = metrics.total_expenses();
    let estimated_revenue = f64::from(metrics.loads_per_month) * revenue_per_load;

    let cpm = per_mile(total_expenses, miles);
    let rpm = per_mile(estimated_revenue, miles);
    let profit_per_mile = rpm - cpm;

    FinancialsEstimate {
        total_expenses,
        estimated_revenue,
        cpm,
        rpm,
        profit_per_mile,
        monthly_profit: profit_per_mile * miles as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExpenseBreakdown, ExpenseCategory, Load};

    const TOLERANCE: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_invariants(m: &DriverMetrics) {
        assert_close(m.total_expenses, m.fixed_expenses + m.variable_expenses);
        assert_close(m.total_cpm, m.fixed_cpm + m.variable_cpm);
        assert_close(m.profit_per_mile, m.rpm - m.total_cpm);
        assert_close(m.net_revenue, m.gross_revenue - m.factoring_fee);
        assert_close(m.net_profit, m.gross_revenue - m.total_expenses);
    }

    fn scenario_input() -> MetricsInput {
        let expenses = ExpenseBreakdown::new()
            .with(ExpenseCategory::Fuel, 1500.0)
            .with(ExpenseCategory::Insurance, 800.0);
        MetricsInput::new(10_000.0, 5000, expenses, 2.2, 0.0)
    }

    #[test]
    fn test_reference_scenario() {
        let m = compute_driver_metrics(&scenario_input());
        assert_close(m.factoring_fee, 220.0);
        assert_close(m.fixed_expenses, 800.0);
        assert_close(m.variable_expenses, 1720.0);
        assert_close(m.total_expenses, 2520.0);
        assert_close(m.net_profit, 7480.0);
        assert_close(m.net_revenue, 9780.0);
        assert_close(m.total_cpm, 0.504);
        assert_close(m.rpm, 2.0);
        assert_close(m.profit_per_mile, 1.496);
        assert_invariants(&m);
    }

    #[test]
    fn test_factoring_counted_once() {
        let m = compute_driver_metrics(&MetricsInput::new(
            10_000.0,
            1000,
            ExpenseBreakdown::new(),
            2.2,
            0.0,
        ));
        assert_close(m.total_expenses, 220.0);
        assert_close(m.net_profit, 9780.0);
    }

    #[test]
    fn test_zero_miles_degrades_to_zero_rates() {
        let m = compute_driver_metrics(&MetricsInput::new(
            5000.0,
            0,
            ExpenseBreakdown::new().with(ExpenseCategory::Insurance, 900.0),
            2.2,
            0.6,
        ));
        assert_eq!(m.rpm, 0.0);
        assert_eq!(m.fixed_cpm, 0.0);
        assert_eq!(m.variable_cpm, 0.0);
        assert_eq!(m.total_cpm, 0.0);
        assert_eq!(m.profit_per_mile, 0.0);
        assert_eq!(m.driver_pay, 0.0);
        assert!(m.net_profit.is_finite());
        assert_invariants(&m);
    }

    #[test]
    fn test_driver_pay_is_variable_cost() {
        let m = compute_driver_metrics(&MetricsInput::new(
            8000.0,
            4000,
            ExpenseBreakdown::new(),
            0.0,
            0.5,
        ));
        assert_close(m.driver_pay, 2000.0);
        assert_close(m.variable_expenses, 2000.0);
        assert_close(m.variable_cpm, 0.5);
        assert_invariants(&m);
    }

    #[test]
    fn test_every_category_lands_in_its_bucket() {
        let mut expenses = ExpenseBreakdown::new();
        for c in ExpenseCategory::all() {
            expenses.add(c.key(), 10.0);
        }
        let m = compute_driver_metrics(&MetricsInput::new(0.0, 100, expenses, 0.0, 0.0));
        assert_close(m.fixed_expenses, 120.0);
        assert_close(m.variable_expenses, 80.0);
        assert_invariants(&m);
    }

    #[test]
    fn test_idempotent() {
        let input = scenario_input();
        let a = compute_driver_metrics(&input);
        let b = compute_driver_metrics(&input);
        assert_eq!(a.total_cpm.to_bits(), b.total_cpm.to_bits());
        assert_eq!(a.profit_per_mile.to_bits(), b.profit_per_mile.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_invariants_hold_across_inputs() {
        let grosses = [0.0, 1.0, 2_345.67, 99_999.99];
        let miles = [0u64, 1, 777, 120_000];
        let rates = [0.0, 2.2, 5.0];
        for &gross in &grosses {
            for &mi in &miles {
                for &rate in &rates {
                    let expenses = ExpenseBreakdown::new()
                        .with(ExpenseCategory::Fuel, gross * 0.3)
                        .with(ExpenseCategory::TruckPayment, 1800.0)
                        .with(ExpenseCategory::Toll, 42.5);
                    let m = compute_driver_metrics(&MetricsInput::new(gross, mi, expenses, rate, 0.45));
                    assert_invariants(&m);
                    assert!(m.rpm.is_finite() && m.total_cpm.is_finite());
                }
            }
        }
    }

    #[test]
    fn test_from_loads_sums_gross_and_miles() {
        let load = |gross: f64, miles: u32| Load {
            id: 0,
            load_number: String::new(),
            driver_name: "Dana".to_string(),
            gross_amount: gross,
            net_amount: gross,
            miles,
            pickup_location: String::new(),
            dropoff_location: String::new(),
            pickup_date: None,
            dropoff_date: None,
            batch_id: None,
        };
        let input = MetricsInput::from_loads(
            "Dana",
            vec![load(2500.0, 1000), load(1500.0, 600)],
            ExpenseBreakdown::new(),
            2.2,
            0.0,
        );
        assert_close(input.gross_revenue, 4000.0);
        assert_eq!(input.total_miles, 1600);
        let m = compute_driver_metrics(&input);
        assert_eq!(m.driver_name, "Dana");
        assert_eq!(m.loads.len(), 2);
        assert_close(m.rpm, 2.5);
    }

    #[test]
    fn test_summary_recomputes_rates_from_totals() {
        let first = compute_driver_metrics(&scenario_input().with_driver_name("A"));
        // 20000 revenue over 10000 miles at 0.3 CPM
        let second = compute_driver_metrics(
            &MetricsInput::new(
                20_000.0,
                10_000,
                ExpenseBreakdown::new().with(ExpenseCategory::Fuel, 3000.0),
                0.0,
                0.0,
            )
            .with_driver_name("B"),
        );
        assert_close(second.total_cpm, 0.3);

        let summary = compute_summary_metrics(&[first, second]);
        assert_eq!(summary.driver_count, 2);
        assert_close(summary.total_revenue, 30_000.0);
        assert_close(summary.total_expenses, 5520.0);
        assert_eq!(summary.total_miles, 15_000);
        assert_close(summary.avg_rpm, 2.0);
        assert_close(summary.avg_cpm, 0.368);
        assert!((summary.avg_cpm - (0.504 + 0.3) / 2.0).abs() > 0.01);
        assert_close(summary.net_profit, 24_480.0);
        assert_close(summary.profit_margin, 81.6);
        assert_close(summary.avg_cpm, summary.fixed_cpm + summary.variable_cpm);
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let summary = compute_summary_metrics(&[]);
        assert_eq!(summary, SummaryMetrics::default());
    }

    #[test]
    fn test_profit_margin_guarded() {
        let m = compute_driver_metrics(&MetricsInput::new(0.0, 0, ExpenseBreakdown::new(), 2.2, 0.0));
        assert_eq!(m.profit_margin(), 0.0);
        let m = compute_driver_metrics(&scenario_input());
        assert_close(m.profit_margin(), 74.8);
    }

    #[test]
    fn test_fleet_snapshot_financials() {
        let metrics = FleetMetrics {
            trucks: 2,
            drivers: 2,
            loads_per_month: 12,
            miles_per_month: 20_000,
            fuel_cost: 14_000.0,
            insurance: 3_000.0,
            maintenance: 2_000.0,
            other_expenses: 1_000.0,
        };
        let est = compute_fleet_snapshot_financials(&metrics);
        assert_close(est.total_expenses, 20_000.0);
        assert_close(est.estimated_revenue, 30_000.0);
        assert_close(est.cpm, 1.0);
        assert_close(est.rpm, 1.5);
        assert_close(est.profit_per_mile, 0.5);
        assert_close(est.monthly_profit, 10_000.0);
    }

    #[test]
    fn test_fleet_snapshot_zero_miles() {
        let metrics = FleetMetrics {
            loads_per_month: 4,
            fuel_cost: 500.0,
            ..Default::default()
        };
        let est = compute_fleet_snapshot_financials(&metrics);
        assert_eq!(est.cpm, 0.0);
        assert_eq!(est.rpm, 0.0);
        assert_eq!(est.monthly_profit, 0.0);
        assert_close(est.estimated_revenue, 10_000.0);
    }

    #[test]
    fn test_estimate_with_custom_rate() {
        let metrics = FleetMetrics {
            loads_per_month: 10,
            miles_per_month: 10_000,
            ..Default::default()
        };
        let est = estimate_fleet_financials(&metrics, 3000.0);
        assert_close(est.rpm, 3.0);
    }
}
