//! Plain-text dashboard report

use rigby_types::Period;

use crate::model::{DriverMetrics, FinancialsEstimate, FleetMetrics, SummaryMetrics};

/// Format a dollar amount with thousands separators; negatives in parentheses
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0.0 && cents > 0 {
        format!("(${}.{:02})", grouped, frac)
    } else {
        format!("${}.{:02}", grouped, frac)
    }
}

pub fn generate_dashboard_report(
    summary: &SummaryMetrics,
    drivers: &[DriverMetrics],
    period: Period,
    factoring_rate_percent: f64,
) -> String {
    let mut report = String::new();
    report.push_str("==================================================================\n");
    report.push_str(&format!("  Fleet Financials ({})\n", period.label()));
    report.push_str("==================================================================\n\n");

    report.push_str("[Summary]\n");
    report.push_str(&format!("  Revenue:          {:>16}\n", format_currency(summary.total_revenue)));
    report.push_str(&format!(
        "  Factoring ({:.1}%): {:>16}\n",
        factoring_rate_percent,
        format_currency(summary.factoring_fee)
    ));
    report.push_str(&format!("  Net revenue:      {:>16}\n", format_currency(summary.net_revenue)));
    report.push_str(&format!("  Fixed expenses:   {:>16}\n", format_currency(summary.fixed_expenses)));
    report.push_str(&format!("  Variable expenses:{:>16}\n", format_currency(summary.variable_expenses)));
    report.push_str(&format!("  Total expenses:   {:>16}\n", format_currency(summary.total_expenses)));
    report.push_str(&format!(
        "  Net profit:       {:>16}  ({:.1}% margin)\n",
        format_currency(summary.net_profit),
        summary.profit_margin
    ));
    report.push_str(&format!("  Miles:            {:>16}\n", summary.total_miles));
    report.push_str(&format!("  Loads:            {:>16}\n", summary.load_count));
    report.push('\n');

    report.push_str("[Per Mile]\n");
    report.push_str(&format!("  Avg RPM:          {:>16}\n", format_currency(summary.avg_rpm)));
    report.push_str(&format!("  Fixed CPM:        {:>16}\n", format_currency(summary.fixed_cpm)));
    report.push_str(&format!("  Variable CPM:     {:>16}\n", format_currency(summary.variable_cpm)));
    report.push_str(&format!("  Avg CPM:          {:>16}\n", format_currency(summary.avg_cpm)));
    report.push_str(&format!("  Profit / mile:    {:>16}\n", format_currency(summary.profit_per_mile)));
    report.push('\n');

    if drivers.is_empty() {
        report.push_str("[Drivers]\n  No loads in this period.\n\n");
    } else {
        report.push_str("[Drivers]\n");
        report.push_str("-".repeat(86).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<18} {:>14} {:>14} {:>14} {:>8} {:>7} {:>7}\n",
            "Driver", "Revenue", "Expenses", "Profit", "Miles", "RPM", "CPM"
        ));
        report.push_str("-".repeat(86).as_str());
        report.push('\n');
        for d in drivers {
            report.push_str(&format!(
                "{:<18} {:>14} {:>14} {:>14} {:>8} {:>7.2} {:>7.2}\n",
                truncate_str(&d.driver_name, 18),
                format_currency(d.gross_revenue),
                format_currency(d.total_expenses),
                format_currency(d.net_profit),
                d.total_miles,
                d.rpm,
                d.total_cpm
            ));
        }
        report.push('\n');
    }

    report.push_str("==================================================================\n");
    report
}

/// Detail block for a single driver
pub fn generate_driver_report(driver: &DriverMetrics) -> String {
    let mut report = String::new();
    report.push_str(&format!("Driver: {}\n", driver.driver_name));
    report.push_str("-".repeat(50).as_str());
    report.push('\n');
    report.push_str(&format!("Revenue:        {}\n", format_currency(driver.gross_revenue)));
    report.push_str(&format!(
        "Expenses:       {}  (fixed {} | variable {})\n",
        format_currency(driver.total_expenses),
        format_currency(driver.fixed_expenses),
        format_currency(driver.variable_expenses)
    ));
    report.push_str(&format!("  Factoring:    {}\n", format_currency(driver.factoring_fee)));
    report.push_str(&format!("  Driver pay:   {}\n", format_currency(driver.driver_pay)));
    report.push_str(&format!(
        "Net profit:     {}  ({:.1}% margin)\n",
        format_currency(driver.net_profit),
        driver.profit_margin()
    ));
    report.push_str(&format!(
        "Miles:          {}  (RPM {:.2} | CPM {:.2} | fixed {:.2} | variable {:.2})\n",
        driver.total_miles, driver.rpm, driver.total_cpm, driver.fixed_cpm, driver.variable_cpm
    ));

    if !driver.loads.is_empty() {
        report.push('\n');
        report.push_str(&format!(
            "{:>5} {:<12} {:<20} {:<20} {:>12} {:>7} {:>6}\n",
            "ID", "Load #", "Pickup", "Dropoff", "Gross", "Miles", "RPM"
        ));
        for load in &driver.loads {
            report.push_str(&format!(
                "{:>5} {:<12} {:<20} {:<20} {:>12} {:>7} {:>6.2}\n",
                load.id,
                truncate_str(&load.load_number, 12),
                truncate_str(&load.pickup_location, 20),
                truncate_str(&load.dropoff_location, 20),
                format_currency(load.gross_amount),
                load.miles,
                load.rate_per_mile()
            ));
        }
    }
    report
}

/// Fleet snapshot block; revenue is labelled as an estimate
pub fn generate_fleet_report(metrics: &FleetMetrics, financials: &FinancialsEstimate) -> String {
    let mut report = String::new();
    report.push_str("Fleet Snapshot (monthly)\n");
    report.push_str("========================\n");
    report.push_str(&format!("Trucks:            {}\n", metrics.trucks));
    report.push_str(&format!("Drivers:           {}\n", metrics.drivers));
    report.push_str(&format!("Loads / month:     {}\n", metrics.loads_per_month));
    report.push_str(&format!("Miles / month:     {}\n", metrics.miles_per_month));
    report.push_str(&format!("Fuel:              {}\n", format_currency(metrics.fuel_cost)));
    report.push_str(&format!("Insurance:         {}\n", format_currency(metrics.insurance)));
    report.push_str(&format!("Maintenance:       {}\n", format_currency(metrics.maintenance)));
    report.push_str(&format!("Other:             {}\n", format_currency(metrics.other_expenses)));
    report.push_str(&format!("Total expenses:    {}\n", format_currency(financials.total_expenses)));
    report.push('\n');
    report.push_str("Estimate (assumed revenue per load, not actual loads)\n");
    report.push_str(&format!("Est. revenue:      {}\n", format_currency(financials.estimated_revenue)));
    report.push_str(&format!("CPM:               ${:.2}\n", financials.cpm));
    report.push_str(&format!("RPM:               ${:.2}\n", financials.rpm));
    report.push_str(&format!("Profit / mile:     ${:.2}\n", financials.profit_per_mile));
    report.push_str(&format!("Monthly profit:    {}\n", format_currency(financials.monthly_profit)));
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
