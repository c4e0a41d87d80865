//! Grouping loads and expenses per driver for a reporting period

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rigby_types::Period;

use crate::model::{DriverRoster, ExpenseBreakdown, ExpenseEntry, Load};

/// Loads inside `period`, grouped by canonical driver name.
///
/// A load is dated by its pickup date. Order within each driver follows the input.
pub fn group_loads_by_driver(
    loads: &[Load],
    roster: &DriverRoster,
    period: Period,
    as_of: NaiveDate,
) -> BTreeMap<String, Vec<Load>> {
    let mut grouped: BTreeMap<String, Vec<Load>> = BTreeMap::new();
    for load in loads.iter().filter(|l| period.contains(l.pickup_date, as_of)) {
        let driver = roster.resolve(&load.driver_name);
        let mut load = load.clone();
        load.driver_name = driver.clone();
        grouped.entry(driver).or_default().push(load);
    }
    grouped
}

/// Expense amounts for one driver in `period`.
///
/// Undated entries are standing amounts and are included in every period.
pub fn expenses_for_driver(
    entries: &[ExpenseEntry],
    driver: &str,
    roster: &DriverRoster,
    period: Period,
    as_of: NaiveDate,
) -> ExpenseBreakdown {
    let mut breakdown = ExpenseBreakdown::new();
    for entry in entries {
        if roster.resolve(&entry.driver_name) != driver {
            continue;
        }
        if entry.date.is_some() && !period.contains(entry.date, as_of) {
            continue;
        }
        breakdown.add(&entry.category, entry.amount);
    }
    breakdown
}

/// Canonical names of drivers that have expenses in `period` but no loads
pub fn drivers_with_expenses_only(
    entries: &[ExpenseEntry],
    grouped_loads: &BTreeMap<String, Vec<Load>>,
    roster: &DriverRoster,
    period: Period,
    as_of: NaiveDate,
) -> Vec<String> {
    let mut names: Vec<String> = entries
        .iter()
        .filter(|e| e.date.is_none() || period.contains(e.date, as_of))
        .map(|e| roster.resolve(&e.driver_name))
        .filter(|name| !grouped_loads.contains_key(name))
        .collect();
    names.sort();
    names.dedup();
    names
}
