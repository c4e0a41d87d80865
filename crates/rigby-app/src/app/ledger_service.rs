//! Manual corrections to imported loads and expense amounts

use rigby_domain::model::{DriverRoster, ExpenseCategory, Load, LoadEdit};
use rigby_domain::repository::{DriverRepository, ExpenseRepository, LoadRepository};
use rigby_types::{Error, Result, ValidationError};

fn require_load(loads: &impl LoadRepository, id: u64) -> Result<Load> {
    loads
        .find_by_id(id)?
        .ok_or_else(|| Error::NotFound(format!("load {}", id)))
}

/// Edit gross amount, miles or locations of a load
pub fn edit_load(loads: &impl LoadRepository, id: u64, edit: &LoadEdit) -> Result<Load> {
    let mut load = require_load(loads, id)?;
    if edit.is_empty() {
        return Ok(load);
    }
    load.apply_edit(edit)?;
    loads.update(&load)?;
    tracing::info!(load = id, "load edited");
    Ok(load)
}

/// Move a load to another driver; the name is resolved through the roster
pub fn reassign_load(
    loads: &impl LoadRepository,
    drivers: &impl DriverRepository,
    id: u64,
    driver_name: &str,
) -> Result<Load> {
    ValidationError::check_non_empty("driver", driver_name)?;
    let mut load = require_load(loads, id)?;
    let roster = DriverRoster::new(drivers.find_all()?);
    load.driver_name = roster.resolve(driver_name);
    loads.update(&load)?;
    tracing::info!(load = id, driver = %load.driver_name, "load reassigned");
    Ok(load)
}

pub fn delete_load(loads: &impl LoadRepository, id: u64) -> Result<()> {
    if !loads.delete(id)? {
        return Err(Error::NotFound(format!("load {}", id)));
    }
    tracing::info!(load = id, "load deleted");
    Ok(())
}

/// Set the standing amount of one expense category for a driver
pub fn set_expense(
    expenses: &impl ExpenseRepository,
    drivers: &impl DriverRepository,
    driver_name: &str,
    category: ExpenseCategory,
    amount: f64,
) -> Result<()> {
    ValidationError::check_non_empty("driver", driver_name)?;
    ValidationError::check_amount(category.key(), amount)?;
    let roster = DriverRoster::new(drivers.find_all()?);
    let driver = roster.resolve(driver_name);
    expenses.set_amount(&driver, category.key(), amount)?;
    tracing::info!(driver = %driver, category = category.key(), amount, "expense set");
    Ok(())
}

/// Remove every expense entry; returns the number removed
pub fn clear_expenses(expenses: &impl ExpenseRepository) -> Result<usize> {
    let removed = expenses.delete_all()?;
    tracing::info!(removed, "expenses cleared");
    Ok(removed)
}
