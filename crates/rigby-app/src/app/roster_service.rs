//! Driver roster maintenance: add drivers, pay rates, aliases

use rigby_domain::model::DriverProfile;
use rigby_domain::repository::DriverRepository;
use rigby_types::{Error, Result, ValidationError};

pub fn list_drivers(drivers: &impl DriverRepository) -> Result<Vec<DriverProfile>> {
    let mut all = drivers.find_all()?;
    all.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(all)
}

/// Add a driver to the roster; an existing name or alias is reported back as-is
pub fn add_driver(drivers: &impl DriverRepository, name: &str) -> Result<DriverProfile> {
    ValidationError::check_non_empty("name", name)?;
    if let Some(existing) = drivers.find_by_name(name)? {
        return Ok(existing);
    }
    let profile = DriverProfile::new(name.trim());
    drivers.save(&profile)?;
    tracing::info!(driver = %profile.name, "driver added");
    Ok(profile)
}

fn require_driver(drivers: &impl DriverRepository, name: &str) -> Result<DriverProfile> {
    drivers
        .find_by_name(name)?
        .ok_or_else(|| Error::NotFound(format!("driver {}", name.trim())))
}

/// Set the per-mile pay rate of a known driver
pub fn set_pay_rate(drivers: &impl DriverRepository, name: &str, rate: f64) -> Result<DriverProfile> {
    ValidationError::check_amount("pay_rate", rate)?;
    let mut profile = require_driver(drivers, name)?;
    profile.pay_rate = rate;
    drivers.save(&profile)?;
    tracing::info!(driver = %profile.name, rate, "pay rate set");
    Ok(profile)
}

/// Attach an alternate spelling to a driver.
///
/// Fails when the alias already names a different driver.
pub fn add_alias(drivers: &impl DriverRepository, name: &str, alias: &str) -> Result<DriverProfile> {
    ValidationError::check_non_empty("alias", alias)?;
    let mut profile = require_driver(drivers, name)?;
    if let Some(owner) = drivers.find_by_name(alias)? {
        if owner.name != profile.name {
            return Err(Error::Validation(ValidationError::InUse {
                field: "alias".to_string(),
                value: alias.trim().to_string(),
                owner: owner.name,
            }));
        }
        return Ok(profile);
    }
    profile.aliases.push(alias.trim().to_string());
    drivers.save(&profile)?;
    tracing::info!(driver = %profile.name, alias = alias.trim(), "alias added");
    Ok(profile)
}
