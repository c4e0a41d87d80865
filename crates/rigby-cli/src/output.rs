//! Output formatting module

use rigby_app::app::{BatchDeletion, Dashboard, FleetOverview, ImportOutcome};
use rigby_domain::model::{DriverProfile, ImportBatch, Load};
use rigby_domain::service::{
    format_currency, generate_dashboard_report, generate_driver_report, generate_fleet_report,
};
use rigby_types::{OutputFormat, Result};
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    println!("{}", content);
    Ok(())
}

pub fn output_dashboard(output_format: OutputFormat, dashboard: &Dashboard) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(dashboard);
    }

    print!(
        "{}",
        generate_dashboard_report(
            &dashboard.summary,
            &dashboard.drivers,
            dashboard.period,
            dashboard.factoring_rate_percent,
        )
    );
    // a single driver also gets the detail block with its loads
    if let [driver] = dashboard.drivers.as_slice() {
        println!();
        print!("{}", generate_driver_report(driver));
    }
    Ok(())
}

pub fn output_fleet(output_format: OutputFormat, overview: &FleetOverview) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(overview);
    }

    print!("{}", generate_fleet_report(&overview.metrics, &overview.financials));
    Ok(())
}

pub fn output_insights(output_format: OutputFormat, overview: &FleetOverview) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&overview.insights);
    }

    println!("Fleet Insights");
    println!("==============");
    if overview.insights.is_empty() {
        println!("No insights. Add trucks and monthly figures with: rigby fleet set");
        return Ok(());
    }
    for insight in &overview.insights {
        println!("- {}", insight.message());
    }
    Ok(())
}

pub fn output_import(output_format: OutputFormat, outcome: &ImportOutcome) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(outcome);
    }

    println!(
        "Imported {} {} from {}",
        outcome.batch.record_count, outcome.batch.kind, outcome.batch.source
    );
    println!("  Batch: {}", outcome.batch.short_id());
    if outcome.skipped > 0 {
        println!(
            "  Skipped {} payment rows totalling {}",
            outcome.skipped,
            format_currency(outcome.payment_total)
        );
    }
    Ok(())
}

pub fn output_batches(output_format: OutputFormat, batches: &[ImportBatch]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(batches);
    }

    println!("Import Batches");
    println!("==============");
    if batches.is_empty() {
        println!("No batches found.");
        return Ok(());
    }

    println!(
        "{:<14} {:<9} {:>8} {:<17} {}",
        "Batch", "Kind", "Records", "Imported", "Source"
    );
    println!("{}", "-".repeat(72));
    for batch in batches {
        println!(
            "{:<14} {:<9} {:>8} {:<17} {}",
            batch.short_id(),
            batch.kind.to_string(),
            batch.record_count,
            batch.imported_at.format("%Y-%m-%d %H:%M").to_string(),
            batch.source
        );
    }
    Ok(())
}

pub fn output_batch_deletion(output_format: OutputFormat, deletion: &BatchDeletion) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(deletion);
    }

    println!(
        "Deleted batch {} ({}): {} {} removed",
        deletion.batch.short_id(),
        deletion.batch.source,
        deletion.records_removed,
        deletion.batch.kind
    );
    Ok(())
}

pub fn output_load(output_format: OutputFormat, load: &Load) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(load);
    }

    println!("Load {} ({})", load.id, load.load_number);
    println!("  Driver:  {}", load.driver_name);
    println!("  Route:   {} -> {}", load.pickup_location, load.dropoff_location);
    println!("  Gross:   {}", format_currency(load.gross_amount));
    println!("  Miles:   {}", load.miles);
    println!("  RPM:     ${:.2}", load.rate_per_mile());
    Ok(())
}

pub fn output_drivers(output_format: OutputFormat, drivers: &[DriverProfile]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(drivers);
    }

    println!("Drivers");
    println!("=======");
    if drivers.is_empty() {
        println!("No drivers on the roster.");
        return Ok(());
    }

    println!("{:<24} {:>9} {:<7} {}", "Name", "Pay/mile", "Active", "Aliases");
    println!("{}", "-".repeat(64));
    for driver in drivers {
        println!(
            "{:<24} {:>9.3} {:<7} {}",
            driver.name,
            driver.pay_rate,
            if driver.active { "yes" } else { "no" },
            driver.aliases.join(", ")
        );
    }
    Ok(())
}

pub fn output_driver(output_format: OutputFormat, driver: &DriverProfile) -> Result<()> {
    output_drivers(output_format, std::slice::from_ref(driver))
}
