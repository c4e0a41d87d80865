//! Command handlers

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use rigby_app::app::{
    add_alias, add_driver, build_dashboard, clear_expenses, delete_batch, delete_load, edit_load,
    fleet_overview, import_expenses, import_loads, list_batches, list_drivers, reassign_load,
    set_expense, set_pay_rate, update_fleet, update_fleet_from_json, DashboardOptions,
};
use rigby_app::config::Config;
use rigby_app::export::export_dashboard;
use rigby_app::repository::Stores;
use rigby_domain::model::{FleetMetricsUpdate, LoadEdit};
use rigby_domain::service::format_currency;
use rigby_types::{OutputFormat, Period, Result};

use crate::cli::{
    BatchAction, Cli, Commands, DriverAction, ExpenseAction, FleetAction, ImportKind, LoadAction,
};
use crate::output::{
    output_batch_deletion, output_batches, output_dashboard, output_driver, output_drivers,
    output_fleet, output_import, output_insights, output_load,
};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Config {
            show,
            set_factoring_rate,
            set_period,
            set_output,
            set_data_dir,
            set_revenue_per_load,
            reset,
        } => cmd_config(
            *show,
            *set_factoring_rate,
            *set_period,
            *set_output,
            set_data_dir.clone(),
            *set_revenue_per_load,
            *reset,
        ),
        command => execute_on_stores(&cli, command, Config::load()?),
    }
}

/// Commands that read or write the data directory
fn execute_on_stores(cli: &Cli, command: &Commands, mut config: Config) -> Result<()> {
    // Override from CLI args
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);
    let stores = Stores::open(&config)?;

    match command {
        Commands::Dashboard {
            period,
            as_of,
            factoring_rate,
            driver,
            export,
        } => cmd_dashboard(
            &config,
            &stores,
            output_format,
            *period,
            *as_of,
            *factoring_rate,
            driver.clone(),
            export.as_deref(),
        ),

        Commands::Fleet { action } => cmd_fleet(&config, &stores, output_format, action),

        Commands::Import { kind } => {
            let outcome = match kind {
                ImportKind::Loads { file } => {
                    import_loads(&stores.loads, &stores.drivers, &stores.batches, file)?
                }
                ImportKind::Expenses { file } => {
                    import_expenses(&stores.expenses, &stores.drivers, &stores.batches, file)?
                }
            };
            output_import(output_format, &outcome)
        }

        Commands::Batches { action } => match action {
            BatchAction::List => output_batches(output_format, &list_batches(&stores.batches)?),
            BatchAction::Delete { id } => {
                let deletion = delete_batch(&stores.loads, &stores.expenses, &stores.batches, id)?;
                output_batch_deletion(output_format, &deletion)
            }
        },

        Commands::Load { action } => cmd_load(&stores, output_format, action),

        Commands::Expense { action } => cmd_expense(&stores, action),

        Commands::Driver { action } => cmd_driver(&stores, output_format, action),

        // handled before any store is opened
        Commands::Config { .. } => Ok(()),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_dashboard(
    config: &Config,
    stores: &Stores,
    output_format: OutputFormat,
    period: Option<Period>,
    as_of: Option<NaiveDate>,
    factoring_rate: Option<f64>,
    driver: Option<String>,
    export: Option<&Path>,
) -> Result<()> {
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let mut options = DashboardOptions::from_config(config, as_of);
    if let Some(period) = period {
        options = options.with_period(period);
    }
    if let Some(rate) = factoring_rate {
        options = options.with_factoring_rate(rate);
    }
    if let Some(driver) = driver {
        options = options.with_driver(driver);
    }

    let dashboard = build_dashboard(&stores.loads, &stores.expenses, &stores.drivers, &options)?;
    output_dashboard(output_format, &dashboard)?;

    if let Some(path) = export {
        export_dashboard(&dashboard, path)?;
        eprintln!("Exported to: {}", path.display());
    }

    Ok(())
}

fn cmd_fleet(
    config: &Config,
    stores: &Stores,
    output_format: OutputFormat,
    action: &FleetAction,
) -> Result<()> {
    match action {
        FleetAction::Show => {}
        FleetAction::Insights => {
            let overview = fleet_overview(&stores.fleet, config.revenue_per_load_estimate)?;
            return output_insights(output_format, &overview);
        }
        FleetAction::Set {
            from_json: Some(path),
            ..
        } => {
            let json = std::fs::read_to_string(path)?;
            update_fleet_from_json(&stores.fleet, &json)?;
        }
        FleetAction::Set {
            trucks,
            drivers,
            loads_per_month,
            miles_per_month,
            fuel_cost,
            insurance,
            maintenance,
            other_expenses,
            from_json: None,
        } => {
            let update = FleetMetricsUpdate {
                trucks: *trucks,
                drivers: *drivers,
                loads_per_month: *loads_per_month,
                miles_per_month: *miles_per_month,
                fuel_cost: *fuel_cost,
                insurance: *insurance,
                maintenance: *maintenance,
                other_expenses: *other_expenses,
            };
            if update.is_empty() {
                eprintln!("Nothing to update. See: rigby fleet set --help");
            }
            update_fleet(&stores.fleet, &update)?;
        }
    }

    let overview = fleet_overview(&stores.fleet, config.revenue_per_load_estimate)?;
    output_fleet(output_format, &overview)
}

fn cmd_load(stores: &Stores, output_format: OutputFormat, action: &LoadAction) -> Result<()> {
    match action {
        LoadAction::Edit {
            id,
            gross,
            miles,
            pickup,
            dropoff,
        } => {
            let edit = LoadEdit {
                gross_amount: *gross,
                miles: *miles,
                pickup_location: pickup.clone(),
                dropoff_location: dropoff.clone(),
            };
            let load = edit_load(&stores.loads, *id, &edit)?;
            output_load(output_format, &load)
        }
        LoadAction::Reassign { id, driver } => {
            let load = reassign_load(&stores.loads, &stores.drivers, *id, driver)?;
            output_load(output_format, &load)
        }
        LoadAction::Delete { id } => {
            delete_load(&stores.loads, *id)?;
            println!("Deleted load {}", id);
            Ok(())
        }
    }
}

fn cmd_expense(stores: &Stores, action: &ExpenseAction) -> Result<()> {
    match action {
        ExpenseAction::Set {
            driver,
            category,
            amount,
        } => {
            set_expense(&stores.expenses, &stores.drivers, driver, *category, *amount)?;
            println!(
                "{} for {} set to {}",
                category.label(),
                driver.trim(),
                format_currency(*amount)
            );
            Ok(())
        }
        ExpenseAction::Clear => {
            let removed = clear_expenses(&stores.expenses)?;
            println!("Cleared {} expense entries", removed);
            Ok(())
        }
    }
}

fn cmd_driver(stores: &Stores, output_format: OutputFormat, action: &DriverAction) -> Result<()> {
    match action {
        DriverAction::List => output_drivers(output_format, &list_drivers(&stores.drivers)?),
        DriverAction::Add { name } => output_driver(output_format, &add_driver(&stores.drivers, name)?),
        DriverAction::PayRate { name, rate } => {
            output_driver(output_format, &set_pay_rate(&stores.drivers, name, *rate)?)
        }
        DriverAction::Alias { name, alias } => {
            output_driver(output_format, &add_alias(&stores.drivers, name, alias)?)
        }
    }
}

fn cmd_config(
    show: bool,
    set_factoring_rate: Option<f64>,
    set_period: Option<Period>,
    set_output: Option<OutputFormat>,
    set_data_dir: Option<PathBuf>,
    set_revenue_per_load: Option<f64>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let modified = edit_config(
        &mut config,
        set_factoring_rate,
        set_period,
        set_output,
        set_data_dir,
        set_revenue_per_load,
    );

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

/// Apply `config --set-*` flags; returns whether anything changed
fn edit_config(
    config: &mut Config,
    set_factoring_rate: Option<f64>,
    set_period: Option<Period>,
    set_output: Option<OutputFormat>,
    set_data_dir: Option<PathBuf>,
    set_revenue_per_load: Option<f64>,
) -> bool {
    let mut modified = false;

    if let Some(rate) = set_factoring_rate {
        config.factoring_rate_percent = rate;
        modified = true;
    }

    if let Some(period) = set_period {
        config.default_period = period;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(dir) = set_data_dir {
        config.data_dir = Some(dir);
        modified = true;
    }

    if let Some(revenue) = set_revenue_per_load {
        config.revenue_per_load_estimate = revenue;
        modified = true;
    }

    modified
}
