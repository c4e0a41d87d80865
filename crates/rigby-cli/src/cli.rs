//! CLI definition using clap

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rigby_domain::model::ExpenseCategory;
use rigby_types::{OutputFormat, Period};

#[derive(Parser)]
#[command(name = "rigby")]
#[command(version)]
#[command(about = "Fleet financial metrics: revenue, cost per mile and profit per driver")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory override. Uses config value if not specified.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show per-driver and fleet-wide financials for a period
    Dashboard {
        /// Reporting period. Uses config value if not specified.
        #[arg(long, short = 'p')]
        period: Option<Period>,

        /// Reference date for the period (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// Factoring rate in percent. Uses config value if not specified.
        #[arg(long)]
        factoring_rate: Option<f64>,

        /// Show a single driver (name or alias)
        #[arg(long, short = 'd')]
        driver: Option<String>,

        /// Also write the dashboard to an Excel file
        #[arg(long, short = 'o')]
        export: Option<PathBuf>,
    },

    /// Fleet snapshot and monthly estimate
    Fleet {
        #[command(subcommand)]
        action: FleetAction,
    },

    /// Import loads or expenses from CSV
    Import {
        #[command(subcommand)]
        kind: ImportKind,
    },

    /// List or delete import batches
    Batches {
        #[command(subcommand)]
        action: BatchAction,
    },

    /// Correct a single load
    Load {
        #[command(subcommand)]
        action: LoadAction,
    },

    /// Set standing expense amounts
    Expense {
        #[command(subcommand)]
        action: ExpenseAction,
    },

    /// Manage the driver roster
    Driver {
        #[command(subcommand)]
        action: DriverAction,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default factoring rate (percent)
        #[arg(long)]
        set_factoring_rate: Option<f64>,

        /// Set default dashboard period
        #[arg(long)]
        set_period: Option<Period>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set assumed revenue per load for the fleet estimate
        #[arg(long)]
        set_revenue_per_load: Option<f64>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum FleetAction {
    /// Show the snapshot with its estimate
    Show,

    /// Update snapshot fields; omitted fields keep their value
    Set {
        #[arg(long)]
        trucks: Option<u32>,

        #[arg(long)]
        drivers: Option<u32>,

        #[arg(long)]
        loads_per_month: Option<u32>,

        #[arg(long)]
        miles_per_month: Option<u32>,

        #[arg(long)]
        fuel_cost: Option<f64>,

        #[arg(long)]
        insurance: Option<f64>,

        #[arg(long)]
        maintenance: Option<f64>,

        #[arg(long)]
        other_expenses: Option<f64>,

        /// Read a partial update from a JSON file instead
        #[arg(long, conflicts_with_all = [
            "trucks", "drivers", "loads_per_month", "miles_per_month",
            "fuel_cost", "insurance", "maintenance", "other_expenses",
        ])]
        from_json: Option<PathBuf>,
    },

    /// Show advice derived from the snapshot
    Insights,
}

#[derive(Subcommand)]
pub enum ImportKind {
    /// Loads CSV (load_number, driver, gross_amount, miles, ...)
    Loads { file: PathBuf },

    /// Expenses CSV (driver, category, amount, [date])
    Expenses { file: PathBuf },
}

#[derive(Subcommand)]
pub enum BatchAction {
    /// List import batches, newest first
    List,

    /// Delete a batch and every record it created
    Delete {
        /// Batch id or unique prefix
        id: String,
    },
}

#[derive(Subcommand)]
pub enum LoadAction {
    /// Edit gross amount, miles or locations
    Edit {
        id: u64,

        #[arg(long)]
        gross: Option<f64>,

        #[arg(long)]
        miles: Option<u32>,

        #[arg(long)]
        pickup: Option<String>,

        #[arg(long)]
        dropoff: Option<String>,
    },

    /// Move a load to another driver
    Reassign {
        id: u64,

        #[arg(long, short = 'd')]
        driver: String,
    },

    Delete { id: u64 },
}

#[derive(Subcommand)]
pub enum ExpenseAction {
    /// Set the standing amount of a category for a driver
    Set {
        driver: String,
        /// Category key or label (fuel, insurance, "G/A", toll, ...)
        category: ExpenseCategory,
        amount: f64,
    },

    /// Remove every expense entry
    Clear,
}

#[derive(Subcommand)]
pub enum DriverAction {
    /// List drivers with pay rates and aliases
    List,

    /// Add a driver to the roster
    Add { name: String },

    /// Set per-mile pay rate
    PayRate { name: String, rate: f64 },

    /// Add an alternate spelling seen on imports
    Alias { name: String, alias: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dashboard_flags() {
        let cli = Cli::try_parse_from([
            "rigby", "dashboard", "--period", "q1", "--as-of", "2024-03-31", "-d", "Dana",
        ])
        .unwrap();
        match cli.command {
            Commands::Dashboard {
                period,
                as_of,
                driver,
                factoring_rate,
                export,
            } => {
                assert_eq!(period, Some(Period::Q1));
                assert_eq!(as_of, NaiveDate::from_ymd_opt(2024, 3, 31));
                assert_eq!(driver.as_deref(), Some("Dana"));
                assert_eq!(factoring_rate, None);
                assert!(export.is_none());
            }
            _ => panic!("expected dashboard"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rigby", "driver", "list", "--format", "json", "-v"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Driver {
                action: DriverAction::List
            }
        ));
    }

    #[test]
    fn test_expense_category_by_label() {
        let cli = Cli::try_parse_from(["rigby", "expense", "set", "Dana", "G/A", "120"]).unwrap();
        match cli.command {
            Commands::Expense {
                action:
                    ExpenseAction::Set {
                        driver,
                        category,
                        amount,
                    },
            } => {
                assert_eq!(driver, "Dana");
                assert_eq!(category, ExpenseCategory::GeneralAdmin);
                assert_eq!(amount, 120.0);
            }
            _ => panic!("expected expense set"),
        }
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["rigby", "dashboard", "--period", "q5"]).is_err());
        assert!(Cli::try_parse_from(["rigby", "expense", "set", "Dana", "parking", "5"]).is_err());
        assert!(Cli::try_parse_from(["rigby", "load", "delete", "abc"]).is_err());
    }

    #[test]
    fn test_from_json_conflicts_with_fields() {
        let result =
            Cli::try_parse_from(["rigby", "fleet", "set", "--trucks", "3", "--from-json", "f.json"]);
        assert!(result.is_err());
        let cli = Cli::try_parse_from(["rigby", "fleet", "set", "--from-json", "f.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Fleet {
                action: FleetAction::Set {
                    from_json: Some(_),
                    trucks: None,
                    ..
                }
            }
        ));
    }

    #[test]
    fn test_config_flags() {
        let cli =
            Cli::try_parse_from(["rigby", "config", "--set-period", "q3", "--set-output", "json"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                set_period: Some(Period::Q3),
                set_output: Some(OutputFormat::Json),
                reset: false,
                ..
            }
        ));
    }
}
