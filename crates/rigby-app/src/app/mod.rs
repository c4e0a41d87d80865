//! Use cases built on the domain engine and the repositories

pub mod dashboard_service;
pub mod fleet_service;
pub mod import_service;
pub mod ledger_service;
pub mod roster_service;

pub use dashboard_service::{build_dashboard, Dashboard, DashboardOptions};
pub use fleet_service::{fleet_overview, update_fleet, update_fleet_from_json, FleetOverview};
pub use import_service::{
    delete_batch, import_expenses, import_loads, list_batches, BatchDeletion, ImportOutcome,
};
pub use ledger_service::{clear_expenses, delete_load, edit_load, reassign_load, set_expense};
pub use roster_service::{add_alias, add_driver, list_drivers, set_pay_rate};
