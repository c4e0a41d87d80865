//! Infrastructure layer - file repositories, roster loader, CSV import

pub mod csv_import;
pub mod driver_roster_loader;
pub mod persistence;
