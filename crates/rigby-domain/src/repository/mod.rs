//! Repository trait definitions for data persistence

use crate::model::{DriverProfile, ExpenseEntry, FleetMetrics, ImportBatch, Load};
use rigby_types::Error;

/// Repository for the singleton fleet snapshot
pub trait FleetRepository {
    /// Load the snapshot; a fresh store yields the zero default
    fn load(&self) -> Result<FleetMetrics, Error>;

    /// Overwrite the snapshot
    fn save(&self, metrics: &FleetMetrics) -> Result<(), Error>;
}

/// Repository for loads
pub trait LoadRepository {
    /// Find all loads, ordered by id
    fn find_all(&self) -> Result<Vec<Load>, Error>;

    fn find_by_id(&self, id: u64) -> Result<Option<Load>, Error>;

    /// Find loads whose stored driver name matches exactly
    fn find_by_driver(&self, driver_name: &str) -> Result<Vec<Load>, Error>;

    /// Insert new loads, assigning ids; returns the assigned ids
    fn insert_many(&self, loads: Vec<Load>) -> Result<Vec<u64>, Error>;

    /// Replace an existing load; returns false if the id is unknown
    fn update(&self, load: &Load) -> Result<bool, Error>;

    fn delete(&self, id: u64) -> Result<bool, Error>;

    /// Delete every load created by a batch; returns the number removed
    fn delete_batch(&self, batch_id: &str) -> Result<usize, Error>;
}

/// Repository for expense entries
pub trait ExpenseRepository {
    fn find_all(&self) -> Result<Vec<ExpenseEntry>, Error>;

    fn find_by_driver(&self, driver_name: &str) -> Result<Vec<ExpenseEntry>, Error>;

    /// Insert new entries, assigning ids; returns the number inserted
    fn insert_many(&self, entries: Vec<ExpenseEntry>) -> Result<usize, Error>;

    /// Replace the manually set (undated, unbatched) entry for a driver and category
    fn set_amount(&self, driver_name: &str, category: &str, amount: f64) -> Result<(), Error>;

    fn delete_batch(&self, batch_id: &str) -> Result<usize, Error>;

    fn delete_all(&self) -> Result<usize, Error>;
}

/// Repository for the driver roster
pub trait DriverRepository {
    fn find_all(&self) -> Result<Vec<DriverProfile>, Error>;

    /// Find by name or alias
    fn find_by_name(&self, name: &str) -> Result<Option<DriverProfile>, Error>;

    /// Insert or replace a driver keyed by name
    fn save(&self, driver: &DriverProfile) -> Result<(), Error>;
}

/// Repository for import batches
pub trait BatchRepository {
    /// Find all batches, newest first
    fn find_all(&self) -> Result<Vec<ImportBatch>, Error>;

    /// Find by full id or unique id prefix
    fn find_by_id(&self, id: &str) -> Result<Option<ImportBatch>, Error>;

    fn save(&self, batch: &ImportBatch) -> Result<(), Error>;

    fn delete(&self, id: &str) -> Result<bool, Error>;
}
