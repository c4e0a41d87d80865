//! Persistence implementations
//!
//! File-based implementations of the domain repository traits. Each store is a
//! single JSON (or TOML) file in the data directory, loaded on open and
//! rewritten on every change.

mod file_batch_repo;
mod file_driver_repo;
mod file_expense_repo;
mod file_fleet_repo;
mod file_load_repo;

pub use file_batch_repo::FileBatchRepository;
pub use file_driver_repo::FileDriverRepository;
pub use file_expense_repo::FileExpenseRepository;
pub use file_fleet_repo::FileFleetRepository;
pub use file_load_repo::FileLoadRepository;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use rigby_types::Result;

/// Read a JSON store, or the default value when the file does not exist yet
pub(crate) fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Rewrite a JSON store; errors from the final flush are reported too
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
