//! Repository adapters for persistence layer

use std::path::PathBuf;

use rigby_infra::persistence::{
    FileBatchRepository, FileDriverRepository, FileExpenseRepository, FileFleetRepository,
    FileLoadRepository,
};
use rigby_types::Result;

use crate::config::Config;

/// Every file repository over one data directory
pub struct Stores {
    pub fleet: FileFleetRepository,
    pub loads: FileLoadRepository,
    pub expenses: FileExpenseRepository,
    pub drivers: FileDriverRepository,
    pub batches: FileBatchRepository,
}

impl Stores {
    /// Open all stores in the configured data directory
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_at(config.data_dir()?)
    }

    /// Open all stores at a custom directory
    pub fn open_at(data_dir: PathBuf) -> Result<Self> {
        tracing::debug!(dir = %data_dir.display(), "opening data stores");
        Ok(Self {
            fleet: FileFleetRepository::open(data_dir.clone())?,
            loads: FileLoadRepository::open(data_dir.clone())?,
            expenses: FileExpenseRepository::open(data_dir.clone())?,
            drivers: FileDriverRepository::open(data_dir.clone())?,
            batches: FileBatchRepository::open(data_dir)?,
        })
    }
}
