//! File-based implementation of FleetRepository

use std::fs;
use std::path::PathBuf;

use rigby_domain::model::FleetMetrics;
use rigby_domain::repository::FleetRepository;
use rigby_types::{Error, Result};

use super::{read_json_or_default, write_json};

/// Fleet snapshot stored as `fleet.json`
pub struct FileFleetRepository {
    store_path: PathBuf,
}

impl FileFleetRepository {
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        Ok(Self {
            store_path: store_dir.join("fleet.json"),
        })
    }

    pub fn store_path(&self) -> &PathBuf {
        &self.store_path
    }
}

impl FleetRepository for FileFleetRepository {
    fn load(&self) -> std::result::Result<FleetMetrics, Error> {
        read_json_or_default(&self.store_path)
    }

    fn save(&self, metrics: &FleetMetrics) -> std::result::Result<(), Error> {
        write_json(&self.store_path, metrics)?;
        tracing::debug!(path = %self.store_path.display(), "fleet snapshot saved");
        Ok(())
    }
}
