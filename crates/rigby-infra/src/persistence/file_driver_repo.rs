//! Driver roster repository backed by `drivers.toml`

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use rigby_domain::model::DriverProfile;
use rigby_domain::repository::DriverRepository;
use rigby_types::{Error, Result};

use crate::driver_roster_loader::{read_profiles, write_profiles};

pub struct FileDriverRepository {
    store_path: PathBuf,
    drivers: RefCell<Vec<DriverProfile>>,
}

impl FileDriverRepository {
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("drivers.toml");
        let drivers = read_profiles(&store_path)?;
        Ok(Self {
            store_path,
            drivers: RefCell::new(drivers),
        })
    }
}

impl DriverRepository for FileDriverRepository {
    fn find_all(&self) -> std::result::Result<Vec<DriverProfile>, Error> {
        Ok(self.drivers.borrow().clone())
    }

    fn find_by_name(&self, name: &str) -> std::result::Result<Option<DriverProfile>, Error> {
        Ok(self
            .drivers
            .borrow()
            .iter()
            .find(|d| d.answers_to(name))
            .cloned())
    }

    fn save(&self, driver: &DriverProfile) -> std::result::Result<(), Error> {
        {
            let mut drivers = self.drivers.borrow_mut();
            match drivers.iter_mut().find(|d| d.name == driver.name) {
                Some(existing) => *existing = driver.clone(),
                None => drivers.push(driver.clone()),
            }
        }
        write_profiles(&self.store_path, &self.drivers.borrow())?;
        tracing::debug!(driver = %driver.name, "driver roster saved");
        Ok(())
    }
}
