//! File-based load repository implementation

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use rigby_domain::model::Load;
use rigby_domain::repository::LoadRepository;
use rigby_types::{Error, Result};

use super::{read_json_or_default, write_json};

/// File-based implementation of LoadRepository
///
/// Stores loads keyed by id in `loads.json`.
pub struct FileLoadRepository {
    store_path: PathBuf,
    loads: RefCell<BTreeMap<u64, Load>>,
}

impl FileLoadRepository {
    /// Create or load a load repository
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("loads.json");
        let loads = read_json_or_default(&store_path)?;
        Ok(Self {
            store_path,
            loads: RefCell::new(loads),
        })
    }

    fn persist(&self) -> Result<()> {
        write_json(&self.store_path, &*self.loads.borrow())
    }

    fn next_id(&self) -> u64 {
        self.loads
            .borrow()
            .keys()
            .next_back()
            .map(|id| id + 1)
            .unwrap_or(1)
    }
}

impl LoadRepository for FileLoadRepository {
    fn find_all(&self) -> std::result::Result<Vec<Load>, Error> {
        Ok(self.loads.borrow().values().cloned().collect())
    }

    fn find_by_id(&self, id: u64) -> std::result::Result<Option<Load>, Error> {
        Ok(self.loads.borrow().get(&id).cloned())
    }

    fn find_by_driver(&self, driver_name: &str) -> std::result::Result<Vec<Load>, Error> {
        Ok(self
            .loads
            .borrow()
            .values()
            .filter(|l| l.driver_name == driver_name)
            .cloned()
            .collect())
    }

    fn insert_many(&self, loads: Vec<Load>) -> std::result::Result<Vec<u64>, Error> {
        let mut next_id = self.next_id();
        let mut ids = Vec::with_capacity(loads.len());
        {
            let mut stored = self.loads.borrow_mut();
            for mut load in loads {
                load.id = next_id;
                ids.push(next_id);
                stored.insert(next_id, load);
                next_id += 1;
            }
        }
        self.persist()?;
        Ok(ids)
    }

    fn update(&self, load: &Load) -> std::result::Result<bool, Error> {
        let updated = match self.loads.borrow_mut().get_mut(&load.id) {
            Some(existing) => {
                *existing = load.clone();
                true
            }
            None => false,
        };
        if updated {
            self.persist()?;
        }
        Ok(updated)
    }

    fn delete(&self, id: u64) -> std::result::Result<bool, Error> {
        let removed = self.loads.borrow_mut().remove(&id).is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    fn delete_batch(&self, batch_id: &str) -> std::result::Result<usize, Error> {
        let removed = {
            let mut loads = self.loads.borrow_mut();
            let before = loads.len();
            loads.retain(|_, l| l.batch_id.as_deref() != Some(batch_id));
            before - loads.len()
        };
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }
}
