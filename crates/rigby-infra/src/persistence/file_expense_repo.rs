//! File-based expense repository implementation

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use rigby_domain::model::ExpenseEntry;
use rigby_domain::repository::ExpenseRepository;
use rigby_types::{Error, Result};

use super::{read_json_or_default, write_json};

/// File-based implementation of ExpenseRepository
///
/// Stores expense lines as a JSON array in `expenses.json`.
pub struct FileExpenseRepository {
    store_path: PathBuf,
    entries: RefCell<Vec<ExpenseEntry>>,
}

impl FileExpenseRepository {
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("expenses.json");
        let entries = read_json_or_default(&store_path)?;
        Ok(Self {
            store_path,
            entries: RefCell::new(entries),
        })
    }

    fn persist(&self) -> Result<()> {
        write_json(&self.store_path, &*self.entries.borrow())
    }

    fn next_id(&self) -> u64 {
        self.entries
            .borrow()
            .iter()
            .map(|e| e.id)
            .max()
            .map(|id| id + 1)
            .unwrap_or(1)
    }

    fn remove_where(&self, predicate: impl Fn(&ExpenseEntry) -> bool) -> Result<usize> {
        let removed = {
            let mut entries = self.entries.borrow_mut();
            let before = entries.len();
            entries.retain(|e| !predicate(e));
            before - entries.len()
        };
        if removed > 0 {
            self.persist()?;
        }
        Ok(removed)
    }
}

impl ExpenseRepository for FileExpenseRepository {
    fn find_all(&self) -> std::result::Result<Vec<ExpenseEntry>, Error> {
        Ok(self.entries.borrow().clone())
    }

    fn find_by_driver(&self, driver_name: &str) -> std::result::Result<Vec<ExpenseEntry>, Error> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.driver_name == driver_name)
            .cloned()
            .collect())
    }

    fn insert_many(&self, new_entries: Vec<ExpenseEntry>) -> std::result::Result<usize, Error> {
        let count = new_entries.len();
        let mut next_id = self.next_id();
        {
            let mut entries = self.entries.borrow_mut();
            for mut entry in new_entries {
                entry.id = next_id;
                next_id += 1;
                entries.push(entry);
            }
        }
        self.persist()?;
        Ok(count)
    }

    fn set_amount(
        &self,
        driver_name: &str,
        category: &str,
        amount: f64,
    ) -> std::result::Result<(), Error> {
        let id = self.next_id();
        {
            let mut entries = self.entries.borrow_mut();
            // imported lines stay with their batch
            entries.retain(|e| {
                !(e.driver_name == driver_name
                    && e.category == category
                    && e.date.is_none()
                    && e.batch_id.is_none())
            });
            entries.push(ExpenseEntry {
                id,
                driver_name: driver_name.to_string(),
                category: category.to_string(),
                amount,
                date: None,
                batch_id: None,
            });
        }
        self.persist()
    }

    fn delete_batch(&self, batch_id: &str) -> std::result::Result<usize, Error> {
        self.remove_where(|e| e.batch_id.as_deref() == Some(batch_id))
    }

    fn delete_all(&self) -> std::result::Result<usize, Error> {
        self.remove_where(|_| true)
    }
}
