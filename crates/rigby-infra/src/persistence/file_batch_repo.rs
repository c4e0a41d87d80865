//! File-based import batch repository

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use rigby_domain::model::ImportBatch;
use rigby_domain::repository::BatchRepository;
use rigby_types::{Error, Result};

use super::{read_json_or_default, write_json};

/// Import batches keyed by content hash in `batches.json`
pub struct FileBatchRepository {
    store_path: PathBuf,
    batches: RefCell<HashMap<String, ImportBatch>>,
}

impl FileBatchRepository {
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("batches.json");
        let batches = read_json_or_default(&store_path)?;
        Ok(Self {
            store_path,
            batches: RefCell::new(batches),
        })
    }

    fn persist(&self) -> Result<()> {
        write_json(&self.store_path, &*self.batches.borrow())
    }
}

impl BatchRepository for FileBatchRepository {
    fn find_all(&self) -> std::result::Result<Vec<ImportBatch>, Error> {
        let mut batches: Vec<_> = self.batches.borrow().values().cloned().collect();
        batches.sort_by(|a, b| b.imported_at.cmp(&a.imported_at));
        Ok(batches)
    }

    fn find_by_id(&self, id: &str) -> std::result::Result<Option<ImportBatch>, Error> {
        let batches = self.batches.borrow();
        if let Some(batch) = batches.get(id) {
            return Ok(Some(batch.clone()));
        }
        let mut matches = batches.values().filter(|b| b.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(batch), None) if !id.is_empty() => Ok(Some(batch.clone())),
            (Some(_), Some(_)) => Err(Error::NotFound(format!("batch prefix {} is ambiguous", id))),
            _ => Ok(None),
        }
    }

    fn save(&self, batch: &ImportBatch) -> std::result::Result<(), Error> {
        self.batches
            .borrow_mut()
            .insert(batch.id.clone(), batch.clone());
        self.persist()
    }

    fn delete(&self, id: &str) -> std::result::Result<bool, Error> {
        let removed = self.batches.borrow_mut().remove(id).is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rigby_domain::model::BatchKind;
    use tempfile::tempdir;

    fn batch(id: &str, day: u32) -> ImportBatch {
        ImportBatch {
            id: id.to_string(),
            kind: BatchKind::Loads,
            source: "ratecons.csv".to_string(),
            imported_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            record_count: 3,
        }
    }

    #[test]
    fn test_find_all_newest_first() {
        let dir = tempdir().unwrap();
        let repo = FileBatchRepository::open(dir.path().to_path_buf()).unwrap();
        repo.save(&batch("aaa111", 1)).unwrap();
        repo.save(&batch("bbb222", 5)).unwrap();
        let ids: Vec<_> = repo.find_all().unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["bbb222", "aaa111"]);
    }

    #[test]
    fn test_find_by_prefix() {
        let dir = tempdir().unwrap();
        let repo = FileBatchRepository::open(dir.path().to_path_buf()).unwrap();
        repo.save(&batch("abc123", 1)).unwrap();
        repo.save(&batch("abd456", 2)).unwrap();
        assert_eq!(repo.find_by_id("abc").unwrap().unwrap().id, "abc123");
        assert!(repo.find_by_id("ab").is_err());
        assert!(repo.find_by_id("zzz").unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let repo = FileBatchRepository::open(dir.path().to_path_buf()).unwrap();
        repo.save(&batch("abc123", 1)).unwrap();
        assert!(repo.delete("abc123").unwrap());
        assert!(!repo.delete("abc123").unwrap());
    }
}
