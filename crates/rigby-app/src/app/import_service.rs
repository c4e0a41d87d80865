//! Import Service - CSV uploads tracked as deletable batches
//!
//! Every imported file becomes an [`ImportBatch`] keyed by the SHA-256 of its
//! contents. The same file cannot be imported twice, and deleting a batch
//! removes every load or expense line it created.

use std::path::Path;

use chrono::Utc;
use rigby_domain::model::{BatchKind, DriverRoster, ImportBatch};
use rigby_domain::repository::{
    BatchRepository, DriverRepository, ExpenseRepository, LoadRepository,
};
use rigby_infra::csv_import::{parse_expenses, parse_loads, ImportSource};
use rigby_types::{Error, Result};
use serde::Serialize;

/// What an import produced
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub batch: ImportBatch,
    /// Payment rows left out of an expense import
    pub skipped: usize,
    pub payment_total: f64,
}

/// Result of deleting a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchDeletion {
    pub batch: ImportBatch,
    pub records_removed: usize,
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

fn ensure_new_batch(batches: &impl BatchRepository, batch_id: &str) -> Result<()> {
    let existing = batches.find_by_id(batch_id)?;
    if let Some(batch) = existing.filter(|b| b.id == batch_id) {
        return Err(Error::DuplicateBatch(format!(
            "{} ({}, imported {})",
            batch.source,
            batch.short_id(),
            batch.imported_at.format("%Y-%m-%d %H:%M")
        )));
    }
    Ok(())
}

fn record_batch(
    batches: &impl BatchRepository,
    batch_id: String,
    kind: BatchKind,
    path: &Path,
    record_count: usize,
) -> Result<ImportBatch> {
    let batch = ImportBatch {
        id: batch_id,
        kind,
        source: source_name(path),
        imported_at: Utc::now(),
        record_count,
    };
    batches.save(&batch)?;
    Ok(batch)
}

/// Import loads from a CSV file
pub fn import_loads(
    loads: &impl LoadRepository,
    drivers: &impl DriverRepository,
    batches: &impl BatchRepository,
    path: &Path,
) -> Result<ImportOutcome> {
    let source = ImportSource::read(path)?;
    ensure_new_batch(batches, &source.batch_id)?;

    let mut parsed = parse_loads(&source.content, Some(&source.batch_id))?;
    if parsed.is_empty() {
        return Err(Error::Import(format!("no loads found in {}", path.display())));
    }

    let roster = DriverRoster::new(drivers.find_all()?);
    for load in &mut parsed {
        load.driver_name = roster.resolve(&load.driver_name);
    }

    let ids = loads.insert_many(parsed)?;
    let batch = record_batch(batches, source.batch_id, BatchKind::Loads, path, ids.len())?;
    tracing::info!(batch = batch.short_id(), loads = ids.len(), source = %batch.source, "loads imported");

    Ok(ImportOutcome {
        batch,
        skipped: 0,
        payment_total: 0.0,
    })
}

/// Import expense lines from a CSV file; payment rows are skipped
pub fn import_expenses(
    expenses: &impl ExpenseRepository,
    drivers: &impl DriverRepository,
    batches: &impl BatchRepository,
    path: &Path,
) -> Result<ImportOutcome> {
    let source = ImportSource::read(path)?;
    ensure_new_batch(batches, &source.batch_id)?;

    let mut parsed = parse_expenses(&source.content, Some(&source.batch_id))?;
    if parsed.entries.is_empty() {
        return Err(Error::Import(format!(
            "no expenses found in {} ({} payment rows skipped)",
            path.display(),
            parsed.skipped
        )));
    }

    let roster = DriverRoster::new(drivers.find_all()?);
    for entry in &mut parsed.entries {
        entry.driver_name = roster.resolve(&entry.driver_name);
    }

    let count = expenses.insert_many(parsed.entries)?;
    let batch = record_batch(batches, source.batch_id, BatchKind::Expenses, path, count)?;
    if parsed.skipped > 0 {
        tracing::warn!(
            skipped = parsed.skipped,
            total = parsed.payment_total,
            "payment rows skipped"
        );
    }
    tracing::info!(batch = batch.short_id(), expenses = count, source = %batch.source, "expenses imported");

    Ok(ImportOutcome {
        batch,
        skipped: parsed.skipped,
        payment_total: parsed.payment_total,
    })
}

/// All import batches, newest first
pub fn list_batches(batches: &impl BatchRepository) -> Result<Vec<ImportBatch>> {
    batches.find_all()
}

/// Delete a batch (full id or unique prefix) and every record it created
pub fn delete_batch(
    loads: &impl LoadRepository,
    expenses: &impl ExpenseRepository,
    batches: &impl BatchRepository,
    id: &str,
) -> Result<BatchDeletion> {
    let batch = batches
        .find_by_id(id)?
        .ok_or_else(|| Error::NotFound(format!("batch {}", id)))?;

    let records_removed = match batch.kind {
        BatchKind::Loads => loads.delete_batch(&batch.id)?,
        BatchKind::Expenses => expenses.delete_batch(&batch.id)?,
    };
    batches.delete(&batch.id)?;
    tracing::info!(batch = batch.short_id(), records_removed, "batch deleted");

    Ok(BatchDeletion {
        batch,
        records_removed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::Stores;
    use rigby_domain::model::DriverProfile;
    use std::fs;
    use tempfile::tempdir;

    const LOADS_CSV: &str = "\
load_number,driver,gross_amount,miles,pickup_date
RC-1,Dana Ruiz,2000,800,2024-01-05
RC-2,D. Ruiz,1500,600,2024-01-09
";

    const EXPENSES_CSV: &str = "\
driver,category,amount,date
Dana Ruiz,fuel,300,2024-01-06
Dana Ruiz,fuel,-120,2024-01-07
";

    fn setup() -> (tempfile::TempDir, Stores) {
        let dir = tempdir().unwrap();
        let stores = Stores::open_at(dir.path().join("data")).unwrap();
        let mut dana = DriverProfile::new("Dana Ruiz");
        dana.aliases.push("D. Ruiz".to_string());
        stores.drivers.save(&dana).unwrap();
        (dir, stores)
    }

    #[test]
    fn test_import_loads_resolves_aliases() {
        let (dir, stores) = setup();
        let path = dir.path().join("ratecons.csv");
        fs::write(&path, LOADS_CSV).unwrap();

        let outcome = import_loads(&stores.loads, &stores.drivers, &stores.batches, &path).unwrap();
        assert_eq!(outcome.batch.record_count, 2);
        assert_eq!(outcome.batch.kind, BatchKind::Loads);
        assert_eq!(outcome.batch.source, "ratecons.csv");
        assert_eq!(stores.loads.find_by_driver("Dana Ruiz").unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_import_rejected() {
        let (dir, stores) = setup();
        let path = dir.path().join("ratecons.csv");
        fs::write(&path, LOADS_CSV).unwrap();

        import_loads(&stores.loads, &stores.drivers, &stores.batches, &path).unwrap();
        let again = import_loads(&stores.loads, &stores.drivers, &stores.batches, &path);
        assert!(matches!(again, Err(Error::DuplicateBatch(_))));
        assert_eq!(stores.loads.find_all().unwrap().len(), 2);
    }

    #[test]
    fn test_import_expenses_skips_payments() {
        let (dir, stores) = setup();
        let path = dir.path().join("expenses.csv");
        fs::write(&path, EXPENSES_CSV).unwrap();

        let outcome =
            import_expenses(&stores.expenses, &stores.drivers, &stores.batches, &path).unwrap();
        assert_eq!(outcome.batch.record_count, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.payment_total, 120.0);
    }

    #[test]
    fn test_bad_row_imports_nothing() {
        let (dir, stores) = setup();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "driver,category,amount\nDana Ruiz,fuel,10\nDana Ruiz,snacks,5\n").unwrap();

        let result = import_expenses(&stores.expenses, &stores.drivers, &stores.batches, &path);
        match result {
            Err(Error::Import(msg)) => assert!(msg.contains("row 3")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(stores.expenses.find_all().unwrap().is_empty());
        assert!(stores.batches.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_batch_by_prefix() {
        let (dir, stores) = setup();
        let loads_path = dir.path().join("ratecons.csv");
        let expenses_path = dir.path().join("expenses.csv");
        fs::write(&loads_path, LOADS_CSV).unwrap();
        fs::write(&expenses_path, EXPENSES_CSV).unwrap();

        let loads_batch =
            import_loads(&stores.loads, &stores.drivers, &stores.batches, &loads_path).unwrap();
        import_expenses(&stores.expenses, &stores.drivers, &stores.batches, &expenses_path)
            .unwrap();

        let deleted = delete_batch(
            &stores.loads,
            &stores.expenses,
            &stores.batches,
            loads_batch.batch.short_id(),
        )
        .unwrap();
        assert_eq!(deleted.records_removed, 2);
        assert!(stores.loads.find_all().unwrap().is_empty());
        assert_eq!(stores.expenses.find_all().unwrap().len(), 1);
        assert_eq!(list_batches(&stores.batches).unwrap().len(), 1);

        // the same file can be imported again once its batch is gone
        import_loads(&stores.loads, &stores.drivers, &stores.batches, &loads_path).unwrap();
    }

    #[test]
    fn test_delete_unknown_batch() {
        let (_dir, stores) = setup();
        let result = delete_batch(&stores.loads, &stores.expenses, &stores.batches, "ffff");
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_manual_amount_leaves_batch_intact() {
        let (dir, stores) = setup();
        let path = dir.path().join("standing.csv");
        fs::write(&path, "driver,category,amount\nDana Ruiz,insurance,800\n").unwrap();
        let outcome =
            import_expenses(&stores.expenses, &stores.drivers, &stores.batches, &path).unwrap();

        crate::app::set_expense(
            &stores.expenses,
            &stores.drivers,
            "Dana Ruiz",
            rigby_domain::model::ExpenseCategory::Insurance,
            300.0,
        )
        .unwrap();

        let deleted = delete_batch(
            &stores.loads,
            &stores.expenses,
            &stores.batches,
            &outcome.batch.id,
        )
        .unwrap();
        assert_eq!(deleted.records_removed, outcome.batch.record_count);
        let remaining = stores.expenses.find_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].amount, 300.0);
    }
}
