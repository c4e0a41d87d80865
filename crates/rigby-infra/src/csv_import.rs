//! CSV import for loads (rate confirmations) and expense lines
//!
//! Columns are located by header name, so optional columns may be omitted or
//! reordered. Row numbers in errors are 1-based and include the header row.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rigby_domain::model::{ExpenseCategory, ExpenseEntry, Load};
use rigby_types::Error;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvImportError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid date format in row {row}: {value}")]
    InvalidDate { row: usize, value: String },

    #[error("Invalid number format in row {row}, column {column}: {value}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Empty {column} in row {row}")]
    EmptyField { row: usize, column: String },

    #[error("Unknown expense category in row {row}: {value}")]
    UnknownCategory { row: usize, value: String },

    #[error("Negative gross amount in row {row}: {value}")]
    NegativeGross { row: usize, value: f64 },

    #[error("File is not valid UTF-8 (line {line})")]
    InvalidEncoding { line: usize },
}

impl From<CsvImportError> for Error {
    fn from(e: CsvImportError) -> Self {
        match e {
            CsvImportError::IoError(io) => Error::Io(io),
            other => Error::Import(other.to_string()),
        }
    }
}

/// Result of parsing an expense file
#[derive(Debug, Clone, Default)]
pub struct ExpenseImport {
    pub entries: Vec<ExpenseEntry>,
    /// Number of negative (payment / credit) rows skipped
    pub skipped: usize,
    /// Sum of the skipped rows' absolute amounts
    pub payment_total: f64,
}

/// File contents plus the batch id derived from them
pub struct ImportSource {
    pub content: String,
    pub batch_id: String,
}

impl ImportSource {
    pub fn read(path: &Path) -> Result<Self, CsvImportError> {
        let bytes = fs::read(path)?;
        let batch_id = content_hash(&bytes);
        let content = String::from_utf8(bytes).map_err(|e| {
            let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
            CsvImportError::InvalidEncoding {
                line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
            }
        })?;
        Ok(Self { content, batch_id })
    }
}

/// Hex SHA-256 of raw file contents, used as the import batch id
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

struct Columns {
    headers: Vec<String>,
}

impl Columns {
    fn new(headers: &csv::StringRecord) -> Self {
        Self {
            headers: headers
                .iter()
                .map(|h| h.trim().to_lowercase().replace(' ', "_"))
                .collect(),
        }
    }

    fn find(&self, names: &[&str]) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| names.iter().any(|n| h == n))
    }

    fn require(&self, names: &[&str]) -> Result<usize, CsvImportError> {
        self.find(names)
            .ok_or_else(|| CsvImportError::MissingColumn(names[0].to_string()))
    }
}

fn field(record: &csv::StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).unwrap_or("")
}

fn reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes())
}

/// Parse loads from CSV text
///
/// Expected header (bracketed columns optional):
/// load_number,driver,gross_amount,[net_amount],miles,[pickup_location],
/// [dropoff_location],[pickup_date],[dropoff_date]
pub fn parse_loads(content: &str, batch_id: Option<&str>) -> Result<Vec<Load>, CsvImportError> {
    let mut reader = reader(content);
    let columns = Columns::new(reader.headers()?);

    let load_number = columns.require(&["load_number", "load", "load_#"])?;
    let driver = columns.require(&["driver", "driver_name"])?;
    let gross = columns.require(&["gross_amount", "gross", "rate"])?;
    let miles = columns.require(&["miles", "total_miles"])?;
    let net = columns.find(&["net_amount", "net"]);
    let pickup = columns.find(&["pickup_location", "pickup", "origin"]);
    let dropoff = columns.find(&["dropoff_location", "dropoff", "destination"]);
    let pickup_date = columns.find(&["pickup_date"]);
    let dropoff_date = columns.find(&["dropoff_date", "delivery_date"]);

    let mut loads = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 2;

        let driver_name = field(&record, Some(driver)).to_string();
        if driver_name.is_empty() {
            return Err(CsvImportError::EmptyField {
                row,
                column: "driver".to_string(),
            });
        }

        let gross_amount = parse_f64(field(&record, Some(gross)), row, "gross_amount")?;
        if gross_amount < 0.0 {
            return Err(CsvImportError::NegativeGross {
                row,
                value: gross_amount,
            });
        }
        let net_raw = field(&record, net);
        let net_amount = if net_raw.is_empty() {
            gross_amount
        } else {
            parse_f64(net_raw, row, "net_amount")?
        };

        loads.push(Load {
            id: 0,
            load_number: field(&record, Some(load_number)).to_string(),
            driver_name,
            gross_amount,
            net_amount,
            miles: parse_u32(field(&record, Some(miles)), row, "miles")?,
            pickup_location: field(&record, pickup).to_string(),
            dropoff_location: field(&record, dropoff).to_string(),
            pickup_date: parse_optional_date(field(&record, pickup_date), row)?,
            dropoff_date: parse_optional_date(field(&record, dropoff_date), row)?,
            batch_id: batch_id.map(str::to_string),
        });
    }

    Ok(loads)
}

/// Parse expense lines from CSV text
///
/// Expected header: driver,category,amount,[date]. Negative amounts are
/// payments and are skipped.
pub fn parse_expenses(
    content: &str,
    batch_id: Option<&str>,
) -> Result<ExpenseImport, CsvImportError> {
    let mut reader = reader(content);
    let columns = Columns::new(reader.headers()?);

    let driver = columns.require(&["driver", "driver_name"])?;
    let category = columns.require(&["category", "type"])?;
    let amount = columns.require(&["amount"])?;
    let date = columns.find(&["date"]);

    let mut import = ExpenseImport::default();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = row_idx + 2;

        let value = parse_f64(field(&record, Some(amount)), row, "amount")?;
        if value < 0.0 {
            import.skipped += 1;
            import.payment_total += value.abs();
            continue;
        }

        let driver_name = field(&record, Some(driver)).to_string();
        if driver_name.is_empty() {
            return Err(CsvImportError::EmptyField {
                row,
                column: "driver".to_string(),
            });
        }

        let raw_category = field(&record, Some(category));
        let parsed: ExpenseCategory =
            raw_category
                .parse()
                .map_err(|_| CsvImportError::UnknownCategory {
                    row,
                    value: raw_category.to_string(),
                })?;

        import.entries.push(ExpenseEntry {
            id: 0,
            driver_name,
            category: parsed.key().to_string(),
            amount: value,
            date: parse_optional_date(field(&record, date), row)?,
            batch_id: batch_id.map(str::to_string),
        });
    }

    Ok(import)
}

fn parse_optional_date(s: &str, row: usize) -> Result<Option<NaiveDate>, CsvImportError> {
    if s.is_empty() {
        return Ok(None);
    }
    let formats = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];
    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(Some(date));
        }
    }
    Err(CsvImportError::InvalidDate {
        row,
        value: s.to_string(),
    })
}

fn parse_f64(s: &str, row: usize, column: &str) -> Result<f64, CsvImportError> {
    let cleaned = s.trim().replace([',', '$'], "");
    let value: f64 = cleaned.parse().map_err(|_| CsvImportError::InvalidNumber {
        row,
        column: column.to_string(),
        value: s.to_string(),
    })?;
    if !value.is_finite() {
        return Err(CsvImportError::InvalidNumber {
            row,
            column: column.to_string(),
            value: s.to_string(),
        });
    }
    Ok(value)
}

fn parse_u32(s: &str, row: usize, column: &str) -> Result<u32, CsvImportError> {
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return Ok(0);
    }
    cleaned.parse().map_err(|_| CsvImportError::InvalidNumber {
        row,
        column: column.to_string(),
        value: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOADS_CSV: &str = "\
load_number,driver,gross_amount,miles,pickup_location,dropoff_location,pickup_date
RC-1001,Marcus Hill,\"2,450.00\",812,Dallas TX,Memphis TN,2024-02-03
RC-1002,Dana Ruiz,1800,640,Atlanta GA,Charlotte NC,03/15/2024
RC-1003,Dana Ruiz,950,0,,,
";

    #[test]
    fn test_parse_loads() {
        let loads = parse_loads(LOADS_CSV, Some("b1")).unwrap();
        assert_eq!(loads.len(), 3);

        assert_eq!(loads[0].gross_amount, 2450.0);
        assert_eq!(loads[0].net_amount, 2450.0);
        assert_eq!(loads[0].miles, 812);
        assert_eq!(loads[0].pickup_date, NaiveDate::from_ymd_opt(2024, 2, 3));
        assert_eq!(loads[1].pickup_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(loads[2].pickup_date, None);
        assert_eq!(loads[2].miles, 0);
        assert!(loads.iter().all(|l| l.batch_id.as_deref() == Some("b1")));
    }

    #[test]
    fn test_loads_missing_column() {
        let err = parse_loads("load_number,driver,miles\nA,B,1\n", None).unwrap_err();
        assert!(matches!(err, CsvImportError::MissingColumn(c) if c == "gross_amount"));
    }

    #[test]
    fn test_loads_bad_number_reports_row() {
        let csv = "load_number,driver,gross_amount,miles\nA,Dana,100,10\nB,Dana,abc,10\n";
        match parse_loads(csv, None).unwrap_err() {
            CsvImportError::InvalidNumber { row, column, .. } => {
                assert_eq!(row, 3);
                assert_eq!(column, "gross_amount");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_loads_negative_gross_rejected() {
        let csv = "load_number,driver,gross_amount,miles\nA,Dana,-5,10\n";
        assert!(matches!(
            parse_loads(csv, None).unwrap_err(),
            CsvImportError::NegativeGross { row: 2, .. }
        ));
    }

    #[test]
    fn test_parse_expenses_skips_payments() {
        let csv = "\
driver,category,amount,date
Dana Ruiz,Fuel,412.50,2024-01-09
Dana Ruiz,tolls,38,
Dana Ruiz,fuel,-200,2024-01-10
Marcus Hill,Insurance,850,
Marcus Hill,insurance,-50,
";
        let import = parse_expenses(csv, Some("b2")).unwrap();
        assert_eq!(import.entries.len(), 3);
        assert_eq!(import.skipped, 2);
        assert_eq!(import.payment_total, 250.0);
        assert_eq!(import.entries[0].category, "fuel");
        assert_eq!(import.entries[1].category, "toll");
        assert_eq!(import.entries[1].date, None);
        assert_eq!(import.entries[2].category, "insurance");
    }

    #[test]
    fn test_parse_expenses_unknown_category() {
        let csv = "driver,category,amount\nDana,fuel,1\nDana,snacks,2\n";
        match parse_expenses(csv, None).unwrap_err() {
            CsvImportError::UnknownCategory { row, value } => {
                assert_eq!(row, 3);
                assert_eq!(value, "snacks");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_import_error_converts() {
        let err: Error = CsvImportError::MissingColumn("amount".to_string()).into();
        assert!(matches!(err, Error::Import(msg) if msg.contains("amount")));
    }

    #[test]
    fn test_content_hash_is_stable() {
        let a = content_hash(b"driver,category,amount\n");
        let b = content_hash(b"driver,category,amount\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, content_hash(b"other"));
    }

    #[test]
    fn test_non_utf8_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        let mut bytes = b"driver,category,amount\n".to_vec();
        bytes.extend_from_slice(b"Jos\xe9 Pe\xf1a,fuel,100\n");
        std::fs::write(&path, bytes).unwrap();

        match ImportSource::read(&path) {
            Err(CsvImportError::InvalidEncoding { line }) => assert_eq!(line, 2),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("non-UTF-8 file was accepted"),
        }
    }

    #[test]
    fn test_utf8_source_hashes_raw_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loads.csv");
        std::fs::write(&path, LOADS_CSV).unwrap();

        let source = ImportSource::read(&path).unwrap();
        assert_eq!(source.content, LOADS_CSV);
        assert_eq!(source.batch_id, content_hash(LOADS_CSV.as_bytes()));
    }
}
