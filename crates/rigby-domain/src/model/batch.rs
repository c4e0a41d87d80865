use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of records an import batch produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchKind {
    Loads,
    Expenses,
}

impl std::fmt::Display for BatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchKind::Loads => write!(f, "loads"),
            BatchKind::Expenses => write!(f, "expenses"),
        }
    }
}

/// One CSV import; deleting it removes every record it created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportBatch {
    /// SHA-256 of the imported file contents
    pub id: String,
    pub kind: BatchKind,
    /// Source file name
    pub source: String,
    pub imported_at: DateTime<Utc>,
    pub record_count: usize,
}

impl ImportBatch {
    /// First 12 hex digits of the id, enough to address a batch on the CLI
    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(12)]
    }
}
