//! Error types for rigby

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Rejected user edits (fleet snapshot, load edits, expense amounts)
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: String, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    #[error("{field} must not be empty")]
    Empty { field: String },

    #[error("{field} '{value}' is already used by {owner}")]
    InUse {
        field: String,
        value: String,
        owner: String,
    },
}

impl ValidationError {
    /// Check that a monetary amount is finite and non-negative
    pub fn check_amount(field: &str, value: f64) -> std::result::Result<f64, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: field.to_string(),
            });
        }
        if value < 0.0 {
            return Err(ValidationError::Negative {
                field: field.to_string(),
                value,
            });
        }
        Ok(value)
    }

    /// Check that a text field has content
    pub fn check_non_empty(field: &str, value: &str) -> std::result::Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: field.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Batch already imported: {0}")]
    DuplicateBatch(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
