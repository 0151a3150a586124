//! Error types for the transaction validator
//!
//! This module defines the fatal error class of the system: anything that
//! prevents the batch from being read or the result tables from being
//! written. Business-rule failures are *not* errors — they are recorded as
//! DECLINED events and never abort the run.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, wrong column count, etc.
//! - **Field Errors**: A field that cannot be converted to its domain type
//!   (non-numeric balance, unparseable BIN range, etc.)

use thiserror::Error;

/// Main error type for the transaction validator
///
/// Every variant is fatal: the run aborts with no partial output.
/// Each variant includes relevant context to help diagnose the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A field could not be converted to its domain type
    ///
    /// Raised when a record deserializes as CSV but carries a value the
    /// data model cannot represent (e.g. a balance that is not a number).
    #[error("Invalid value '{value}' for field '{field}' in {table}")]
    InvalidField {
        /// Name of the table being read (users, transactions, bin mappings)
        table: String,
        /// Name of the offending field
        field: String,
        /// The raw value that failed to convert
        value: String,
    },
}

// Conversion from io::Error to ProcessingError
impl From<std::io::Error> for ProcessingError {
    fn from(error: std::io::Error) -> Self {
        ProcessingError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to ProcessingError
impl From<csv::Error> for ProcessingError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        ProcessingError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl ProcessingError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        ProcessingError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create an InvalidField error
    pub fn invalid_field(table: &str, field: &str, value: &str) -> Self {
        ProcessingError::InvalidField {
            table: table.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}
