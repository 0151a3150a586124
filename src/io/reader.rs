//! CSV readers for the three input tables
//!
//! Each reader loads a whole table into memory, in file order. The header
//! row is skipped by the CSV reader; every data row must convert cleanly
//! or the run aborts — a malformed line is a fatal input error, never a
//! business decline.

use crate::io::csv_format::{
    convert_bin_record, convert_transaction_record, convert_user_record, BinRecord,
    TransactionRecord, UserRecord,
};
use crate::types::{BinMapping, ProcessingError, Transaction, User};
use csv::{Reader, ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Read the users reference table, preserving file order
pub fn read_users(path: &Path) -> Result<Vec<User>, ProcessingError> {
    let mut reader = open_reader(path)?;
    let mut users = Vec::new();
    for result in reader.deserialize::<UserRecord>() {
        users.push(convert_user_record(result?)?);
    }
    Ok(users)
}

/// Read the transaction batch, preserving file order
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>, ProcessingError> {
    let mut reader = open_reader(path)?;
    let mut transactions = Vec::new();
    for result in reader.deserialize::<TransactionRecord>() {
        transactions.push(convert_transaction_record(result?)?);
    }
    Ok(transactions)
}

/// Read the BIN mapping table, preserving file order
pub fn read_bin_mappings(path: &Path) -> Result<Vec<BinMapping>, ProcessingError> {
    let mut reader = open_reader(path)?;
    let mut mappings = Vec::new();
    for result in reader.deserialize::<BinRecord>() {
        mappings.push(convert_bin_record(result?)?);
    }
    Ok(mappings)
}

/// Open a CSV reader over the file at `path`
///
/// Fields are whitespace-trimmed; the column count is strict, so a short
/// or long row surfaces as a parse error with its line number.
fn open_reader(path: &Path) -> Result<Reader<File>, ProcessingError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ProcessingError::file_not_found(&path.display().to_string())
        } else {
            ProcessingError::from(e)
        }
    })?;

    Ok(ReaderBuilder::new().trim(Trim::All).from_reader(file))
}
