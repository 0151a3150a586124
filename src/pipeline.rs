//! End to end batch run
//!
//! Reads the three input tables, validates the batch, and only then
//! creates the two output files. A fatal input error therefore leaves
//! no partial output behind.

use crate::core::BatchProcessor;
use crate::io::{
    read_bin_mappings, read_transactions, read_users, write_balances_csv, write_events_csv,
};
use crate::types::ProcessingError;
use std::fs::File;
use std::path::PathBuf;

/// Input and output file locations for one batch run
pub struct PipelinePaths {
    pub users: PathBuf,
    pub transactions: PathBuf,
    pub bin_mappings: PathBuf,
    pub balances_out: PathBuf,
    pub events_out: PathBuf,
}

/// Run a full batch: read inputs, validate, write balances and events
pub fn run(paths: &PipelinePaths) -> Result<(), ProcessingError> {
    let users = read_users(&paths.users)?;
    let transactions = read_transactions(&paths.transactions)?;
    let bin_mappings = read_bin_mappings(&paths.bin_mappings)?;

    let mut processor = BatchProcessor::new(users, bin_mappings);
    let events = processor.process(&transactions);

    let mut balances_file = File::create(&paths.balances_out)?;
    write_balances_csv(processor.users(), &mut balances_file)?;

    let mut events_file = File::create(&paths.events_out)?;
    write_events_csv(&events, &mut events_file)?;

    Ok(())
}
