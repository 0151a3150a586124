//! Transaction Validator CLI
//!
//! Command-line interface for validating a transaction batch from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- users.csv transactions.csv bins.csv balances.csv events.csv
//! ```
//!
//! The program reads the user base, transaction batch, and card BIN table,
//! validates every transaction in file order, and writes two output files:
//! the final user balances and the per-transaction events.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, malformed input, etc.)

use std::process;
use transaction_validator::cli;
use transaction_validator::pipeline::{self, PipelinePaths};

fn main() {
    let args = cli::parse_args();

    let paths = PipelinePaths {
        users: args.users,
        transactions: args.transactions,
        bin_mappings: args.bin_mappings,
        balances_out: args.balances_out,
        events_out: args.events_out,
    };

    if let Err(e) = pipeline::run(&paths) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
