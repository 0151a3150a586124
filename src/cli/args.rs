use clap::Parser;
use std::path::PathBuf;

/// Validate a batch of transactions against a user base and BIN table
#[derive(Parser, Debug)]
#[command(name = "transaction-validator")]
#[command(about = "Validate a batch of transactions against a user base and BIN table", long_about = None)]
pub struct CliArgs {
    /// Input CSV file with the user base
    #[arg(value_name = "USERS", help = "Path to the users CSV file")]
    pub users: PathBuf,

    /// Input CSV file with the transaction batch
    #[arg(value_name = "TRANSACTIONS", help = "Path to the transactions CSV file")]
    pub transactions: PathBuf,

    /// Input CSV file with the card BIN mappings
    #[arg(value_name = "BIN_MAPPINGS", help = "Path to the BIN mappings CSV file")]
    pub bin_mappings: PathBuf,

    /// Output CSV file for the final user balances
    #[arg(value_name = "BALANCES_OUT", help = "Path the balances CSV is written to")]
    pub balances_out: PathBuf,

    /// Output CSV file for the per-transaction events
    #[arg(value_name = "EVENTS_OUT", help = "Path the events CSV is written to")]
    pub events_out: PathBuf,
}
