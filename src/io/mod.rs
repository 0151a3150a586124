//! CSV input and output handling

pub mod csv_format;
pub mod reader;

pub use csv_format::{write_balances_csv, write_events_csv};
pub use reader::{read_bin_mappings, read_transactions, read_users};
