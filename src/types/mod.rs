//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `user`: User reference data and the load-order directory
//! - `transaction`: The immutable input transaction record
//! - `bin_mapping`: BIN range reference data
//! - `event`: Verdicts and the append-only event log
//! - `error`: Fatal error types for the validator

pub mod bin_mapping;
pub mod error;
pub mod event;
pub mod transaction;
pub mod user;

pub use bin_mapping::{find_bin_mapping, BinMapping, DEBIT_CARD_TYPE};
pub use error::ProcessingError;
pub use event::{Event, EventStatus, Verdict};
pub use transaction::{PaymentMethod, Transaction, TransactionKind};
pub use user::{User, UserDirectory};
