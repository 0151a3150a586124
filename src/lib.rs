//! Transaction Validator Library
//! # Overview
//!
//! This library validates a batch of financial transactions against a user
//! base and a card BIN table, producing per-transaction events and final
//! user balances. Processing is deterministic and single threaded: the
//! same inputs always produce byte-identical outputs.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (User, Transaction, BinMapping, Event)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::rules`] - The per-transaction validation rule chain
//!   - [`core::reconciliation`] - Cross-account consistency pass
//!   - [`core::ledger`] - Balance application for approved transactions
//!   - [`core::processor`] - Batch orchestration over the three phases
//! - [`io`] - CSV reading and writing
//! - [`pipeline`] - End-to-end file-in, file-out batch run
//!
//! # Processing Phases
//!
//! A batch is processed in three phases:
//!
//! - **Validation**: each transaction runs through the rule chain in file
//!   order and is approved or declined with a reason
//! - **Reconciliation**: users who spread CARD activity across several
//!   accounts after a decline have the repeat uses declined as well
//! - **Ledger**: approved deposits and withdrawals are applied to user
//!   balances
//!
//! Events are append only. A transaction declined during reconciliation
//! keeps its earlier APPROVED row and gains a DECLINED row.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use core::BatchProcessor;
pub use io::{write_balances_csv, write_events_csv};
pub use types::{
    BinMapping, Event, EventStatus, ProcessingError, Transaction, TransactionKind, User,
    UserDirectory, Verdict,
};
