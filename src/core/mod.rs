//! Core business logic module
//!
//! This module contains the validation and balance-update engine:
//! - `trackers` - Shared running state threaded through the batch
//! - `rules` - The ordered, short-circuiting rule chain
//! - `iban` - IBAN mod-97 checksum validation
//! - `reconciliation` - CARD account-reuse pass over the whole batch
//! - `ledger` - Balance updates from final verdicts
//! - `processor` - Orchestration of the three processing phases

pub mod iban;
pub mod ledger;
pub mod processor;
pub mod reconciliation;
pub mod rules;
pub mod trackers;

pub use processor::BatchProcessor;
