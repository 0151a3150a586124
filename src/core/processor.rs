//! Batch processing orchestration
//!
//! The [`BatchProcessor`] owns the reference data and runs the three
//! strictly ordered phases over a transaction batch:
//!
//! 1. Rule chain — one verdict per transaction, left to right
//! 2. Reconciliation — CARD account-reuse pass, may append declines
//! 3. Ledger — balance updates for transactions approved after both passes
//!
//! Every transaction has exactly one terminal verdict before the ledger
//! runs, and balances change only once all verdicts are frozen.

use crate::core::ledger;
use crate::core::reconciliation::reconcile;
use crate::core::rules::RuleChain;
use crate::core::trackers::BatchTrackers;
use crate::types::{BinMapping, Event, Transaction, User, UserDirectory, Verdict};

/// Single-batch transaction processor
///
/// Holds the user directory and BIN mappings loaded from the reference
/// files. Processing mutates only user balances, and only in the final
/// ledger phase.
pub struct BatchProcessor {
    users: UserDirectory,
    bin_mappings: Vec<BinMapping>,
}

impl BatchProcessor {
    /// Create a processor over the given reference data
    pub fn new(users: Vec<User>, bin_mappings: Vec<BinMapping>) -> Self {
        BatchProcessor {
            users: UserDirectory::new(users),
            bin_mappings,
        }
    }

    /// Run all three phases over a batch and return the event log
    ///
    /// The returned events are in processing order: one event per
    /// transaction from the rule chain, followed by any DECLINED events
    /// the reconciliation pass appended. User balances reflect the final
    /// verdicts when this returns.
    pub fn process(&mut self, transactions: &[Transaction]) -> Vec<Event> {
        let mut trackers = BatchTrackers::new();
        let mut events = Vec::with_capacity(transactions.len());
        let mut verdicts = Vec::with_capacity(transactions.len());

        // Phase 1: rule chain
        let chain = RuleChain::new(&self.users, &self.bin_mappings);
        for tx in transactions {
            match chain.evaluate(tx, &mut trackers) {
                Ok(()) => {
                    events.push(Event::approved(&tx.id));
                    verdicts.push(Verdict::Approved);
                    trackers.record_acceptance(&tx.account_number, &tx.user_id);
                }
                Err(reason) => {
                    events.push(Event::declined(&tx.id, reason));
                    verdicts.push(Verdict::Declined);
                    trackers.record_decline(&tx.id, &tx.account_number);
                }
            }
        }

        // Phase 2: account-reuse reconciliation
        reconcile(transactions, &mut verdicts, &mut events, &trackers);

        // Phase 3: balance ledger
        ledger::apply(transactions, &verdicts, &mut self.users);

        events
    }

    /// The user directory with post-processing balances, in load order
    pub fn users(&self) -> &UserDirectory {
        &self.users
    }
}
