//! Shared running state for a single batch
//!
//! The rule chain consults and updates this state as it walks the batch
//! left to right, which is what makes input order part of the observable
//! contract. The trackers are an explicit context struct passed by mutable
//! reference, never process-wide state.

use std::collections::{BTreeMap, HashMap, HashSet};

/// Mutable cross-transaction state threaded through the rule chain
///
/// Four trackers accumulate over the batch:
/// - `used_transaction_ids`: every id seen, inserted on first encounter
/// - `accepted_accounts`: account number → the user that last had an
///   approved transaction on it
/// - `deposited_accounts`: user → accounts with at least one approved
///   deposit (withdrawals require a prior deposit on the same account)
/// - `declined_accounts`: transaction id → account numbers of declined
///   transactions, consulted by the reconciliation pass
#[derive(Debug, Default)]
pub struct BatchTrackers {
    used_transaction_ids: HashSet<String>,
    accepted_accounts: HashMap<String, String>,
    deposited_accounts: HashMap<String, HashSet<String>>,
    declined_accounts: BTreeMap<String, Vec<String>>,
}

impl BatchTrackers {
    /// Create empty trackers for a new batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction id; returns `true` on first encounter
    ///
    /// An id is only added once, so a second call with the same id
    /// returns `false` without changing state.
    pub fn mark_transaction_id(&mut self, transaction_id: &str) -> bool {
        self.used_transaction_ids.insert(transaction_id.to_string())
    }

    /// The user that last had an approved transaction on this account
    pub fn account_owner(&self, account_number: &str) -> Option<&str> {
        self.accepted_accounts.get(account_number).map(String::as_str)
    }

    /// Record an approved transaction's account under its user
    pub fn record_acceptance(&mut self, account_number: &str, user_id: &str) {
        self.accepted_accounts
            .insert(account_number.to_string(), user_id.to_string());
    }

    /// Record a declined transaction's account under its transaction id
    pub fn record_decline(&mut self, transaction_id: &str, account_number: &str) {
        self.declined_accounts
            .entry(transaction_id.to_string())
            .or_default()
            .push(account_number.to_string());
    }

    /// Whether any declined transaction used this account
    pub fn is_declined_account(&self, account_number: &str) -> bool {
        self.declined_accounts
            .values()
            .any(|accounts| accounts.iter().any(|a| a == account_number))
    }

    /// Mark an account as having an approved deposit for this user
    pub fn record_deposit(&mut self, user_id: &str, account_number: &str) {
        self.deposited_accounts
            .entry(user_id.to_string())
            .or_default()
            .insert(account_number.to_string());
    }

    /// Whether this user has an approved deposit on this account
    pub fn has_deposit(&self, user_id: &str, account_number: &str) -> bool {
        self.deposited_accounts
            .get(user_id)
            .is_some_and(|accounts| accounts.contains(account_number))
    }
}
