//! Cross-transaction account-reuse reconciliation
//!
//! A user must not operate more than one CARD account across the batch,
//! except when one of the accounts was already involved in a decline. This
//! pass runs once, after the rule chain has produced a verdict for every
//! transaction. It only ever appends DECLINED events and flips APPROVED
//! verdicts to DECLINED; an existing decline is never reversed.
//!
//! Determinism: both the users and each user's accounts are visited in
//! first-seen input order, so the disputed account selection does not
//! depend on hash iteration order.

use crate::core::trackers::BatchTrackers;
use crate::types::{Event, PaymentMethod, Transaction, Verdict};
use crate::core::rules::reasons;
use std::collections::HashMap;

/// Decline repeat uses of disputed CARD accounts
///
/// For each user with more than one distinct CARD account, the first of
/// those accounts (in first-seen order) that also appears among the
/// declined-transaction accounts is the disputed one. Every transaction on
/// the disputed account after its first occurrence is declined, if not
/// declined already. `verdicts` is positional, one per transaction.
pub fn reconcile(
    transactions: &[Transaction],
    verdicts: &mut [Verdict],
    events: &mut Vec<Event>,
    trackers: &BatchTrackers,
) {
    debug_assert_eq!(transactions.len(), verdicts.len());

    // Distinct CARD accounts per user, everything in first-seen order
    let mut user_order: Vec<&str> = Vec::new();
    let mut accounts_by_user: HashMap<&str, Vec<&str>> = HashMap::new();
    for tx in transactions {
        if tx.method != PaymentMethod::Card {
            continue;
        }
        let accounts = accounts_by_user
            .entry(tx.user_id.as_str())
            .or_insert_with(|| {
                user_order.push(tx.user_id.as_str());
                Vec::new()
            });
        if !accounts.contains(&tx.account_number.as_str()) {
            accounts.push(tx.account_number.as_str());
        }
    }

    for user_id in user_order {
        let accounts = &accounts_by_user[user_id];
        if accounts.len() < 2 {
            continue;
        }

        let disputed = accounts
            .iter()
            .find(|account| trackers.is_declined_account(account));
        if let Some(disputed) = disputed {
            decline_repeat_uses(transactions, verdicts, events, disputed);
        }
    }
}

/// Decline every use of `account` after its first occurrence in input order
fn decline_repeat_uses(
    transactions: &[Transaction],
    verdicts: &mut [Verdict],
    events: &mut Vec<Event>,
    account: &str,
) {
    let mut first_seen = false;
    for (i, tx) in transactions.iter().enumerate() {
        if tx.account_number != account {
            continue;
        }
        if !first_seen {
            first_seen = true;
            continue;
        }
        // Only newly-declined transactions get an event; existing declines
        // already carry one
        if verdicts[i].is_approved() {
            verdicts[i] = Verdict::Declined;
            events.push(Event::declined(&tx.id, reasons::ACCOUNT_AFTER_DECLINE));
        }
    }
}
