//! Balance ledger
//!
//! Applies the net effect of approved transactions to user balances, in
//! input order. Runs strictly after both validation passes, so a
//! transaction declined by reconciliation never touches a balance.

use crate::types::{Transaction, TransactionKind, UserDirectory, Verdict};

/// Apply approved DEPOSIT/WITHDRAW amounts to user balances
///
/// `verdicts` is positional, one per transaction, and must hold the final
/// post-reconciliation outcomes. Declined transactions and transactions
/// against unknown users are no-ops.
pub fn apply(transactions: &[Transaction], verdicts: &[Verdict], users: &mut UserDirectory) {
    debug_assert_eq!(transactions.len(), verdicts.len());

    for (tx, verdict) in transactions.iter().zip(verdicts) {
        if !verdict.is_approved() {
            continue;
        }
        let Some(user) = users.get_mut(&tx.user_id) else {
            continue;
        };
        match tx.kind {
            TransactionKind::Deposit => user.balance += tx.amount,
            TransactionKind::Withdraw => user.balance -= tx.amount,
            // Unknown kinds never reach an approved verdict; nothing to apply
            TransactionKind::Other => {}
        }
    }
}
