//! Verdict and event types
//!
//! The rule chain produces exactly one [`Event`] per input transaction; the
//! reconciliation pass may append further DECLINED events. Events are an
//! append-only audit log, so the authoritative per-transaction outcome is
//! tracked separately as a positional [`Verdict`] (one per input index).

use std::fmt;

/// Event status written to the events output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The transaction passed every rule and survived reconciliation
    Approved,
    /// A rule or the reconciliation pass declined the transaction
    Declined,
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventStatus::Approved => write!(f, "APPROVED"),
            EventStatus::Declined => write!(f, "DECLINED"),
        }
    }
}

/// One row of the events output
///
/// `message` is a human-readable reason for audit and debugging; it is
/// never machine-parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Id of the transaction the event describes
    pub transaction_id: String,

    /// APPROVED or DECLINED
    pub status: EventStatus,

    /// Free-text reason ("OK" for approvals)
    pub message: String,
}

impl Event {
    /// Create an APPROVED event
    pub fn approved(transaction_id: &str) -> Self {
        Event {
            transaction_id: transaction_id.to_string(),
            status: EventStatus::Approved,
            message: "OK".to_string(),
        }
    }

    /// Create a DECLINED event with the given reason
    pub fn declined(transaction_id: &str, message: &str) -> Self {
        Event {
            transaction_id: transaction_id.to_string(),
            status: EventStatus::Declined,
            message: message.to_string(),
        }
    }
}

/// Final outcome of one input transaction, tracked by input position
///
/// Events can share a transaction id (duplicate ids in the batch, or a
/// reconciliation decline appended after an approval), so the ledger never
/// resolves outcomes by id. It reads the verdict at the transaction's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Balance change applies in the ledger phase
    Approved,
    /// No balance change
    Declined,
}

impl Verdict {
    /// Whether this verdict lets the ledger apply the amount
    pub fn is_approved(self) -> bool {
        matches!(self, Verdict::Approved)
    }
}
