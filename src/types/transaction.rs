//! Transaction-related types for the transaction validator
//!
//! This module defines the immutable transaction record read from the input
//! batch, plus the kind and payment-method discriminators. Unrecognised kind
//! or method values are not parse errors: the rule chain declines them with
//! a business reason, so both enums carry an `Other` variant.

use rust_decimal::Decimal;

/// Transaction kind discriminator
///
/// Only DEPOSIT and WITHDRAW are processable; anything else is declined
/// by the amount/limits rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Credit funds to the user's balance
    Deposit,
    /// Debit funds from the user's balance
    Withdraw,
    /// Any unrecognised kind value; always declined
    Other,
}

impl TransactionKind {
    /// Parse a kind from its CSV representation
    ///
    /// Matching is exact: the input format specifies upper-case values,
    /// and anything else is a business decline rather than a parse error.
    pub fn from_field(value: &str) -> Self {
        match value {
            "DEPOSIT" => TransactionKind::Deposit,
            "WITHDRAW" => TransactionKind::Withdraw,
            _ => TransactionKind::Other,
        }
    }
}

/// Payment method discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Bank transfer; account number is an IBAN
    Transfer,
    /// Card payment; account number is a digit string matched against BIN ranges
    Card,
    /// Any unrecognised method value; always declined
    Other,
}

impl PaymentMethod {
    /// Parse a payment method from its CSV representation
    pub fn from_field(value: &str) -> Self {
        match value {
            "TRANSFER" => PaymentMethod::Transfer,
            "CARD" => PaymentMethod::Card,
            _ => PaymentMethod::Other,
        }
    }
}

/// A single transaction from the input batch
///
/// Immutable once read. Input order is part of the observable contract:
/// the rule chain mutates shared trackers left to right, and both the
/// reconciliation pass and the ledger walk transactions in this order.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Transaction identifier; uniqueness across the batch is validated, not assumed
    pub id: String,

    /// Foreign key into the user reference data
    pub user_id: String,

    /// DEPOSIT, WITHDRAW, or an unrecognised value
    pub kind: TransactionKind,

    /// Transaction amount; expected positive, validated by the rule chain
    pub amount: Decimal,

    /// TRANSFER, CARD, or an unrecognised value
    pub method: PaymentMethod,

    /// IBAN string for TRANSFER, digit string for CARD
    pub account_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("DEPOSIT", TransactionKind::Deposit)]
    #[case("WITHDRAW", TransactionKind::Withdraw)]
    #[case("TRANSFER", TransactionKind::Other)]
    #[case("deposit", TransactionKind::Other)] // exact match only
    #[case("", TransactionKind::Other)]
    fn test_kind_from_field(#[case] value: &str, #[case] expected: TransactionKind) {
        assert_eq!(TransactionKind::from_field(value), expected);
    }

    #[rstest]
    #[case("TRANSFER", PaymentMethod::Transfer)]
    #[case("CARD", PaymentMethod::Card)]
    #[case("CASH", PaymentMethod::Other)]
    #[case("card", PaymentMethod::Other)] // exact match only
    #[case("", PaymentMethod::Other)]
    fn test_method_from_field(#[case] value: &str, #[case] expected: PaymentMethod) {
        assert_eq!(PaymentMethod::from_field(value), expected);
    }
}
