//! The ordered rule chain
//!
//! Decides APPROVED/DECLINED for a single transaction, consulting and
//! updating the shared [`BatchTrackers`]. Rules run in a fixed order and
//! the first rule that fires short-circuits the chain with a decline
//! reason; if no rule fires the transaction is approved.
//!
//! Rule order:
//! 1. Account ownership — an account approved for one user cannot be
//!    reused by another (runs first so a hijack attempt is caught before
//!    the other rules do any work)
//! 2. Identity — unique transaction id, user exists, user not frozen
//! 3. Amount/limits — positive amount, deposit/withdraw bounds, balance
//!    coverage, prior-deposit requirement for withdrawals
//! 4. Payment method — IBAN country + checksum for TRANSFER, BIN range +
//!    country + card type for CARD

use crate::core::iban::is_valid_iban;
use crate::core::trackers::BatchTrackers;
use crate::types::{
    find_bin_mapping, BinMapping, PaymentMethod, Transaction, TransactionKind, User,
    UserDirectory, DEBIT_CARD_TYPE,
};
use rust_decimal::Decimal;

/// Decline reasons recorded in the event log
///
/// Free text for audit purposes; tests reference these constants so the
/// exact wording stays pinned in one place.
pub mod reasons {
    pub const ACCOUNT_IN_USE: &str = "account used by another user";
    pub const DUPLICATE_TRANSACTION_ID: &str = "non-unique transaction id";
    pub const USER_NOT_FOUND: &str = "user not found";
    pub const USER_FROZEN: &str = "user is frozen";
    pub const INVALID_AMOUNT: &str = "invalid amount";
    pub const DEPOSIT_OUT_OF_BOUNDS: &str = "amount out of deposit limits";
    pub const WITHDRAW_OUT_OF_BOUNDS: &str = "amount out of withdraw limits";
    pub const INSUFFICIENT_BALANCE: &str = "amount exceeds balance";
    pub const NO_PRIOR_DEPOSIT: &str = "no approved deposit on this account";
    pub const UNKNOWN_TRANSACTION_TYPE: &str = "unknown transaction type";
    pub const COUNTRY_CODE_MISMATCH: &str = "country code mismatch";
    pub const INVALID_IBAN: &str = "invalid IBAN";
    pub const BIN_NOT_IN_RANGE: &str = "BIN not in range";
    pub const CARD_COUNTRY_MISMATCH: &str = "country mismatch";
    pub const NOT_A_DEBIT_CARD: &str = "not a debit card";
    pub const INVALID_PAYMENT_METHOD: &str = "invalid payment method";
    pub const ACCOUNT_AFTER_DECLINE: &str = "cannot use new account after prior decline";
}

/// Outcome of one rule: `Err` carries the decline reason
type RuleResult = Result<(), &'static str>;

/// The rule chain over one batch's reference data
///
/// Borrows the read-only reference tables; the mutable batch state lives
/// in the [`BatchTrackers`] passed to [`RuleChain::evaluate`].
pub struct RuleChain<'a> {
    users: &'a UserDirectory,
    bin_mappings: &'a [BinMapping],
}

impl<'a> RuleChain<'a> {
    /// Create a rule chain over the given reference data
    pub fn new(users: &'a UserDirectory, bin_mappings: &'a [BinMapping]) -> Self {
        RuleChain {
            users,
            bin_mappings,
        }
    }

    /// Run every rule against one transaction
    ///
    /// Returns `Ok(())` when the transaction passes all rules, or the
    /// decline reason from the first rule that fires. The caller records
    /// the verdict and updates the accepted/declined trackers; this method
    /// only mutates the used-id and deposit trackers as the rules specify.
    pub fn evaluate(&self, tx: &Transaction, trackers: &mut BatchTrackers) -> RuleResult {
        self.check_account_ownership(tx, trackers)?;
        self.check_identity(tx, trackers)?;
        self.check_limits(tx, trackers)?;
        self.check_payment_method(tx)?;
        Ok(())
    }

    /// Rule 1: an account approved for one user cannot be used by another
    fn check_account_ownership(&self, tx: &Transaction, trackers: &BatchTrackers) -> RuleResult {
        match trackers.account_owner(&tx.account_number) {
            Some(owner) if owner != tx.user_id => Err(reasons::ACCOUNT_IN_USE),
            _ => Ok(()),
        }
    }

    /// Rule 2: unique transaction id, user exists and is not frozen
    fn check_identity(&self, tx: &Transaction, trackers: &mut BatchTrackers) -> RuleResult {
        if !trackers.mark_transaction_id(&tx.id) {
            return Err(reasons::DUPLICATE_TRANSACTION_ID);
        }

        let user = self.user_for(tx)?;
        if user.frozen {
            return Err(reasons::USER_FROZEN);
        }
        Ok(())
    }

    /// Rule 3: amount bounds, balance coverage, and deposit history
    ///
    /// A passing deposit is marked in the deposit tracker here, before the
    /// payment-method rule runs. The mark persists even if rule 4 later
    /// declines the transaction; withdrawals on that account then validate
    /// against it.
    fn check_limits(&self, tx: &Transaction, trackers: &mut BatchTrackers) -> RuleResult {
        let user = self.user_for(tx)?;

        if tx.amount <= Decimal::ZERO {
            return Err(reasons::INVALID_AMOUNT);
        }

        match tx.kind {
            TransactionKind::Deposit => {
                if tx.amount < user.deposit_min || tx.amount > user.deposit_max {
                    return Err(reasons::DEPOSIT_OUT_OF_BOUNDS);
                }
                trackers.record_deposit(&tx.user_id, &tx.account_number);
                Ok(())
            }
            TransactionKind::Withdraw => {
                if tx.amount < user.withdraw_min || tx.amount > user.withdraw_max {
                    return Err(reasons::WITHDRAW_OUT_OF_BOUNDS);
                }
                if tx.amount > user.balance {
                    return Err(reasons::INSUFFICIENT_BALANCE);
                }
                if !trackers.has_deposit(&tx.user_id, &tx.account_number) {
                    return Err(reasons::NO_PRIOR_DEPOSIT);
                }
                Ok(())
            }
            TransactionKind::Other => Err(reasons::UNKNOWN_TRANSACTION_TYPE),
        }
    }

    /// Rule 4: payment-method specific account validation
    fn check_payment_method(&self, tx: &Transaction) -> RuleResult {
        match tx.method {
            PaymentMethod::Transfer => self.check_transfer(tx),
            PaymentMethod::Card => self.check_card(tx),
            PaymentMethod::Other => Err(reasons::INVALID_PAYMENT_METHOD),
        }
    }

    /// TRANSFER: IBAN country prefix must match the user, checksum must hold
    fn check_transfer(&self, tx: &Transaction) -> RuleResult {
        let user = self.user_for(tx)?;

        let matches_country = tx
            .account_number
            .get(..2)
            .is_some_and(|prefix| prefix == user.country);
        if !matches_country {
            return Err(reasons::COUNTRY_CODE_MISMATCH);
        }

        if !is_valid_iban(&tx.account_number) {
            return Err(reasons::INVALID_IBAN);
        }
        Ok(())
    }

    /// CARD: BIN range lookup, issuing-country presence, debit card only
    fn check_card(&self, tx: &Transaction) -> RuleResult {
        let prefix = tx
            .account_number
            .get(..10)
            .and_then(|digits| digits.parse::<u64>().ok())
            .ok_or(reasons::BIN_NOT_IN_RANGE)?;

        let mapping =
            find_bin_mapping(self.bin_mappings, prefix).ok_or(reasons::BIN_NOT_IN_RANGE)?;

        // TODO: this compares the BIN country against *any* user in the
        // reference set rather than the transaction's own user. Kept as-is
        // until product clarifies intent; pinned by
        // test_card_country_check_accepts_any_users_country.
        if !self.users.has_country(mapping.country_prefix()) {
            return Err(reasons::CARD_COUNTRY_MISMATCH);
        }

        if mapping.card_type != DEBIT_CARD_TYPE {
            return Err(reasons::NOT_A_DEBIT_CARD);
        }
        Ok(())
    }

    /// Look up the transaction's user, declining when absent
    fn user_for(&self, tx: &Transaction) -> Result<&User, &'static str> {
        self.users.get(&tx.user_id).ok_or(reasons::USER_NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    const VALID_IBAN_EE: &str = "EE382200221020145685";
    const VALID_IBAN_GB: &str = "GB82WEST12345698765432";

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn user(id: &str, country: &str) -> User {
        User {
            id: id.to_string(),
            username: format!("user-{}", id),
            balance: dec("500.00"),
            country: country.to_string(),
            frozen: false,
            deposit_min: dec("5.00"),
            deposit_max: dec("1000.00"),
            withdraw_min: dec("5.00"),
            withdraw_max: dec("200.00"),
        }
    }

    fn frozen_user(id: &str, country: &str) -> User {
        User {
            frozen: true,
            ..user(id, country)
        }
    }

    fn debit_bin(from: u64, to: u64, country: &str) -> BinMapping {
        BinMapping {
            name: "TestBank".to_string(),
            range_from: from,
            range_to: to,
            card_type: DEBIT_CARD_TYPE.to_string(),
            country: country.to_string(),
        }
    }

    fn transfer(id: &str, user_id: &str, kind: TransactionKind, amount: &str, iban: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            user_id: user_id.to_string(),
            kind,
            amount: dec(amount),
            method: PaymentMethod::Transfer,
            account_number: iban.to_string(),
        }
    }

    fn card(id: &str, user_id: &str, kind: TransactionKind, amount: &str, number: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            user_id: user_id.to_string(),
            kind,
            amount: dec(amount),
            method: PaymentMethod::Card,
            account_number: number.to_string(),
        }
    }

    fn chain_fixture(users: Vec<User>, bins: Vec<BinMapping>) -> (UserDirectory, Vec<BinMapping>) {
        (UserDirectory::new(users), bins)
    }

    #[test]
    fn test_valid_transfer_deposit_is_approved() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = transfer("t1", "u1", TransactionKind::Deposit, "50.00", VALID_IBAN_EE);
        assert_eq!(chain.evaluate(&tx, &mut trackers), Ok(()));
        assert!(trackers.has_deposit("u1", VALID_IBAN_EE));
    }

    #[test]
    fn test_account_owned_by_another_user_declines_first() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE"), user("u2", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();
        trackers.record_acceptance(VALID_IBAN_EE, "u1");

        // Even a transaction that would fail later rules reports the
        // ownership conflict, because rule 1 runs first
        let tx = transfer("t1", "u2", TransactionKind::Deposit, "-1.00", VALID_IBAN_EE);
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::ACCOUNT_IN_USE)
        );
    }

    #[test]
    fn test_same_user_may_reuse_own_account() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();
        trackers.record_acceptance(VALID_IBAN_EE, "u1");

        let tx = transfer("t1", "u1", TransactionKind::Deposit, "50.00", VALID_IBAN_EE);
        assert_eq!(chain.evaluate(&tx, &mut trackers), Ok(()));
    }

    #[test]
    fn test_duplicate_transaction_id_declined() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let first = transfer("t1", "u1", TransactionKind::Deposit, "50.00", VALID_IBAN_EE);
        assert_eq!(chain.evaluate(&first, &mut trackers), Ok(()));

        let duplicate = transfer("t1", "u1", TransactionKind::Deposit, "60.00", VALID_IBAN_EE);
        assert_eq!(
            chain.evaluate(&duplicate, &mut trackers),
            Err(reasons::DUPLICATE_TRANSACTION_ID)
        );
    }

    #[test]
    fn test_unknown_user_declined() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = transfer("t1", "ghost", TransactionKind::Deposit, "50.00", VALID_IBAN_EE);
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::USER_NOT_FOUND)
        );
    }

    #[test]
    fn test_frozen_user_declined() {
        let (users, bins) = chain_fixture(vec![frozen_user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = transfer("t1", "u1", TransactionKind::Deposit, "50.00", VALID_IBAN_EE);
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::USER_FROZEN)
        );
    }

    #[test]
    fn test_frozen_user_does_not_affect_others() {
        let (users, bins) = chain_fixture(vec![frozen_user("u1", "EE"), user("u2", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = transfer("t1", "u2", TransactionKind::Deposit, "50.00", VALID_IBAN_EE);
        assert_eq!(chain.evaluate(&tx, &mut trackers), Ok(()));
    }

    #[rstest]
    #[case::zero("0.00", reasons::INVALID_AMOUNT)]
    #[case::negative("-10.00", reasons::INVALID_AMOUNT)]
    #[case::below_minimum("4.99", reasons::DEPOSIT_OUT_OF_BOUNDS)]
    #[case::above_maximum("1000.01", reasons::DEPOSIT_OUT_OF_BOUNDS)]
    fn test_deposit_amount_rejections(#[case] amount: &str, #[case] expected: &str) {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = transfer("t1", "u1", TransactionKind::Deposit, amount, VALID_IBAN_EE);
        assert_eq!(chain.evaluate(&tx, &mut trackers), Err(expected));
        assert!(!trackers.has_deposit("u1", VALID_IBAN_EE));
    }

    #[rstest]
    #[case::boundary_min("5.00")]
    #[case::boundary_max("1000.00")]
    fn test_deposit_bounds_are_inclusive(#[case] amount: &str) {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = transfer("t1", "u1", TransactionKind::Deposit, amount, VALID_IBAN_EE);
        assert_eq!(chain.evaluate(&tx, &mut trackers), Ok(()));
    }

    #[rstest]
    #[case::below_minimum("4.99", reasons::WITHDRAW_OUT_OF_BOUNDS)]
    #[case::above_maximum("200.01", reasons::WITHDRAW_OUT_OF_BOUNDS)]
    fn test_withdraw_bound_rejections(#[case] amount: &str, #[case] expected: &str) {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();
        trackers.record_deposit("u1", VALID_IBAN_EE);

        let tx = transfer("t1", "u1", TransactionKind::Withdraw, amount, VALID_IBAN_EE);
        assert_eq!(chain.evaluate(&tx, &mut trackers), Err(expected));
    }

    #[test]
    fn test_withdraw_exceeding_balance_declined() {
        // withdraw_max above balance so the balance check is the one firing
        let mut poor = user("u1", "EE");
        poor.balance = dec("100.00");
        poor.withdraw_max = dec("1000.00");
        let (users, bins) = chain_fixture(vec![poor], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();
        trackers.record_deposit("u1", VALID_IBAN_EE);

        let tx = transfer("t1", "u1", TransactionKind::Withdraw, "100.01", VALID_IBAN_EE);
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::INSUFFICIENT_BALANCE)
        );
    }

    #[test]
    fn test_withdraw_without_prior_deposit_declined() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = transfer("t1", "u1", TransactionKind::Withdraw, "50.00", VALID_IBAN_EE);
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::NO_PRIOR_DEPOSIT)
        );
    }

    #[test]
    fn test_withdraw_requires_deposit_on_same_account() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();
        trackers.record_deposit("u1", "EE341010010342017012"); // different account

        let tx = transfer("t1", "u1", TransactionKind::Withdraw, "50.00", VALID_IBAN_EE);
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::NO_PRIOR_DEPOSIT)
        );
    }

    #[test]
    fn test_unknown_transaction_kind_declined() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = transfer("t1", "u1", TransactionKind::Other, "50.00", VALID_IBAN_EE);
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::UNKNOWN_TRANSACTION_TYPE)
        );
    }

    #[test]
    fn test_transfer_country_mismatch_declined() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = transfer("t1", "u1", TransactionKind::Deposit, "50.00", VALID_IBAN_GB);
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::COUNTRY_CODE_MISMATCH)
        );
    }

    #[test]
    fn test_transfer_bad_checksum_declined() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        // Country prefix matches but the checksum does not hold
        let tx = transfer("t1", "u1", TransactionKind::Deposit, "50.00", "EE381200221020145685");
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::INVALID_IBAN)
        );
    }

    #[test]
    fn test_card_happy_path() {
        let (users, bins) = chain_fixture(
            vec![user("u1", "FI")],
            vec![debit_bin(4000000000, 4999999999, "FIN")],
        );
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = card("t1", "u1", TransactionKind::Deposit, "50.00", "4000000000123456");
        assert_eq!(chain.evaluate(&tx, &mut trackers), Ok(()));
    }

    #[rstest]
    #[case::below_all_ranges("3999999999123456")]
    #[case::above_all_ranges("5000000000123456")]
    #[case::too_short("400")]
    #[case::not_numeric("40000000ab123456")]
    fn test_card_bin_not_in_range(#[case] number: &str) {
        let (users, bins) = chain_fixture(
            vec![user("u1", "FI")],
            vec![debit_bin(4000000000, 4999999999, "FIN")],
        );
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = card("t1", "u1", TransactionKind::Deposit, "50.00", number);
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::BIN_NOT_IN_RANGE)
        );
    }

    #[test]
    fn test_card_country_not_in_reference_set_declined() {
        let (users, bins) = chain_fixture(
            vec![user("u1", "EE")],
            vec![debit_bin(4000000000, 4999999999, "GBR")],
        );
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = card("t1", "u1", TransactionKind::Deposit, "50.00", "4000000000123456");
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::CARD_COUNTRY_MISMATCH)
        );
    }

    #[test]
    fn test_card_country_check_accepts_any_users_country() {
        // Pins the literal behavior: the BIN country only has to match
        // *some* user in the reference set, not the transacting user
        let (users, bins) = chain_fixture(
            vec![user("u1", "EE"), user("u2", "GB")],
            vec![debit_bin(4000000000, 4999999999, "GBR")],
        );
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        // u1 is Estonian; the GBR card is accepted because u2 is British
        let tx = card("t1", "u1", TransactionKind::Deposit, "50.00", "4000000000123456");
        assert_eq!(chain.evaluate(&tx, &mut trackers), Ok(()));
    }

    #[test]
    fn test_card_multibyte_bin_country_declined_not_panicking() {
        // "AÉS" has a character straddling byte index 2; the country
        // comparison must decline the card, not abort the run
        let (users, bins) = chain_fixture(
            vec![user("u1", "FI")],
            vec![debit_bin(4000000000, 4999999999, "AÉS")],
        );
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = card("t1", "u1", TransactionKind::Deposit, "50.00", "4000000000123456");
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::CARD_COUNTRY_MISMATCH)
        );
    }

    #[test]
    fn test_card_credit_card_declined() {
        let mut credit = debit_bin(4000000000, 4999999999, "FIN");
        credit.card_type = "CC".to_string();
        let (users, bins) = chain_fixture(vec![user("u1", "FI")], vec![credit]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = card("t1", "u1", TransactionKind::Deposit, "50.00", "4000000000123456");
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::NOT_A_DEBIT_CARD)
        );
    }

    #[test]
    fn test_unrecognised_payment_method_declined() {
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let tx = Transaction {
            method: PaymentMethod::Other,
            ..transfer("t1", "u1", TransactionKind::Deposit, "50.00", VALID_IBAN_EE)
        };
        assert_eq!(
            chain.evaluate(&tx, &mut trackers),
            Err(reasons::INVALID_PAYMENT_METHOD)
        );
    }

    #[test]
    fn test_deposit_mark_survives_payment_method_decline() {
        // The amount rule passes and records the deposit before the method
        // rule declines; a later withdrawal then finds the deposit mark
        let (users, bins) = chain_fixture(vec![user("u1", "EE")], vec![]);
        let chain = RuleChain::new(&users, &bins);
        let mut trackers = BatchTrackers::new();

        let bad_iban = "EE381200221020145685";
        let deposit = transfer("t1", "u1", TransactionKind::Deposit, "50.00", bad_iban);
        assert_eq!(
            chain.evaluate(&deposit, &mut trackers),
            Err(reasons::INVALID_IBAN)
        );
        assert!(trackers.has_deposit("u1", bad_iban));
    }
}
