//! CSV format handling for the input tables and result outputs
//!
//! This module centralizes all CSV format concerns, providing:
//! - Record structures mirroring the three input schemas
//! - Conversion from CSV records to domain types
//! - Balances and events output serialization
//!
//! Numeric fields are deserialized as strings and converted explicitly so
//! a bad value reports the table and field it came from. Any conversion
//! failure is fatal: the run aborts with no partial output.

use crate::types::{
    BinMapping, Event, PaymentMethod, ProcessingError, Transaction, TransactionKind, User,
    UserDirectory,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// One row of the users input file
///
/// Columns: `user_id,username,balance,country,frozen,deposit_min,deposit_max,withdraw_min,withdraw_max`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct UserRecord {
    pub user_id: String,
    pub username: String,
    pub balance: String,
    pub country: String,
    pub frozen: String,
    pub deposit_min: String,
    pub deposit_max: String,
    pub withdraw_min: String,
    pub withdraw_max: String,
}

/// One row of the transactions input file
///
/// Columns: `transaction_id,user_id,type,amount,method,account_number`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: String,
    pub method: String,
    pub account_number: String,
}

/// One row of the BIN mappings input file
///
/// Columns: `name,range_from,range_to,type,country`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BinRecord {
    pub name: String,
    pub range_from: String,
    pub range_to: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub country: String,
}

/// Convert a UserRecord to a User
///
/// The `frozen` column holds an integer flag: 1 is frozen, any other
/// integer is active. Non-numeric values in any numeric column are fatal.
pub fn convert_user_record(record: UserRecord) -> Result<User, ProcessingError> {
    let frozen_flag: i32 = record
        .frozen
        .parse()
        .map_err(|_| ProcessingError::invalid_field("users", "frozen", &record.frozen))?;

    Ok(User {
        balance: parse_decimal("users", "balance", &record.balance)?,
        deposit_min: parse_decimal("users", "deposit_min", &record.deposit_min)?,
        deposit_max: parse_decimal("users", "deposit_max", &record.deposit_max)?,
        withdraw_min: parse_decimal("users", "withdraw_min", &record.withdraw_min)?,
        withdraw_max: parse_decimal("users", "withdraw_max", &record.withdraw_max)?,
        id: record.user_id,
        username: record.username,
        country: record.country,
        frozen: frozen_flag == 1,
    })
}

/// Convert a TransactionRecord to a Transaction
///
/// Unrecognised `type` and `method` values are not errors here: the rule
/// chain declines them with a business reason. A malformed amount is a
/// fatal parse error.
pub fn convert_transaction_record(record: TransactionRecord) -> Result<Transaction, ProcessingError> {
    Ok(Transaction {
        amount: parse_decimal("transactions", "amount", &record.amount)?,
        kind: TransactionKind::from_field(&record.kind),
        method: PaymentMethod::from_field(&record.method),
        id: record.transaction_id,
        user_id: record.user_id,
        account_number: record.account_number,
    })
}

/// Convert a BinRecord to a BinMapping
pub fn convert_bin_record(record: BinRecord) -> Result<BinMapping, ProcessingError> {
    let range_from: u64 = record.range_from.parse().map_err(|_| {
        ProcessingError::invalid_field("bin mappings", "range_from", &record.range_from)
    })?;
    let range_to: u64 = record.range_to.parse().map_err(|_| {
        ProcessingError::invalid_field("bin mappings", "range_to", &record.range_to)
    })?;

    Ok(BinMapping {
        range_from,
        range_to,
        name: record.name,
        card_type: record.card_type,
        country: record.country,
    })
}

fn parse_decimal(table: &str, field: &str, value: &str) -> Result<Decimal, ProcessingError> {
    Decimal::from_str(value.trim())
        .map_err(|_| ProcessingError::invalid_field(table, field, value))
}

/// Write the balances output
///
/// Columns: `USER_ID,BALANCE`, balance formatted to 2 decimal places,
/// users in load order.
pub fn write_balances_csv(
    users: &UserDirectory,
    output: &mut dyn Write,
) -> Result<(), ProcessingError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["USER_ID", "BALANCE"])?;
    for user in users.iter() {
        writer.write_record(&[user.id.clone(), format!("{:.2}", user.balance)])?;
    }
    writer.flush()?;

    Ok(())
}

/// Write the events output
///
/// Columns: `transaction_id,status,message`, one row per event in append
/// order.
pub fn write_events_csv(events: &[Event], output: &mut dyn Write) -> Result<(), ProcessingError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["transaction_id", "status", "message"])?;
    for event in events {
        writer.write_record(&[
            event.transaction_id.clone(),
            event.status.to_string(),
            event.message.clone(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
