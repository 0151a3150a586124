//! User reference data for the transaction validator
//!
//! This module defines the User record and the UserDirectory, the load-order
//! preserving lookup table the rule chain and ledger consult.

use rust_decimal::Decimal;
use std::collections::HashMap;

/// A user account from the reference data
///
/// Loaded once before processing. `balance` is the only mutable field and
/// is written exclusively by the ledger phase, after all verdicts are known.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Unique user identifier
    pub id: String,

    /// Display name, carried through for completeness (not consulted by any rule)
    pub username: String,

    /// Current account balance
    pub balance: Decimal,

    /// Two-letter country code (ISO 3166-1 alpha-2)
    pub country: String,

    /// Whether the account is frozen; frozen users cannot transact
    pub frozen: bool,

    /// Minimum deposit amount allowed, inclusive
    pub deposit_min: Decimal,

    /// Maximum deposit amount allowed, inclusive
    pub deposit_max: Decimal,

    /// Minimum withdrawal amount allowed, inclusive
    pub withdraw_min: Decimal,

    /// Maximum withdrawal amount allowed, inclusive
    pub withdraw_max: Decimal,
}

/// Load-order preserving user lookup table
///
/// Keeps users in the order they were read so the balances output can be
/// written back in the same order, while providing O(1) lookup by id.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    index: HashMap<String, usize>,
}

impl UserDirectory {
    /// Build a directory from users in load order
    ///
    /// If the reference data repeats a user id, the first record wins;
    /// later duplicates are kept in the output ordering but unreachable
    /// by lookup.
    pub fn new(users: Vec<User>) -> Self {
        let mut index = HashMap::with_capacity(users.len());
        for (i, user) in users.iter().enumerate() {
            index.entry(user.id.clone()).or_insert(i);
        }
        UserDirectory { users, index }
    }

    /// Look up a user by id
    pub fn get(&self, user_id: &str) -> Option<&User> {
        self.index.get(user_id).map(|&i| &self.users[i])
    }

    /// Look up a user by id for balance mutation
    pub fn get_mut(&mut self, user_id: &str) -> Option<&mut User> {
        self.index.get(user_id).map(|&i| &mut self.users[i])
    }

    /// Whether any user in the directory has the given country code
    ///
    /// Used by the CARD country-presence check, which compares the BIN
    /// mapping's country against the whole reference set.
    pub fn has_country(&self, country: &str) -> bool {
        self.users.iter().any(|user| user.country == country)
    }

    /// Users in load order, for writing the balances output
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }
}
