//! BIN mapping reference data
//!
//! A BIN mapping associates an inclusive range of 10-digit card-number
//! prefixes with an issuer name, a card type, and an issuing country.
//! Ranges are assumed disjoint but this is not enforced; lookup returns
//! the first match in load order.

/// Card type value accepted by the payment-method rule
pub const DEBIT_CARD_TYPE: &str = "DC";

/// A BIN range from the reference data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinMapping {
    /// Issuing bank name (informational only)
    pub name: String,

    /// Lowest 10-digit card prefix in this range, inclusive
    pub range_from: u64,

    /// Highest 10-digit card prefix in this range, inclusive
    pub range_to: u64,

    /// Card type; only "DC" (debit) is acceptable
    pub card_type: String,

    /// Three-letter country code (ISO 3166-1 alpha-3); compared by its
    /// first two characters against user countries
    pub country: String,
}

impl BinMapping {
    /// Whether the given card prefix falls inside this range
    pub fn contains(&self, prefix: u64) -> bool {
        prefix >= self.range_from && prefix <= self.range_to
    }

    /// The first two characters of the three-letter country code
    ///
    /// User countries are alpha-2; the original data set relies on the
    /// alpha-3 code sharing its first two letters. A value too short, or
    /// one where byte index 2 is not a character boundary, is returned
    /// whole; it then matches no alpha-2 user country and the card is
    /// declined rather than the run aborting.
    pub fn country_prefix(&self) -> &str {
        self.country.get(..2).unwrap_or(&self.country)
    }
}

/// Find the BIN mapping containing the given card prefix
///
/// First match in load order wins; ranges are assumed disjoint.
pub fn find_bin_mapping(mappings: &[BinMapping], prefix: u64) -> Option<&BinMapping> {
    mappings.iter().find(|mapping| mapping.contains(prefix))
}
