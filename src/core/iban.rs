//! IBAN mod-97 checksum validation (ISO 7064)
//!
//! The check rotates the IBAN by moving its first four characters to the
//! end, maps every letter to its numeric value (A=10 … Z=35) leaving digits
//! unchanged, interprets the result as a base-10 integer, and requires the
//! remainder mod 97 to be 1.
//!
//! The remainder is computed digit by digit instead of through a big-integer
//! type: each character contributes one or two decimal digits, and the
//! running value is reduced mod 97 at every step.

/// Validate an IBAN string against the mod-97 checksum
///
/// Spaces are stripped before validation, so grouped forms like
/// `"EE38 2200 2210 2014 5685"` are accepted. Any character that is neither
/// an ASCII letter nor a digit fails the check, as does a string too short
/// to rotate (fewer than five significant characters).
pub fn is_valid_iban(iban: &str) -> bool {
    let compact: Vec<u8> = iban
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    // Need the four rotated characters plus at least one more
    if compact.len() < 5 {
        return false;
    }

    let rotated = compact[4..].iter().chain(compact[..4].iter());

    let mut remainder: u32 = 0;
    for &byte in rotated {
        let value = match byte {
            b'0'..=b'9' => u32::from(byte - b'0'),
            b'A'..=b'Z' => u32::from(byte - b'A') + 10,
            b'a'..=b'z' => u32::from(byte - b'a') + 10,
            _ => return false,
        };
        // Letters occupy two decimal digits, plain digits one
        let shift = if value < 10 { 10 } else { 100 };
        remainder = (remainder * shift + value) % 97;
    }

    remainder == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::estonian("EE382200221020145685")]
    #[case::estonian_alt("EE341010010342017012")]
    #[case::british("GB82WEST12345698765432")]
    #[case::german("DE89370400440532013000")]
    #[case::with_spaces("EE38 2200 2210 2014 5685")]
    #[case::lowercase("gb82west12345698765432")]
    fn test_valid_ibans(#[case] iban: &str) {
        assert!(is_valid_iban(iban), "expected valid: {}", iban);
    }

    #[rstest]
    #[case::mutated_digit("EE381200221020145685")] // one digit changed
    #[case::mutated_tail("GB82WEST12345698765433")] // last digit changed
    #[case::zero_body("EE38 0000 0000 0000 0000")] // remainder 12, not 1
    #[case::wrong_check_digits("EE142200221020145689")]
    #[case::empty("")]
    #[case::too_short("EE38")]
    #[case::only_spaces("    ")]
    #[case::illegal_character("EE38-2200-2210-2014-5685")]
    fn test_invalid_ibans(#[case] iban: &str) {
        assert!(!is_valid_iban(iban), "expected invalid: {}", iban);
    }

    #[test]
    fn test_single_character_mutation_breaks_checksum() {
        let valid = "EE382200221020145685";
        assert!(is_valid_iban(valid));

        // Flip each character in turn; the checksum must catch every change
        for (i, original) in valid.char_indices() {
            let replacement = if original == '9' { '8' } else { '9' };
            if original == replacement {
                continue;
            }
            let mut mutated: Vec<char> = valid.chars().collect();
            mutated[i] = replacement;
            let mutated: String = mutated.into_iter().collect();
            assert!(!is_valid_iban(&mutated), "mutation not caught: {}", mutated);
        }
    }
}
