//! # Checksum — Weighted Mod-11 Check Digits
//!
//! Defines the single weighted-checksum function used for both CPF check
//! digits, and the structured [`Validity`] result produced by document
//! validation.
//!
//! ## Algorithm
//!
//! For a digit slice of length `n`, each digit at index `i` is multiplied
//! by the weight `n + 1 - i` and the products are summed. With
//! `rem = sum % 11`, the check digit is `0` when `rem < 2` and `11 - rem`
//! otherwise. The same function is applied twice per document: over the
//! first 9 digits to derive the 10th, and over the first 10 to derive
//! the 11th.

use serde::{Deserialize, Serialize};

use crate::document::MAX_DIGITS;

/// Compute the weighted mod-11 check digit over a digit slice.
///
/// The slice is the checksum range: pass `&digits[..9]` for the first
/// check digit and `&digits[..10]` for the second. Pure, deterministic,
/// and total — any slice yields a digit in `0..=9` (the empty slice
/// yields `0`).
pub fn check_digit(digits: &[u8]) -> u8 {
    let n = digits.len();
    let mut sum = 0u32;
    for (i, &digit) in digits.iter().enumerate() {
        let weight = (n + 1 - i) as u32;
        sum += u32::from(digit) * weight;
    }
    let rem = sum % 11;
    if rem < 2 {
        0
    } else {
        (11 - rem) as u8
    }
}

/// The structured validity state of a document.
///
/// All three flags are computed together by
/// [`Cpf::validity()`](crate::Cpf::validity). A document is valid iff no
/// flag is set: exactly 11 digits, not all identical, and both check
/// digits consistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    /// The document holds zero digits.
    pub value_missing: bool,
    /// The document holds between 1 and 10 digits — nonzero but incomplete.
    pub too_short: bool,
    /// The document holds 11 digits but they are all identical (a
    /// known-invalid pattern) or at least one check digit is inconsistent.
    pub type_mismatch: bool,
}

impl Validity {
    /// Compute the validity flags for a digit sequence of length 0..=11.
    pub(crate) fn of(digits: &[u8]) -> Self {
        let type_mismatch = digits.len() == MAX_DIGITS && {
            let repeated = digits.iter().all(|&d| d == digits[0]);
            repeated
                || digits[9] != check_digit(&digits[..9])
                || digits[10] != check_digit(&digits[..10])
        };
        Self {
            value_missing: digits.is_empty(),
            too_short: !digits.is_empty() && digits.len() < MAX_DIGITS,
            type_mismatch,
        }
    }

    /// True iff no validity flag is set.
    pub fn is_valid(&self) -> bool {
        !(self.value_missing || self.too_short || self.type_mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference vector: 316.757.455-01 is a checksum-valid CPF.
    const VALID: [u8; 11] = [3, 1, 6, 7, 5, 7, 4, 5, 5, 0, 1];

    // ---- check_digit ----

    #[test]
    fn test_first_check_digit_of_known_vector() {
        assert_eq!(check_digit(&VALID[..9]), 0);
    }

    #[test]
    fn test_second_check_digit_of_known_vector() {
        assert_eq!(check_digit(&VALID[..10]), 1);
    }

    #[test]
    fn test_check_digit_zero_when_rem_below_two() {
        // All-zero prefix sums to 0, rem 0 < 2.
        assert_eq!(check_digit(&[0; 9]), 0);
    }

    #[test]
    fn test_check_digit_deterministic() {
        let digits = [9, 8, 7, 6, 5, 4, 3, 2, 1];
        assert_eq!(check_digit(&digits), check_digit(&digits));
    }

    #[test]
    fn test_check_digit_empty_slice() {
        assert_eq!(check_digit(&[]), 0);
    }

    #[test]
    fn test_check_digit_total_over_any_prefix() {
        // Never panics, and always yields a single digit, whatever the
        // slice length.
        for len in 0..=VALID.len() {
            assert!(check_digit(&VALID[..len]) <= 9, "prefix length {len}");
        }
    }

    // ---- Validity ----

    #[test]
    fn test_validity_empty() {
        let v = Validity::of(&[]);
        assert!(v.value_missing);
        assert!(!v.too_short);
        assert!(!v.type_mismatch);
        assert!(!v.is_valid());
    }

    #[test]
    fn test_validity_partial() {
        for len in 1..=10 {
            let v = Validity::of(&VALID[..len]);
            assert!(!v.value_missing);
            assert!(v.too_short, "length {len} should be too short");
            assert!(!v.type_mismatch);
            assert!(!v.is_valid());
        }
    }

    #[test]
    fn test_validity_complete_and_consistent() {
        let v = Validity::of(&VALID);
        assert_eq!(v, Validity::default());
        assert!(v.is_valid());
    }

    #[test]
    fn test_validity_bad_check_digit() {
        let mut digits = VALID;
        digits[10] = 2;
        let v = Validity::of(&digits);
        assert!(v.type_mismatch);
        assert!(!v.is_valid());
    }

    #[test]
    fn test_validity_repeated_digits_rejected() {
        // [d; 11] passes the checksum for every d, so the repeated-digit
        // rule must be checked independently of the check digits.
        for d in 0..=9 {
            let v = Validity::of(&[d; 11]);
            assert!(v.type_mismatch, "repeated digit {d} should mismatch");
            assert!(!v.is_valid());
        }
    }

    #[test]
    fn test_validity_serde_roundtrip() {
        let v = Validity::of(&VALID[..4]);
        let json = serde_json::to_string(&v).unwrap();
        let parsed: Validity = serde_json::from_str(&json).unwrap();
        assert_eq!(v, parsed);
    }
}
