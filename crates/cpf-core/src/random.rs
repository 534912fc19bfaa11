//! # Random Generation — Checksum-Valid Documents
//!
//! Generates complete 11-digit documents: 9 uniformly random digits
//! followed by the two check digits derived from them. The result always
//! passes checksum validation; the improbable all-identical-digit pattern
//! is not excluded, so callers needing that guarantee must post-check
//! [`Cpf::is_valid()`].

use rand::Rng;

use crate::checksum::check_digit;
use crate::document::{Cpf, MAX_DIGITS};

impl Cpf {
    /// Generate a random, checksum-valid document from the operating
    /// system RNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rngs::OsRng)
    }

    /// Generate a random, checksum-valid document from the given RNG.
    ///
    /// Useful for deterministic generation in tests.
    pub fn generate_with<R: Rng>(rng: &mut R) -> Self {
        let mut digits = [0u8; MAX_DIGITS];
        for digit in digits.iter_mut().take(9) {
            *digit = rng.gen_range(0..10);
        }
        digits[9] = check_digit(&digits[..9]);
        digits[10] = check_digit(&digits[..10]);
        Self::from_digits(digits)
    }
}
