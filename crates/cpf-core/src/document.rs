//! # Document — The CPF Value Object
//!
//! Defines [`Cpf`], an immutable sequence of 0 to 11 decimal digits with
//! value-object semantics: structural equality, a content-derived cached
//! hash, graceful formatting, and plain-digit-string serialization.
//!
//! ## Invariants
//!
//! - The digit count never exceeds [`MAX_DIGITS`]; every stored digit is
//!   in `0..=9`.
//! - The digit sequence is fixed at construction. The only "mutation" is
//!   [`Cpf::with()`], which returns a new instance.
//! - Every construction path that yields zero digits returns [`Cpf::NIL`],
//!   so all empty documents compare and hash identically.
//! - The structural hash is a pure function of the digit sequence, cached
//!   lazily. Concurrent first access at worst recomputes the same value.

use std::sync::OnceLock;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;

use crate::checksum::Validity;
use crate::error::CpfError;

/// Maximum number of digits in a CPF document.
pub const MAX_DIGITS: usize = 11;

/// Namespace prefix mixed into the structural hash so CPF hashes do not
/// collide with hashes of the same digit bytes used for other purposes.
const HASH_NAMESPACE: &[u8] = b"cpf.document.v1";

/// An immutable CPF document holding 0 to 11 decimal digits.
///
/// Digits are stored inline, so the type never heap-allocates and `Clone`
/// is a plain copy. Construction is total: out-of-range numeric input is
/// reduced to a digit, non-finite input is skipped, and overlong input is
/// truncated to [`MAX_DIGITS`].
///
/// # Construction
///
/// - [`Cpf::new()`] — from arbitrary numeric values.
/// - [`Cpf::from_digits()`] — from integer digits.
/// - [`Cpf::parse()`] — from free-form text.
/// - [`Cpf::generate()`] — random, checksum-valid.
#[derive(Clone)]
pub struct Cpf {
    digits: [u8; MAX_DIGITS],
    len: u8,
    hash: OnceLock<u64>,
}

impl Cpf {
    /// The canonical empty document. All zero-digit construction paths
    /// return this value.
    pub const NIL: Cpf = Cpf {
        digits: [0; MAX_DIGITS],
        len: 0,
        hash: OnceLock::new(),
    };

    /// Build a document from arbitrary numeric values.
    ///
    /// Each value is reduced to a single digit by truncating toward zero
    /// and taking the result modulo 10, re-normalized into `0..=9` (Rust's
    /// `%` preserves sign, so negative inputs go through `rem_euclid`:
    /// `-3.0` becomes digit 7). Non-finite values (NaN, ±infinity) are
    /// skipped entirely — they do not consume a digit slot. Input beyond
    /// [`MAX_DIGITS`] digits is ignored.
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::collect(values.into_iter().filter_map(coerce_digit))
    }

    /// Build a document from integer digit values.
    ///
    /// Values are reduced modulo 10; input beyond [`MAX_DIGITS`] digits
    /// is ignored.
    pub fn from_digits<I>(digits: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        Self::collect(digits.into_iter().map(|d| d % 10))
    }

    /// Extract a document from free-form text. Never fails.
    ///
    /// The input is NFKD-decomposed first, so combining diacritics cannot
    /// interfere with digit detection and compatibility forms such as
    /// fullwidth digits normalize to ASCII. Every ASCII digit is then
    /// collected left to right and all other characters are discarded.
    /// Text with no digits yields [`Cpf::NIL`].
    pub fn parse(input: &str) -> Self {
        Self::collect(
            input
                .nfkd()
                .filter(char::is_ascii_digit)
                .map(|c| c as u8 - b'0'),
        )
    }

    /// Collect at most [`MAX_DIGITS`] already-normalized digits.
    fn collect<I>(digits: I) -> Self
    where
        I: Iterator<Item = u8>,
    {
        let mut buf = [0u8; MAX_DIGITS];
        let mut len = 0usize;
        for digit in digits.take(MAX_DIGITS) {
            buf[len] = digit;
            len += 1;
        }
        if len == 0 {
            return Self::NIL;
        }
        Self {
            digits: buf,
            len: len as u8,
            hash: OnceLock::new(),
        }
    }

    // -----------------------------------------------------------------
    // Structured access
    // -----------------------------------------------------------------

    /// Number of stored digits (0 to 11).
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// True iff the document holds zero digits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The stored digits as a slice.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len()]
    }

    /// Copy the digits into a fresh `Vec`.
    pub fn to_vec(&self) -> Vec<u8> {
        self.digits().to_vec()
    }

    /// Iterate over the digits in order. The view is finite and
    /// restartable; call again for a fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.digits().iter().copied()
    }

    /// Read the digit at `index`, with negative indices counting from the
    /// end (`-1` is the last digit). Out-of-range indices yield `None`.
    pub fn get(&self, index: isize) -> Option<u8> {
        self.normalize_index(index).map(|i| self.digits[i])
    }

    /// Return a copy of this document with the digit at `index` replaced.
    ///
    /// The replacement value is normalized exactly like construction
    /// input: truncate toward zero, reduce modulo 10 into `0..=9`. A
    /// non-finite replacement contributes no digit, so the document is
    /// returned unchanged, as is a replacement equal to the current digit.
    ///
    /// # Errors
    ///
    /// Returns [`CpfError::IndexOutOfRange`] if `index`, after
    /// negative-from-end normalization, falls outside the stored digits.
    pub fn with(&self, index: isize, value: f64) -> Result<Self, CpfError> {
        let i = self
            .normalize_index(index)
            .ok_or(CpfError::IndexOutOfRange {
                index,
                len: self.len(),
            })?;
        match coerce_digit(value) {
            Some(digit) if digit != self.digits[i] => {
                let mut digits = self.digits;
                digits[i] = digit;
                Ok(Self {
                    digits,
                    len: self.len,
                    hash: OnceLock::new(),
                })
            }
            _ => Ok(self.clone()),
        }
    }

    /// Map a possibly-negative index into `0..len`, or `None` when the
    /// index is out of range.
    fn normalize_index(&self, index: isize) -> Option<usize> {
        let len = self.len() as isize;
        let i = if index < 0 { index + len } else { index };
        (0..len).contains(&i).then(|| i as usize)
    }

    // -----------------------------------------------------------------
    // Validity
    // -----------------------------------------------------------------

    /// Compute the structured validity state of this document.
    pub fn validity(&self) -> Validity {
        Validity::of(self.digits())
    }

    /// True iff the document is complete and checksum-consistent: exactly
    /// 11 digits, not all identical, and both check digits match.
    pub fn is_valid(&self) -> bool {
        self.validity().is_valid()
    }

    // -----------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------

    /// Render the canonical `###.###.###-##` layout, degrading gracefully
    /// for incomplete documents: each separator is emitted only when the
    /// group after it has at least one digit. Nil renders as `""`.
    pub fn format(&self) -> String {
        let mut out = String::with_capacity(MAX_DIGITS + 3);
        for (i, digit) in self.iter().enumerate() {
            match i {
                3 | 6 => out.push('.'),
                9 => out.push('-'),
                _ => {}
            }
            out.push(char::from(b'0' + digit));
        }
        out
    }

    /// Render the canonical serialized form: exactly the stored digits,
    /// no separators. Nil renders as `""`.
    pub fn to_digit_string(&self) -> String {
        self.iter().map(|d| char::from(b'0' + d)).collect()
    }

    // -----------------------------------------------------------------
    // Hashing
    // -----------------------------------------------------------------

    /// The content-derived structural hash of this document.
    ///
    /// A pure function of the digit sequence, seeded by a fixed namespace:
    /// the first 8 bytes (big-endian) of SHA-256 over the namespace
    /// followed by the digit bytes. Equal documents produce equal hashes
    /// across instances and across processes. The empty document hashes
    /// to the well-known constant `0`.
    ///
    /// The value is computed on first request and cached; the digit
    /// sequence is immutable, so a racing recomputation yields the same
    /// value.
    pub fn content_hash(&self) -> u64 {
        *self.hash.get_or_init(|| {
            if self.len == 0 {
                return 0;
            }
            let mut hasher = Sha256::new();
            hasher.update(HASH_NAMESPACE);
            hasher.update(self.digits());
            let digest = hasher.finalize();
            let mut prefix = [0u8; 8];
            prefix.copy_from_slice(&digest[..8]);
            u64::from_be_bytes(prefix)
        })
    }
}

// ---------------------------------------------------------------------------
// Digit coercion
// ---------------------------------------------------------------------------

/// Reduce a numeric value to a single digit: truncate toward zero, then
/// take the value modulo 10 normalized into `0..=9`. Non-finite values
/// produce no digit.
fn coerce_digit(value: f64) -> Option<u8> {
    if !value.is_finite() {
        return None;
    }
    Some((value.trunc() as i64).rem_euclid(10) as u8)
}

// ---------------------------------------------------------------------------
// Value-object trait impls
// ---------------------------------------------------------------------------

impl PartialEq for Cpf {
    /// Structural equality: same digit count, identical digits at every
    /// index. The cached hash does not participate.
    fn eq(&self, other: &Self) -> bool {
        self.digits() == other.digits()
    }
}

impl Eq for Cpf {}

impl std::hash::Hash for Cpf {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash());
    }
}

impl Default for Cpf {
    fn default() -> Self {
        Self::NIL
    }
}

impl std::fmt::Debug for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cpf({})", self.format())
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

impl std::str::FromStr for Cpf {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Cpf {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a Cpf {
    type Item = u8;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.digits().iter().copied()
    }
}

impl Serialize for Cpf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_digit_string())
    }
}

impl<'de> Deserialize<'de> for Cpf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
