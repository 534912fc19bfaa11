//! # Error Types
//!
//! The CPF document is a pure value type, so almost every operation on it is
//! total: construction and parsing degrade instead of failing, and indexed
//! reads return `None` for out-of-range positions. The single fallible
//! operation is [`Cpf::with()`](crate::Cpf::with), which rejects replacement
//! at an index outside the stored digit range.
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.

use thiserror::Error;

/// Error type for CPF document operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpfError {
    /// Digit replacement was requested at an index outside the stored
    /// digit range. `index` is the caller's original (possibly negative)
    /// index, before from-the-end normalization.
    #[error("digit index {index} out of range for document with {len} digit(s)")]
    IndexOutOfRange {
        /// The index as supplied by the caller.
        index: isize,
        /// The number of digits in the document.
        len: usize,
    },
}
