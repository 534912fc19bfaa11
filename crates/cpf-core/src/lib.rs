//! # cpf-core — The CPF Document Value Object
//!
//! This crate defines [`Cpf`], an immutable value object for the Brazilian
//! individual taxpayer identification number (CPF): an ordered sequence of
//! 0 to 11 decimal digits with two mod-11 weighted check digits.
//!
//! ## Key Design Principles
//!
//! 1. **One value type, total operations.** Construction, parsing, validity
//!    inspection and formatting never fail. Malformed input degrades to a
//!    shorter (possibly empty) digit sequence; the structured [`Validity`]
//!    result says why a document is incomplete or inconsistent.
//!
//! 2. **Canonical nil.** Every construction path that yields zero digits
//!    returns [`Cpf::NIL`], so all empty documents compare and hash
//!    identically.
//!
//! 3. **Content-derived hashing.** The structural hash is a pure function
//!    of the digit sequence, seeded by a fixed namespace and stable across
//!    instances and processes. It is computed lazily and cached; the digit
//!    sequence never changes after construction, so the cache is safe under
//!    concurrent first access.
//!
//! 4. **Plain-digit serialization.** The canonical serialized form is the
//!    bare digit string (`"31675745501"`, empty for nil), and that string is
//!    also the JSON representation.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests; the single fallible
//!   operation is digit replacement with an out-of-range index.
//! - All public types derive `Debug` and `Clone` and implement
//!   `Serialize`/`Deserialize`.

pub mod checksum;
pub mod document;
pub mod error;

mod random;

// Re-export primary types for ergonomic imports.
pub use checksum::{check_digit, Validity};
pub use document::{Cpf, MAX_DIGITS};
pub use error::CpfError;
