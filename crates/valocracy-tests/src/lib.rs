//! Cross-crate test suite for Valocracy.
//!
//! Integration tests that drive the curve engine and the ledger together,
//! checking the curve properties and decay scenarios end to end.

pub mod helpers;
