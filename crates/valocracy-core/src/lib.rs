//! # valocracy-core
//! Foundation types and traits shared by the Valocracy curve engine and ledger.

pub mod constants;
pub mod error;
pub mod fixed;
pub mod traits;
pub mod types;
