//! # valocracy-ledger — Decaying voting-power ledger.
//!
//! Each account holds a principal and the timestamp of its last mint. The
//! observable balance melts from the full principal to zero over the
//! configured vacation period, following the descending exponential curve
//! from valocracy-curves.
//!
//! Minting adds to the stored principal and restarts the account's decay
//! clock. Reads recompute the balance from the stored record on every call.

pub mod config;
pub mod ledger;

pub use config::DecayConfig;
pub use ledger::DecayLedger;
