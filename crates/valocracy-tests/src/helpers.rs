//! Shared test helpers for integration tests.

use valocracy_core::constants::{SCALE, SECONDS_PER_DAY};
use valocracy_core::types::AccountId;
use valocracy_ledger::{DecayConfig, DecayLedger};

/// A fixed mint timestamp (2023-11-14T22:13:20Z).
pub const T0: u64 = 1_700_000_000;

/// Simple account id from a seed byte.
pub fn account(seed: u8) -> AccountId {
    AccountId([seed; 20])
}

/// `n` whole units in fixed point.
pub fn units(n: u128) -> u128 {
    n * SCALE
}

/// `n` days in seconds.
pub fn days(n: u64) -> u64 {
    n * SECONDS_PER_DAY
}

/// Ledger with the given curvature and a vacation period of `vacation_days`.
pub fn ledger(curvature: i32, vacation_days: u64) -> DecayLedger {
    DecayLedger::new(DecayConfig::with_vacation_days(curvature, vacation_days))
}
