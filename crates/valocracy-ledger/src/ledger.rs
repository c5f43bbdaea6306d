//! Per-account decay state and balance computation.
//!
//! [`DecayLedger`] stores one [`DecayRecord`] per account and derives the
//! live balance on read:
//!
//! ```text
//! balance = principal * curve(now, ref, ref + vacation, curvature, descending) / SCALE
//! ```
//!
//! Not thread-safe for mutation — callers should wrap in a `Mutex` or
//! `RwLock` if concurrent access is needed. Each call reads `now` once, from
//! its argument.

use std::collections::HashMap;

use tracing::{debug, info};
use valocracy_core::error::{CurveError, LedgerError};
use valocracy_core::traits::CurveEvaluator;
use valocracy_core::types::{AccountId, DecayRecord};
use valocracy_curves::ExpCurve;

use crate::config::DecayConfig;

/// Voting-power ledger whose balances decay along an exponential curve.
///
/// Generic over the [`CurveEvaluator`] so tests can substitute a simpler
/// curve; production code uses [`ExpCurve`].
#[derive(Debug, Clone, Default)]
pub struct DecayLedger<C: CurveEvaluator = ExpCurve> {
    config: DecayConfig,
    records: HashMap<AccountId, DecayRecord>,
    curve: C,
}

impl DecayLedger<ExpCurve> {
    /// Create an empty ledger with the production curve.
    pub fn new(config: DecayConfig) -> Self {
        Self::with_curve(config, ExpCurve::new())
    }
}

impl<C: CurveEvaluator> DecayLedger<C> {
    /// Create an empty ledger evaluating balances with `curve`.
    pub fn with_curve(config: DecayConfig, curve: C) -> Self {
        Self {
            config,
            records: HashMap::new(),
            curve,
        }
    }

    /// Current global configuration.
    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    /// Replace the curvature. Validated lazily by the next balance query.
    pub fn set_curvature(&mut self, curvature: i32) {
        info!(old = self.config.curvature, new = curvature, "curvature updated");
        self.config.curvature = curvature;
    }

    /// Replace the vacation period. Validated lazily by the next balance query.
    pub fn set_vacation_period(&mut self, vacation_period: u64) {
        info!(
            old = self.config.vacation_period,
            new = vacation_period,
            "vacation period updated"
        );
        self.config.vacation_period = vacation_period;
    }

    /// Credit `amount` to `account` and restart its decay clock at `now`.
    ///
    /// The amount is added to the *stored* principal, not to the decayed
    /// live balance. Returns the updated record.
    ///
    /// # Errors
    ///
    /// [`LedgerError::PrincipalOverflow`] if the new principal exceeds `u128`.
    /// The record is left untouched in that case.
    pub fn mint(
        &mut self,
        account: AccountId,
        amount: u128,
        now: u64,
    ) -> Result<DecayRecord, LedgerError> {
        let record = self.records.entry(account).or_default();
        let principal = record
            .principal
            .checked_add(amount)
            .ok_or(LedgerError::PrincipalOverflow(account))?;

        record.principal = principal;
        record.reference_time = now;

        debug!(%account, amount, principal, now, "minted voting power");
        Ok(*record)
    }

    /// Raw stored record of `account`. Unknown accounts read as the zero record.
    pub fn voting_power(&self, account: &AccountId) -> DecayRecord {
        self.records.get(account).copied().unwrap_or_default()
    }

    /// Live, decayed balance of `account` at `now`.
    ///
    /// Equals the principal at the reference time and 0 once the vacation
    /// period has elapsed.
    ///
    /// # Errors
    ///
    /// Curve failures surface unchanged:
    /// - [`CurveError::InvalidCurvature`] while the curvature is unset or out of range
    /// - [`CurveError::InvalidInitialTimeframe`] if the vacation period is 0
    ///   or `now` precedes the account's reference time
    pub fn balance_of(&self, account: &AccountId, now: u64) -> Result<u128, CurveError> {
        let record = self.voting_power(account);
        self.decayed(&record, now)
    }

    /// Timestamp from which `account`'s balance reads as 0.
    pub fn fully_decayed_at(&self, account: &AccountId) -> u64 {
        self.config
            .window_end(self.voting_power(account).reference_time)
    }

    /// Sum of all stored principals, saturating at `u128::MAX`.
    pub fn total_principal(&self) -> u128 {
        self.records
            .values()
            .fold(0u128, |acc, r| acc.saturating_add(r.principal))
    }

    /// Sum of all live balances at `now`.
    ///
    /// # Errors
    ///
    /// The first curve failure encountered, as in [`balance_of`](Self::balance_of).
    pub fn total_voting_power(&self, now: u64) -> Result<u128, CurveError> {
        self.records.values().try_fold(0u128, |acc, record| {
            Ok(acc.saturating_add(self.decayed(record, now)?))
        })
    }

    /// Iterate over every account that has ever been minted to.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountId, &DecayRecord)> {
        self.records.iter()
    }

    /// Number of accounts with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no account has been minted to.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn decayed(&self, record: &DecayRecord, now: u64) -> Result<u128, CurveError> {
        self.curve.decayed_amount(
            record.principal,
            now,
            record.reference_time,
            self.config.window_end(record.reference_time),
            self.config.curvature,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use valocracy_core::constants::{SCALE, SECONDS_PER_DAY};

    const T0: u64 = 1_700_000_000;
    const DAY: u64 = SECONDS_PER_DAY;

    fn alice() -> AccountId {
        AccountId([0xa1; 20])
    }

    fn bob() -> AccountId {
        AccountId([0xb0; 20])
    }

    fn ledger(curvature: i32) -> DecayLedger {
        DecayLedger::new(DecayConfig::with_vacation_days(curvature, 30))
    }

    // --- mint / voting_power ---

    #[test]
    fn voting_power_after_mint_is_raw_record() {
        let mut l = ledger(1_000);
        l.mint(alice(), 300 * SCALE, T0).unwrap();
        assert_eq!(l.voting_power(&alice()), DecayRecord::new(300 * SCALE, T0));
    }

    #[test]
    fn voting_power_of_unknown_account_is_zero() {
        let l = ledger(1_000);
        assert_eq!(l.voting_power(&bob()), DecayRecord::default());
    }

    #[test]
    fn mint_compounds_stored_principal_and_resets_clock() {
        let mut l = ledger(1_000);
        l.mint(alice(), 300 * SCALE, T0).unwrap();
        let record = l.mint(alice(), 100 * SCALE, T0 + 10 * DAY).unwrap();
        assert_eq!(record, DecayRecord::new(400 * SCALE, T0 + 10 * DAY));
        // The decayed part of the first mint is restored by the second.
        assert_eq!(l.balance_of(&alice(), T0 + 10 * DAY).unwrap(), 400 * SCALE);
    }

    #[test]
    fn mint_overflow_leaves_record_untouched() {
        let mut l = ledger(1_000);
        l.mint(alice(), u128::MAX, T0).unwrap();
        let err = l.mint(alice(), 1, T0 + 1).unwrap_err();
        assert_eq!(err, LedgerError::PrincipalOverflow(alice()));
        assert_eq!(l.voting_power(&alice()), DecayRecord::new(u128::MAX, T0));
    }

    #[test]
    fn mint_zero_still_resets_clock() {
        let mut l = ledger(1_000);
        l.mint(alice(), 300 * SCALE, T0).unwrap();
        l.mint(alice(), 0, T0 + DAY).unwrap();
        assert_eq!(l.voting_power(&alice()).reference_time, T0 + DAY);
        assert_eq!(l.balance_of(&alice(), T0 + DAY).unwrap(), 300 * SCALE);
    }

    // --- balance_of ---

    #[test]
    fn balance_full_at_mint_and_zero_after_vacation() {
        let mut l = ledger(1_000);
        l.mint(alice(), 300 * SCALE, T0).unwrap();
        assert_eq!(l.balance_of(&alice(), T0).unwrap(), 300 * SCALE);
        assert_eq!(l.balance_of(&alice(), T0 + 30 * DAY).unwrap(), 0);
        assert_eq!(l.balance_of(&alice(), T0 + 365 * DAY).unwrap(), 0);
    }

    #[test]
    fn balance_reference_values() {
        let mut l = ledger(1_000);
        l.mint(alice(), 300 * SCALE, T0).unwrap();
        assert_eq!(
            l.balance_of(&alice(), T0 + DAY).unwrap(),
            294_082_150_037_522_439_900
        );
        assert_eq!(
            l.balance_of(&alice(), T0 + 15 * DAY).unwrap(),
            186_737_799_360_556_369_800
        );
    }

    #[test]
    fn balance_strictly_decreases_daily() {
        for curvature in [1, -1, 1_000, -1_000, 10_000, -10_000] {
            let mut l = ledger(curvature);
            l.mint(alice(), 300 * SCALE, T0).unwrap();
            let mut prev = l.balance_of(&alice(), T0).unwrap();
            for day in 1..=30 {
                let bal = l.balance_of(&alice(), T0 + day * DAY).unwrap();
                assert!(bal < prev, "curvature {curvature}, day {day}: {bal} >= {prev}");
                prev = bal;
            }
        }
    }

    #[test]
    fn balance_of_unknown_account_is_zero() {
        let l = ledger(1_000);
        assert_eq!(l.balance_of(&bob(), T0).unwrap(), 0);
    }

    #[test]
    fn unconfigured_ledger_fails_with_invalid_curvature() {
        let mut l = DecayLedger::new(DecayConfig::default());
        l.mint(alice(), 300 * SCALE, T0).unwrap();
        assert_eq!(
            l.balance_of(&alice(), T0),
            Err(CurveError::InvalidCurvature(0))
        );
        // Unknown accounts fail the same way until the ledger is configured.
        assert_eq!(l.balance_of(&bob(), T0), Err(CurveError::InvalidCurvature(0)));
    }

    #[test]
    fn missing_vacation_period_fails_with_invalid_timeframe() {
        let mut l = DecayLedger::new(DecayConfig::new(1_000, 0));
        l.mint(alice(), 300 * SCALE, T0).unwrap();
        assert_eq!(
            l.balance_of(&alice(), T0),
            Err(CurveError::InvalidInitialTimeframe)
        );
    }

    #[test]
    fn query_before_reference_time_fails() {
        let mut l = ledger(1_000);
        l.mint(alice(), 300 * SCALE, T0).unwrap();
        assert_eq!(
            l.balance_of(&alice(), T0 - 1),
            Err(CurveError::InvalidInitialTimeframe)
        );
    }

    #[test]
    fn fixing_configuration_recovers_balance_queries() {
        let mut l = DecayLedger::new(DecayConfig::default());
        l.mint(alice(), 300 * SCALE, T0).unwrap();
        assert!(l.balance_of(&alice(), T0).is_err());
        l.set_curvature(-1_000);
        l.set_vacation_period(30 * DAY);
        assert_eq!(l.balance_of(&alice(), T0).unwrap(), 300 * SCALE);
        assert_eq!(l.config(), &DecayConfig::with_vacation_days(-1_000, 30));
    }

    #[test]
    fn setters_accept_invalid_values_lazily() {
        let mut l = ledger(1_000);
        l.mint(alice(), SCALE, T0).unwrap();
        l.set_curvature(10_001);
        assert_eq!(l.config().curvature, 10_001);
        assert_eq!(
            l.balance_of(&alice(), T0),
            Err(CurveError::InvalidCurvature(10_001))
        );
    }

    // --- aggregates ---

    #[test]
    fn totals_over_accounts() {
        let mut l = ledger(1_000);
        assert!(l.is_empty());
        l.mint(alice(), 300 * SCALE, T0).unwrap();
        l.mint(bob(), 100 * SCALE, T0 + 30 * DAY).unwrap();
        assert_eq!(l.len(), 2);
        assert_eq!(l.total_principal(), 400 * SCALE);
        // alice has fully decayed by the time bob mints.
        assert_eq!(l.total_voting_power(T0 + 30 * DAY).unwrap(), 100 * SCALE);
        assert_eq!(l.accounts().count(), 2);
    }

    #[test]
    fn total_voting_power_propagates_errors() {
        let mut l = ledger(1_000);
        l.mint(alice(), SCALE, T0).unwrap();
        assert_eq!(
            l.total_voting_power(T0 - 1),
            Err(CurveError::InvalidInitialTimeframe)
        );
    }

    #[test]
    fn fully_decayed_at_tracks_last_mint() {
        let mut l = ledger(1_000);
        l.mint(alice(), SCALE, T0).unwrap();
        assert_eq!(l.fully_decayed_at(&alice()), T0 + 30 * DAY);
        l.mint(alice(), SCALE, T0 + 5 * DAY).unwrap();
        assert_eq!(l.fully_decayed_at(&alice()), T0 + 35 * DAY);
    }

    // --- custom curve ---

    /// Steps from full to zero halfway through the window.
    struct Cliff;

    impl CurveEvaluator for Cliff {
        fn curve_normalization(
            &self,
            current_time: u64,
            window_start: u64,
            window_end: u64,
            _curvature: i32,
            ascending: bool,
        ) -> Result<u128, CurveError> {
            let half = window_start + (window_end - window_start) / 2;
            let up = if current_time >= half { SCALE } else { 0 };
            Ok(if ascending { up } else { SCALE - up })
        }
    }

    #[test]
    fn ledger_uses_supplied_curve() {
        let mut l = DecayLedger::with_curve(DecayConfig::new(1, 100), Cliff);
        l.mint(alice(), 50, 0).unwrap();
        assert_eq!(l.balance_of(&alice(), 49).unwrap(), 50);
        assert_eq!(l.balance_of(&alice(), 50).unwrap(), 0);
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn balance_never_exceeds_principal(
            amount in 0u128..=1_000_000_000 * SCALE,
            curvature in prop_oneof![1i32..=10_000, -10_000i32..=-1],
            elapsed in 0u64..=60 * DAY,
        ) {
            let mut l = ledger(curvature);
            l.mint(alice(), amount, T0).unwrap();
            let bal = l.balance_of(&alice(), T0 + elapsed).unwrap();
            prop_assert!(bal <= amount);
        }

        #[test]
        fn balance_non_increasing_over_time(
            amount in 1u128..=1_000_000_000 * SCALE,
            curvature in prop_oneof![1i32..=10_000, -10_000i32..=-1],
            a in 0u64..=31 * DAY,
            b in 0u64..=31 * DAY,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let mut l = ledger(curvature);
            l.mint(alice(), amount, T0).unwrap();
            let early = l.balance_of(&alice(), T0 + lo).unwrap();
            let late = l.balance_of(&alice(), T0 + hi).unwrap();
            prop_assert!(early >= late, "balance grew: {} -> {}", early, late);
        }
    }
}
