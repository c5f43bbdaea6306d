//! Trait interfaces for Valocracy.
//!
//! - [`CurveEvaluator`] — normalized progress curve (valocracy-curves implements)
//!
//! The ledger (valocracy-ledger) is generic over [`CurveEvaluator`] so the
//! curve engine stays stateless and can be swapped in tests.

use crate::constants::{PERCENT, SCALE};
use crate::error::CurveError;
use crate::fixed::mul_div;

/// Pure evaluation of a bounded progress curve over a time window.
///
/// All values use fixed point with [`SCALE`] = 1.0. Implementations must be
/// deterministic: the same inputs always produce the same output.
pub trait CurveEvaluator: Send + Sync {
    /// Normalized curve value in `[0, SCALE]` at `current_time`.
    ///
    /// Ascending curves go from 0 at `window_start` to `SCALE` at
    /// `window_end`; descending curves go the other way.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidCurvature`] for a curvature outside the accepted range
    /// - [`CurveError::InvalidInitialTimeframe`] if `window_start >= window_end`
    ///   or `current_time < window_start`
    fn curve_normalization(
        &self,
        current_time: u64,
        window_start: u64,
        window_end: u64,
        curvature: i32,
        ascending: bool,
    ) -> Result<u128, CurveError>;

    /// Curve value as a percentage in `[0, 100 * SCALE]`.
    ///
    /// Default implementation: `curve_normalization(...) * 100`.
    fn curve_scaling(
        &self,
        current_time: u64,
        window_start: u64,
        window_end: u64,
        curvature: i32,
        ascending: bool,
    ) -> Result<u128, CurveError> {
        let ratio =
            self.curve_normalization(current_time, window_start, window_end, curvature, ascending)?;
        Ok(ratio * PERCENT)
    }

    /// `amount` scaled by the descending curve at `current_time`.
    ///
    /// Equals `amount` at `window_start` and 0 from `window_end` on.
    fn decayed_amount(
        &self,
        amount: u128,
        current_time: u64,
        window_start: u64,
        window_end: u64,
        curvature: i32,
    ) -> Result<u128, CurveError> {
        let ratio =
            self.curve_normalization(current_time, window_start, window_end, curvature, false)?;
        Ok(mul_div(amount, ratio, SCALE))
    }
}
