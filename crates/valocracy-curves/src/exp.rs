//! Fixed-point exponential via its power series.
//!
//! `e^x = sum(x^n / n!)` with each term derived from the previous one as
//! `term * x / n`. Terms are carried at [`WIDE_SCALE`] (`10^36`) and the sum
//! is floored to `10^18` once at the end, so truncation in individual terms
//! stays below the output unit. Every term is a non-decreasing function of
//! `x`, so the partial sum and its floor are too: the approximation is
//! monotone, which keeps normalized curves inside `[0, 1]`.
//!
//! Inputs are bounded by the curvature range (`|x| <= 10`), where the largest
//! intermediate product is about `2.8 * 10^76`, below the `1.15 * 10^77`
//! limit of [`U256`].

use valocracy_core::constants::{EXP_MAX_TERMS, SCALE};
use valocracy_core::fixed::U256;

/// Internal precision of the series: `SCALE` plus 18 guard digits.
const WIDE_SCALE: u128 = SCALE * SCALE;

/// `e^x` at [`WIDE_SCALE`] for a non-negative `x` at `SCALE`.
fn exp_series_wide(x: u128) -> U256 {
    let wide = U256::from(WIDE_SCALE);
    let x = U256::from(x) * U256::from(SCALE);
    let mut term = wide;
    let mut sum = wide;

    for n in 1..=EXP_MAX_TERMS {
        term = term * x / (U256::from(n) * wide);
        if term.is_zero() {
            break;
        }
        sum += term;
    }

    sum
}

/// `e^x` for a non-negative fixed-point `x`, returned in fixed point.
///
/// Stops once a term truncates to zero at the internal precision, or after
/// [`EXP_MAX_TERMS`] terms.
pub fn exp_series(x: u128) -> u128 {
    (exp_series_wide(x) / U256::from(SCALE)).as_u128()
}

/// `e^x` for a signed fixed-point `x`, returned in fixed point.
///
/// Negative exponents use the reciprocal `SCALE * WIDE_SCALE / e^|x|`, taken
/// against the wide sum, which keeps the result non-decreasing across the
/// whole domain.
pub fn exp_fixed(x: i128) -> u128 {
    if x >= 0 {
        return exp_series(x.unsigned_abs());
    }
    let numerator = U256::from(SCALE) * U256::from(WIDE_SCALE);
    (numerator / exp_series_wide(x.unsigned_abs())).as_u128()
}
