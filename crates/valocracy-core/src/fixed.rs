//! 256-bit intermediates for fixed-point products.
//!
//! Every product of two `10^18`-scaled values can exceed `u128`, so they are
//! widened to [`U256`] before the division that brings them back to scale.

use uint::construct_uint;

use crate::constants::SCALE;

construct_uint! {
    /// Fixed-width 256-bit unsigned integer for intermediate products.
    pub struct U256(4);
}

/// `a * b / denominator` with a 256-bit intermediate, rounding down.
///
/// Callers guarantee `denominator != 0` and that the quotient fits `u128`
/// (true whenever `b <= denominator`). A violation is a bug and panics.
pub fn mul_div(a: u128, b: u128, denominator: u128) -> u128 {
    (U256::from(a) * U256::from(b) / U256::from(denominator)).as_u128()
}

/// Render a fixed-point value as a decimal string with all 18 fractional digits.
///
/// `format_scaled(1_500_000_000_000_000_000)` is `"1.500000000000000000"`.
pub fn format_scaled(value: u128) -> String {
    format!("{}.{:018}", value / SCALE, value % SCALE)
}
