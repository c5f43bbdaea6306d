//! Protocol constants. All ratios and amounts are fixed point with [`SCALE`] = 1.0.

/// Fixed-point unit: the integer `10^18` denotes the real value 1.0.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Multiplier turning a normalized ratio into a percentage.
pub const PERCENT: u128 = 100;

/// 100% in percentage fixed point (`100 * 10^18`).
pub const PERCENT_SCALE: u128 = PERCENT * SCALE;

/// Largest accepted curvature magnitude.
pub const MAX_CURVATURE: i32 = 10_000;

/// Curvature units per unit of exponent.
///
/// A curvature of `c` bends the curve with exponent coefficient `k = c / 1000`,
/// so the accepted range maps to `|k| <= 10`.
pub const CURVATURE_PRECISION: u128 = 1_000;

/// Upper bound on power-series terms for the fixed-point exponential.
///
/// At the largest exponent (`x = 10`) terms truncate to zero at the series'
/// `10^36` working precision after 77 iterations.
pub const EXP_MAX_TERMS: u32 = 96;

/// Most intervals a sampled curve is split into.
pub const MAX_SAMPLE_STEPS: u32 = 10_000;

/// Seconds in one day, for configuring vacation periods.
pub const SECONDS_PER_DAY: u64 = 86_400;
