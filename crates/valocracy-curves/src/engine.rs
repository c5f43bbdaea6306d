//! Curve engine implementing the [`CurveEvaluator`] trait.
//!
//! Maps a point in a time window to the bounded exponential progress curve.
//! Validation runs before any arithmetic: curvature first, then the
//! timeframe. Points at or past the window end are clamped to the terminal
//! value instead of being derived from the series.

use tracing::trace;
use valocracy_core::constants::{
    CURVATURE_PRECISION, MAX_CURVATURE, MAX_SAMPLE_STEPS, PERCENT, SCALE,
};
use valocracy_core::error::CurveError;
use valocracy_core::fixed::mul_div;
use valocracy_core::traits::CurveEvaluator;

use crate::exp::exp_fixed;

/// The production curve evaluator.
///
/// Stateless: curvature and window are supplied on every call, so one
/// instance can be shared freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpCurve;

impl ExpCurve {
    /// Create a new ExpCurve.
    pub fn new() -> Self {
        Self
    }
}

impl CurveEvaluator for ExpCurve {
    fn curve_normalization(
        &self,
        current_time: u64,
        window_start: u64,
        window_end: u64,
        curvature: i32,
        ascending: bool,
    ) -> Result<u128, CurveError> {
        curve_normalization(current_time, window_start, window_end, curvature, ascending)
    }
}

/// Length of the window. An inverted window saturates to 0.
pub fn total_time_interval(window_start: u64, window_end: u64) -> u64 {
    window_end.saturating_sub(window_start)
}

/// Time elapsed since the window opened.
///
/// # Errors
///
/// [`CurveError::InvalidInitialTimeframe`] if `current_time < window_start`.
pub fn time_delta(current_time: u64, window_start: u64) -> Result<u64, CurveError> {
    current_time
        .checked_sub(window_start)
        .ok_or(CurveError::InvalidInitialTimeframe)
}

/// Fraction of the window elapsed at `current_time`, in `[0, SCALE]`.
///
/// Clamped to `SCALE` once `current_time >= window_end`.
///
/// # Errors
///
/// [`CurveError::InvalidInitialTimeframe`] if `window_start >= window_end`
/// or `current_time < window_start`.
pub fn time_elapsed_ratio(
    current_time: u64,
    window_start: u64,
    window_end: u64,
) -> Result<u128, CurveError> {
    if window_start >= window_end {
        return Err(CurveError::InvalidInitialTimeframe);
    }
    let delta = time_delta(current_time, window_start)?;
    let total = total_time_interval(window_start, window_end);
    if delta >= total {
        return Ok(SCALE);
    }
    // delta < 2^64, so delta * SCALE < 2^124
    Ok(delta as u128 * SCALE / total as u128)
}

/// Reject curvature 0 and magnitudes above [`MAX_CURVATURE`].
pub fn validate_curvature(curvature: i32) -> Result<(), CurveError> {
    if curvature == 0 || curvature.unsigned_abs() > MAX_CURVATURE.unsigned_abs() {
        return Err(CurveError::InvalidCurvature(curvature));
    }
    Ok(())
}

/// Signed fixed-point exponent `k * ratio` with `k = curvature / 1000`.
///
/// The magnitude is truncated before the sign is applied, so it is
/// non-decreasing in `ratio` for either sign.
fn exponent(ratio: u128, curvature: i32) -> i128 {
    let magnitude = (curvature.unsigned_abs() as u128 * ratio / CURVATURE_PRECISION) as i128;
    if curvature < 0 { -magnitude } else { magnitude }
}

/// `e^(k * ratio) - 1` in fixed point. Same sign as the curvature.
fn shifted_exp(ratio: u128, curvature: i32) -> i128 {
    exp_fixed(exponent(ratio, curvature)) as i128 - SCALE as i128
}

/// Normalization denominator `e^k - 1`, the shifted exponential at ratio 1.
///
/// # Errors
///
/// [`CurveError::InvalidCurvature`] for curvature 0 or `|curvature| > 10000`.
pub fn final_exp_scaling(curvature: i32) -> Result<i128, CurveError> {
    validate_curvature(curvature)?;
    Ok(shifted_exp(SCALE, curvature))
}

/// Shifted exponential `e^(k * r) - 1` at the elapsed ratio `r` of
/// `current_time`.
///
/// Zero at the window start; equals [`final_exp_scaling`] from the window
/// end on. Negative for negative curvature.
///
/// # Errors
///
/// As [`final_exp_scaling`] and [`time_elapsed_ratio`].
pub fn exponential(
    current_time: u64,
    window_start: u64,
    window_end: u64,
    curvature: i32,
) -> Result<i128, CurveError> {
    validate_curvature(curvature)?;
    let ratio = time_elapsed_ratio(current_time, window_start, window_end)?;
    Ok(shifted_exp(ratio, curvature))
}

/// Normalized curve value in `[0, SCALE]`.
///
/// Ascending: 0 at `window_start`, `SCALE` at `window_end`.
/// Descending: the complement, `SCALE` down to 0.
///
/// # Errors
///
/// [`CurveError::InvalidCurvature`] is checked before
/// [`CurveError::InvalidInitialTimeframe`].
pub fn curve_normalization(
    current_time: u64,
    window_start: u64,
    window_end: u64,
    curvature: i32,
    ascending: bool,
) -> Result<u128, CurveError> {
    validate_curvature(curvature)?;
    let ratio = time_elapsed_ratio(current_time, window_start, window_end)?;

    if current_time >= window_end {
        trace!(current_time, window_end, ascending, "curve clamped at window end");
        return Ok(if ascending { SCALE } else { 0 });
    }

    // Numerator and denominator share the curvature's sign; divide magnitudes.
    let numerator = shifted_exp(ratio, curvature).unsigned_abs();
    let denominator = shifted_exp(SCALE, curvature).unsigned_abs();
    let progress = mul_div(numerator, SCALE, denominator);
    debug_assert!(progress <= SCALE, "normalized curve overshoot: {progress}");

    Ok(if ascending { progress } else { SCALE - progress })
}

/// Curve value as a percentage in `[0, 100 * SCALE]`.
///
/// Same validation and clamping as [`curve_normalization`].
pub fn curve_scaling(
    current_time: u64,
    window_start: u64,
    window_end: u64,
    curvature: i32,
    ascending: bool,
) -> Result<u128, CurveError> {
    let ratio =
        curve_normalization(current_time, window_start, window_end, curvature, ascending)?;
    Ok(ratio * PERCENT)
}

/// Evaluate the curve at `steps + 1` evenly spaced times, both endpoints included.
///
/// `steps` is clamped to `[1, MAX_SAMPLE_STEPS]`. Returns `(time, value)` pairs
/// in time order.
pub fn sample_curve(
    window_start: u64,
    window_end: u64,
    curvature: i32,
    ascending: bool,
    steps: u32,
) -> Result<Vec<(u64, u128)>, CurveError> {
    validate_curvature(curvature)?;
    if window_start >= window_end {
        return Err(CurveError::InvalidInitialTimeframe);
    }

    let steps = steps.clamp(1, MAX_SAMPLE_STEPS) as u128;
    let total = total_time_interval(window_start, window_end) as u128;
    let mut points = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let time = window_start + (total * i / steps) as u64;
        let value = curve_normalization(time, window_start, window_end, curvature, ascending)?;
        points.push((time, value));
    }
    trace!(points = points.len(), curvature, "sampled curve");
    Ok(points)
}
