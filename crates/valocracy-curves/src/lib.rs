//! # valocracy-curves — Fixed-point exponential progress curves.
//!
//! All calculations use integer arithmetic only for determinism.
//!
//! The curve family is the bounded exponential
//! `f(r) = (e^(k*r) - 1) / (e^k - 1)` over the elapsed ratio `r` of a time
//! window, with `k = curvature / 1000`:
//! - **Power-series exponential**: `e^x` is summed term by term with 256-bit
//!   intermediates until a term truncates to zero.
//! - **Exact endpoints**: the numerator is divided by the same series evaluated
//!   at `r = 1`, and times at or past the window end are clamped.
//! - **Orientation**: descending curves are the complement `1 - f(r)`.

pub mod engine;
pub mod exp;

pub use engine::{
    curve_normalization, curve_scaling, exponential, final_exp_scaling, sample_curve,
    time_delta, time_elapsed_ratio, total_time_interval, validate_curvature, ExpCurve,
};
pub use exp::{exp_fixed, exp_series};
