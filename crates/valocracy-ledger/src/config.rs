//! Global decay configuration shared by every account of a ledger.
//!
//! [`DecayConfig::default`] is deliberately invalid (curvature 0, empty
//! vacation period): an unconfigured ledger fails every balance query
//! instead of decaying along a shape nobody chose.

use serde::{Deserialize, Serialize};
use valocracy_core::constants::SECONDS_PER_DAY;

/// Curve shape and window length applied to all accounts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DecayConfig {
    /// Curve shape in `[-10000, 10000]`, excluding 0.
    pub curvature: i32,
    /// Seconds after a mint at which the balance has fully decayed.
    pub vacation_period: u64,
}

impl DecayConfig {
    /// Create a configuration from its parts. No validation happens here.
    pub fn new(curvature: i32, vacation_period: u64) -> Self {
        Self {
            curvature,
            vacation_period,
        }
    }

    /// Configuration with a vacation period given in whole days.
    pub fn with_vacation_days(curvature: i32, days: u64) -> Self {
        Self::new(curvature, days.saturating_mul(SECONDS_PER_DAY))
    }

    /// End of the decay window that starts at `reference_time`.
    ///
    /// Saturates at `u64::MAX` rather than wrapping.
    pub fn window_end(&self, reference_time: u64) -> u64 {
        reference_time.saturating_add(self.vacation_period)
    }
}
