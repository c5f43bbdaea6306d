//! Core ledger types: account identifiers and per-account decay records.
//!
//! Amounts are fixed point with [`SCALE`](crate::constants::SCALE) = 1 unit.
//! Timestamps are unsigned seconds supplied by the caller.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte account identifier.
///
/// Rendered and parsed as `0x`-prefixed lowercase hex. Serializes as that
/// string so settings files and JSON output stay human readable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// The zero account.
    pub const ZERO: Self = Self([0u8; 20]);
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Failure to parse an [`AccountId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAccountIdError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for AccountId {
    type Err = ParseAccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(digits).map_err(|e| ParseAccountIdError::InvalidHex(e.to_string()))?;
        let len = bytes.len();
        let array: [u8; 20] = bytes
            .try_into()
            .map_err(|_| ParseAccountIdError::InvalidLength(len))?;
        Ok(Self(array))
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Stored, undecayed voting-power state of one account.
///
/// `principal` only grows (by mint) and `reference_time` is the timestamp of
/// the most recent mint, from which the decay window is measured.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DecayRecord {
    /// Undecayed amount credited by mints, fixed point.
    pub principal: u128,
    /// Timestamp of the last mint (start of the decay window).
    pub reference_time: u64,
}

impl DecayRecord {
    /// Create a record from its parts.
    pub fn new(principal: u128, reference_time: u64) -> Self {
        Self {
            principal,
            reference_time,
        }
    }

    /// Whether nothing has been minted to this record.
    pub fn is_empty(&self) -> bool {
        self.principal == 0
    }
}
