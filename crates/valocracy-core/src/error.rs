//! Error types for Valocracy.
use thiserror::Error;

use crate::types::AccountId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    #[error("invalid initial timeframe")] InvalidInitialTimeframe,
    #[error("invalid curvature: {0}")] InvalidCurvature(i32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error(transparent)] Curve(#[from] CurveError),
    #[error("principal overflow for account {0}")] PrincipalOverflow(AccountId),
}
