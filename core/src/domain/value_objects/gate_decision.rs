//! Admission decision returned for every gate check.

use serde::{Deserialize, Serialize};

/// The allow/deny verdict for one OTP send request. When denied, `reason`
/// carries a human-readable message for the caller to surface, and
/// `retry_after_seconds` is present iff the denial is time-bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    /// Whether the OTP send may proceed
    pub allowed: bool,

    /// Denial reason; present iff `allowed` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Current total risk score, returned for observability even when the
    /// request is permitted
    pub risk_score: u8,

    /// Seconds until the caller may retry; absent for indefinite denials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<i64>,
}

impl GateDecision {
    /// An admitted request carrying the current risk score.
    pub fn allow(risk_score: u8) -> Self {
        Self {
            allowed: true,
            reason: None,
            risk_score,
            retry_after_seconds: None,
        }
    }

    /// A denied request with an optional retry hint.
    pub fn deny(
        reason: impl Into<String>,
        risk_score: u8,
        retry_after_seconds: Option<i64>,
    ) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            risk_score,
            retry_after_seconds,
        }
    }
}
