//! Per-IP reputation tracking record.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reputation record for a single IP address. Unlike the phone-side record
/// there are no rolling windows here: IP abuse is treated as cumulative
/// evidence, so the counters are lifetime values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpReputationRecord {
    /// IP address (record key)
    pub ip_address: String,

    /// Distinct phone numbers attempted from this IP
    pub phone_numbers_attempted: HashSet<String>,

    /// Lifetime attempt count across all numbers
    pub total_attempts: i64,

    /// Timestamp of the first attempt seen from this IP
    pub first_seen_at: DateTime<Utc>,

    /// Timestamp of the most recent attempt
    pub last_seen_at: DateTime<Utc>,

    /// Coarse risk score (0-100)
    pub risk_score: u8,

    /// Hard block flag; set once the risk score crosses the critical
    /// threshold. There is no unblock path on the IP side.
    pub is_blocked: bool,

    /// Optimistic-concurrency token, bumped by the store on every update
    pub version: u64,
}

impl IpReputationRecord {
    /// Creates the record for an IP seen for the first time.
    pub fn first_attempt(
        ip_address: impl Into<String>,
        phone_number: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut phones = HashSet::new();
        phones.insert(phone_number.into());
        Self {
            ip_address: ip_address.into(),
            phone_numbers_attempted: phones,
            total_attempts: 1,
            first_seen_at: now,
            last_seen_at: now,
            risk_score: 0,
            is_blocked: false,
            version: 0,
        }
    }

    /// Folds a new attempt into the record. The risk score is recomputed
    /// by the caller afterwards.
    pub fn observe_attempt(&mut self, phone_number: &str, now: DateTime<Utc>) {
        if !self.phone_numbers_attempted.contains(phone_number) {
            self.phone_numbers_attempted
                .insert(phone_number.to_string());
        }
        self.total_attempts += 1;
        self.last_seen_at = now;
    }

    /// Number of distinct phone numbers attempted from this IP.
    pub fn distinct_phone_count(&self) -> usize {
        self.phone_numbers_attempted.len()
    }
}
