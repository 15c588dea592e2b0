//! Per-phone-number abuse tracking record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tracking record for a single phone number. One row exists per number;
/// it is created on first sight and updated on every subsequent request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneRiskRecord {
    /// Phone number in E.164 format (record key)
    pub phone_number: String,

    /// IP address seen on the most recent attempt
    pub last_ip: String,

    /// User agent seen on the most recent attempt
    pub last_user_agent: Option<String>,

    /// Lifetime attempt count; monotonic, never reset
    pub attempt_count: i64,

    /// Timestamp of the first attempt ever seen
    pub first_attempt_at: DateTime<Utc>,

    /// Timestamp of the most recent attempt
    pub last_attempt_at: DateTime<Utc>,

    /// Whether the number is currently blocked
    pub is_blocked: bool,

    /// Human-readable reason for the active block
    pub block_reason: Option<String>,

    /// End of the active block; a past time means the block has lapsed
    pub blocked_until: Option<DateTime<Utc>>,

    /// Attempts within the rolling one-hour window
    pub attempts_last_hour: u32,

    /// Attempts within the rolling 24-hour window
    pub attempts_last_day: u32,

    /// Approximate IP diversity: incremented whenever the observed IP
    /// differs from the immediately previous one. Not a true distinct
    /// count — a number bouncing A,B,A,B overcounts relative to a set.
    pub distinct_ip_count: u32,

    /// Velocity component of the risk score (0-100)
    pub velocity_score: u8,

    /// Pattern component of the risk score (0-100)
    pub pattern_score: u8,

    /// Weighted total risk score (0-100)
    pub total_risk_score: u8,

    /// Optimistic-concurrency token, bumped by the store on every update
    pub version: u64,
}

impl PhoneRiskRecord {
    /// Creates the record for a number seen for the first time.
    /// Scores stay at zero; a single observation carries no risk signal.
    pub fn first_attempt(
        phone_number: impl Into<String>,
        ip: impl Into<String>,
        user_agent: Option<&str>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            last_ip: ip.into(),
            last_user_agent: user_agent.map(str::to_string),
            attempt_count: 1,
            first_attempt_at: now,
            last_attempt_at: now,
            is_blocked: false,
            block_reason: None,
            blocked_until: None,
            attempts_last_hour: 1,
            attempts_last_day: 1,
            distinct_ip_count: 1,
            velocity_score: 0,
            pattern_score: 0,
            total_risk_score: 0,
            version: 0,
        }
    }

    /// Folds a new attempt into the record: rolls the hourly/daily windows,
    /// updates the approximate IP-diversity counter, and advances the
    /// lifetime counters and timestamps. Scores are recomputed by the
    /// caller afterwards.
    pub fn observe_attempt(&mut self, ip: &str, user_agent: Option<&str>, now: DateTime<Utc>) {
        let since_last = now - self.last_attempt_at;

        if since_last >= Duration::hours(1) {
            self.attempts_last_hour = 1;
        } else {
            self.attempts_last_hour += 1;
        }

        if since_last >= Duration::hours(24) {
            self.attempts_last_day = 1;
        } else {
            self.attempts_last_day += 1;
        }

        if ip != self.last_ip {
            self.distinct_ip_count += 1;
        }

        self.attempt_count += 1;
        self.last_ip = ip.to_string();
        self.last_user_agent = user_agent.map(str::to_string);
        self.last_attempt_at = now;
    }

    /// Blocks the number until the given time.
    pub fn block(&mut self, reason: impl Into<String>, until: DateTime<Utc>) {
        self.is_blocked = true;
        self.block_reason = Some(reason.into());
        self.blocked_until = Some(until);
    }

    /// Clears the block fields. Counters and scores are left intact so a
    /// repeat offender's history survives an admin unblock.
    pub fn clear_block(&mut self) {
        self.is_blocked = false;
        self.block_reason = None;
        self.blocked_until = None;
    }

    /// Whether an unexpired block is in effect at `now`.
    pub fn is_blocked_at(&self, now: DateTime<Utc>) -> bool {
        self.is_blocked && self.blocked_until.map_or(false, |until| until > now)
    }

    /// Seconds until the active block lapses, if one is in effect.
    pub fn retry_after_seconds(&self, now: DateTime<Utc>) -> Option<i64> {
        self.blocked_until
            .filter(|until| self.is_blocked && *until > now)
            .map(|until| (until - now).num_seconds().max(1))
    }

    /// Seconds elapsed since the most recent attempt.
    pub fn seconds_since_last_attempt(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_attempt_at).num_seconds()
    }
}
