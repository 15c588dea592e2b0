//! Pure risk-score calculators. No I/O; every input comes from the
//! tracking record and the gate configuration.

use chrono::{DateTime, Utc};
use og_shared::config::{IpLimits, PhoneLimits, RiskThresholds};

/// Substrings that mark a user agent as an automation tool.
const BOT_UA_MARKERS: [&str; 3] = ["bot", "curl", "python"];

/// User agents shorter than this look truncated or fabricated.
const MIN_PLAUSIBLE_UA_LENGTH: usize = 20;

/// Velocity score: how rapidly requests for one phone number arrive.
///
/// Contributions: +40 when the rolling hourly window exceeds the cap, and
/// up to +50 from the average inter-request interval over the record's
/// lifetime. Clamped to 100.
pub fn velocity_score(
    attempt_count: i64,
    first_attempt_at: DateTime<Utc>,
    last_attempt_at: DateTime<Utc>,
    attempts_last_hour: u32,
    limits: &PhoneLimits,
) -> u8 {
    let mut score: u32 = 0;

    if attempts_last_hour > limits.max_per_hour {
        score += 40;
    }

    if attempt_count > 0 {
        let lifetime_seconds = (last_attempt_at - first_attempt_at).num_seconds();
        let avg_interval_seconds = lifetime_seconds as f64 / attempt_count as f64;

        if avg_interval_seconds < 10.0 {
            score += 50;
        } else if avg_interval_seconds < 30.0 {
            score += 30;
        } else if avg_interval_seconds < limits.min_interval_seconds as f64 {
            score += 20;
        }
    }

    score.min(100) as u8
}

/// Pattern score: structural signals suggesting automated behavior.
///
/// Contributions: +40 for IP diversity above the cap, +30 for exceeding
/// the daily window, +20 for a missing or bot-like user agent, +10 for a
/// suspiciously short one. Clamped to 100.
pub fn pattern_score(
    distinct_ip_count: u32,
    attempts_last_day: u32,
    user_agent: Option<&str>,
    limits: &PhoneLimits,
) -> u8 {
    let mut score: u32 = 0;

    if distinct_ip_count > limits.ip_diversity_cap {
        score += 40;
    }

    if attempts_last_day > limits.max_per_day {
        score += 30;
    }

    let ua = user_agent.unwrap_or("");
    if ua.is_empty() || is_bot_like(ua) {
        score += 20;
    }
    if !ua.is_empty() && ua.len() < MIN_PLAUSIBLE_UA_LENGTH {
        score += 10;
    }

    score.min(100) as u8
}

/// Weighted combination of the two component scores, rounded and clamped.
pub fn total_risk_score(velocity: u8, pattern: u8, risk: &RiskThresholds) -> u8 {
    let weighted =
        f64::from(velocity) * risk.velocity_weight + f64::from(pattern) * risk.pattern_weight;
    (weighted.round() as u32).min(100) as u8
}

/// Coarse IP risk score over lifetime counters.
///
/// Contributions: +50 when the distinct-phone set exceeds the daily-scale
/// cap, else +30 above the hourly-scale cap; +40 when lifetime attempts
/// exceed the hard cap, else +20 above the soft cap. Clamped to 100.
pub fn ip_risk_score(distinct_phones: usize, total_attempts: i64, limits: &IpLimits) -> u8 {
    let mut score: u32 = 0;

    if distinct_phones > limits.phones_per_day_cap as usize {
        score += 50;
    } else if distinct_phones > limits.phones_per_hour_cap as usize {
        score += 30;
    }

    if total_attempts > i64::from(limits.attempts_hard_cap) {
        score += 40;
    } else if total_attempts > i64::from(limits.attempts_soft_cap) {
        score += 20;
    }

    score.min(100) as u8
}

fn is_bot_like(user_agent: &str) -> bool {
    let lowered = user_agent.to_lowercase();
    BOT_UA_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
