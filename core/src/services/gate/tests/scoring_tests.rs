//! Unit tests for the pure risk-score calculators

use chrono::{Duration, Utc};

use og_shared::config::{IpLimits, PhoneLimits, RiskThresholds};

use crate::services::gate::scoring::{
    ip_risk_score, pattern_score, total_risk_score, velocity_score,
};

const GOOD_UA: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 Safari/605.1.15";

#[test]
fn test_velocity_zero_for_slow_traffic() {
    let limits = PhoneLimits::default();
    let first = Utc::now() - Duration::hours(10);
    let last = Utc::now();

    // 10 attempts spread over 10 hours, 2 in the last hour
    let score = velocity_score(10, first, last, 2, &limits);
    assert_eq!(score, 0);
}

#[test]
fn test_velocity_hourly_cap_excess() {
    let limits = PhoneLimits::default();
    let first = Utc::now() - Duration::hours(10);
    let last = Utc::now();

    let score = velocity_score(10, first, last, 4, &limits);
    assert_eq!(score, 40);
}

#[test]
fn test_velocity_average_interval_bands() {
    let limits = PhoneLimits::default();
    let last = Utc::now();

    // avg 5s -> +50
    assert_eq!(velocity_score(10, last - Duration::seconds(50), last, 1, &limits), 50);
    // avg 20s -> +30
    assert_eq!(velocity_score(10, last - Duration::seconds(200), last, 1, &limits), 30);
    // avg 45s -> +20 (below the 60s minimum interval)
    assert_eq!(velocity_score(10, last - Duration::seconds(450), last, 1, &limits), 20);
    // avg 90s -> no interval contribution
    assert_eq!(velocity_score(10, last - Duration::seconds(900), last, 1, &limits), 0);
}

#[test]
fn test_velocity_combined_is_ninety() {
    // The canonical hot case: 10 attempts in the last hour at 5s spacing
    let limits = PhoneLimits::default();
    let last = Utc::now();
    let first = last - Duration::seconds(50);

    let score = velocity_score(10, first, last, 10, &limits);
    assert_eq!(score, 90);
}

#[test]
fn test_pattern_neutral_browser_traffic() {
    let limits = PhoneLimits::default();
    assert_eq!(pattern_score(1, 2, Some(GOOD_UA), &limits), 0);
}

#[test]
fn test_pattern_missing_user_agent() {
    let limits = PhoneLimits::default();
    assert_eq!(pattern_score(1, 1, None, &limits), 20);
    assert_eq!(pattern_score(1, 1, Some(""), &limits), 20);
}

#[test]
fn test_pattern_bot_user_agents() {
    let limits = PhoneLimits::default();

    // Bot-like and short: both contributions apply
    assert_eq!(pattern_score(1, 1, Some("curl/8.0.1"), &limits), 30);
    assert_eq!(pattern_score(1, 1, Some("python-urllib/3.9"), &limits), 30);

    // Case-insensitive marker in a long UA: bot contribution only
    let long_bot_ua = "Mozilla/5.0 (compatible; GoogleBot/2.1; +http://www.google.com/bot.html)";
    assert_eq!(pattern_score(1, 1, Some(long_bot_ua), &limits), 20);

    // Short but organic-looking
    assert_eq!(pattern_score(1, 1, Some("MyApp/1.2"), &limits), 10);
}

#[test]
fn test_pattern_diversity_and_daily_excess() {
    let limits = PhoneLimits::default();

    assert_eq!(pattern_score(6, 2, Some(GOOD_UA), &limits), 40);
    assert_eq!(pattern_score(1, 11, Some(GOOD_UA), &limits), 30);
    // Everything at once clamps at 100
    assert_eq!(pattern_score(6, 11, Some("curl/8.0.1"), &limits), 100);
}

#[test]
fn test_total_weighting_and_rounding() {
    let risk = RiskThresholds::default();

    assert_eq!(total_risk_score(90, 0, &risk), 54);
    assert_eq!(total_risk_score(90, 70, &risk), 82);
    assert_eq!(total_risk_score(0, 0, &risk), 0);
    assert_eq!(total_risk_score(100, 100, &risk), 100);
    // 0.6*33 = 19.8 rounds up
    assert_eq!(total_risk_score(33, 0, &risk), 20);
}

#[test]
fn test_ip_risk_bands() {
    let limits = IpLimits::default();

    assert_eq!(ip_risk_score(1, 1, &limits), 0);
    // Distinct-phone excess, hourly scale
    assert_eq!(ip_risk_score(6, 6, &limits), 30);
    // Distinct-phone excess, daily scale
    assert_eq!(ip_risk_score(21, 21, &limits), 70);
    // Attempt-volume bands
    assert_eq!(ip_risk_score(1, 21, &limits), 20);
    assert_eq!(ip_risk_score(1, 51, &limits), 40);
    // Ceiling with default caps
    assert_eq!(ip_risk_score(25, 60, &limits), 90);
}
