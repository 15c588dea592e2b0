//! Unit tests for the phone risk tracker

use std::sync::Arc;

use chrono::{Duration, Utc};

use og_shared::config::{GateConfig, RiskThresholds};

use crate::domain::entities::phone_risk::PhoneRiskRecord;
use crate::repositories::phone_risk::{MockPhoneRiskRepository, PhoneRiskRepository};
use crate::services::tracking::PhoneRiskTracker;

const UA: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 Safari/605.1.15";

fn tracker(
    repo: &Arc<MockPhoneRiskRepository>,
    config: GateConfig,
) -> PhoneRiskTracker<MockPhoneRiskRepository> {
    PhoneRiskTracker::new(Arc::clone(repo), config)
}

#[tokio::test]
async fn test_first_attempt_creates_unscored_record() {
    let repo = Arc::new(MockPhoneRiskRepository::new());
    let tracker = tracker(&repo, GateConfig::default());

    let record = tracker
        .record_attempt("+15550100001", "203.0.113.7", Some(UA))
        .await
        .unwrap();

    assert_eq!(record.attempt_count, 1);
    assert_eq!(record.total_risk_score, 0);
    assert!(!record.is_blocked);
}

#[tokio::test]
async fn test_fourth_attempt_in_hour_triggers_short_block() {
    let repo = Arc::new(MockPhoneRiskRepository::new());
    let tracker = tracker(&repo, GateConfig::default());
    let base = Utc::now();

    for i in 0..3 {
        let record = tracker
            .record_attempt_at(
                "+15550100001",
                "203.0.113.7",
                Some(UA),
                base + Duration::seconds(i),
            )
            .await
            .unwrap();
        assert!(!record.is_blocked, "attempt {} should not block", i + 1);
    }

    let fourth = tracker
        .record_attempt_at(
            "+15550100001",
            "203.0.113.7",
            Some(UA),
            base + Duration::seconds(3),
        )
        .await
        .unwrap();

    assert!(fourth.is_blocked);
    assert_eq!(fourth.block_reason.as_deref(), Some("hourly limit exceeded"));
    let until = fourth.blocked_until.unwrap();
    assert_eq!((until - (base + Duration::seconds(3))).num_seconds(), 900);
}

#[tokio::test]
async fn test_daily_cap_triggers_medium_block() {
    let repo = Arc::new(MockPhoneRiskRepository::new());
    let tracker = tracker(&repo, GateConfig::default());
    let base = Utc::now() - Duration::days(2);

    // Spread attempts two hours apart: the hourly window keeps resetting
    // while the daily window accumulates
    let mut last = None;
    for i in 0..11 {
        last = Some(
            tracker
                .record_attempt_at(
                    "+15550100001",
                    "203.0.113.7",
                    Some(UA),
                    base + Duration::hours(2 * i),
                )
                .await
                .unwrap(),
        );
    }

    let eleventh = last.unwrap();
    assert_eq!(eleventh.attempts_last_hour, 1);
    assert_eq!(eleventh.attempts_last_day, 11);
    assert!(eleventh.is_blocked);
    assert_eq!(eleventh.block_reason.as_deref(), Some("daily limit exceeded"));
    let until = eleventh.blocked_until.unwrap();
    assert_eq!((until - (base + Duration::hours(20))).num_seconds(), 3600);
}

#[tokio::test]
async fn test_high_risk_score_takes_priority_over_hourly_rule() {
    let repo = Arc::new(MockPhoneRiskRepository::new());
    let tracker = tracker(&repo, GateConfig::default());
    let now = Utc::now();

    // A record already hot on every signal: one more rapid attempt pushes
    // velocity to 90 and pattern to 100
    let mut seeded = PhoneRiskRecord::first_attempt(
        "+15550100001",
        "203.0.113.7",
        Some("curl/7.79.1"),
        now - Duration::seconds(91),
    );
    seeded.attempt_count = 9;
    seeded.attempts_last_hour = 9;
    seeded.attempts_last_day = 11;
    seeded.distinct_ip_count = 6;
    seeded.last_attempt_at = now - Duration::seconds(61);
    repo.insert(seeded).await.unwrap();

    let record = tracker
        .record_attempt_at("+15550100001", "198.51.100.4", Some("curl/7.79.1"), now)
        .await
        .unwrap();

    assert_eq!(record.velocity_score, 90);
    assert_eq!(record.pattern_score, 100);
    assert_eq!(record.total_risk_score, 94);
    assert!(record.is_blocked);
    // 94 clears the high threshold, so the block is reason-scored, not
    // the hourly rule, and runs for the medium duration
    assert_eq!(record.block_reason.as_deref(), Some("high risk score"));
    assert_eq!((record.blocked_until.unwrap() - now).num_seconds(), 3600);
}

#[tokio::test]
async fn test_critical_score_blocks_long_under_tight_thresholds() {
    let repo = Arc::new(MockPhoneRiskRepository::new());
    let config = GateConfig {
        risk: RiskThresholds {
            critical: 90,
            ..Default::default()
        },
        ..Default::default()
    };
    let tracker = tracker(&repo, config);
    let now = Utc::now();

    let mut seeded = PhoneRiskRecord::first_attempt(
        "+15550100001",
        "203.0.113.7",
        Some("curl/7.79.1"),
        now - Duration::seconds(91),
    );
    seeded.attempt_count = 9;
    seeded.attempts_last_hour = 9;
    seeded.attempts_last_day = 11;
    seeded.distinct_ip_count = 6;
    seeded.last_attempt_at = now - Duration::seconds(61);
    repo.insert(seeded).await.unwrap();

    let record = tracker
        .record_attempt_at("+15550100001", "198.51.100.4", Some("curl/7.79.1"), now)
        .await
        .unwrap();

    assert_eq!(record.total_risk_score, 94);
    assert_eq!(record.block_reason.as_deref(), Some("critical risk score"));
    assert_eq!((record.blocked_until.unwrap() - now).num_seconds(), 86400);
}

#[tokio::test]
async fn test_prior_block_is_retained_when_no_rule_fires() {
    let repo = Arc::new(MockPhoneRiskRepository::new());
    let tracker = tracker(&repo, GateConfig::default());
    let now = Utc::now();

    // Blocked three hours ago for a day; the new attempt is slow and clean
    let blocked_until = now + Duration::hours(21);
    let mut seeded = PhoneRiskRecord::first_attempt(
        "+15550100001",
        "203.0.113.7",
        Some(UA),
        now - Duration::hours(3),
    );
    seeded.block("daily limit exceeded", blocked_until);
    repo.insert(seeded).await.unwrap();

    let record = tracker
        .record_attempt_at("+15550100001", "203.0.113.7", Some(UA), now)
        .await
        .unwrap();

    // Windows reset, scores stay low, no rule fires - but the standing
    // block is untouched
    assert_eq!(record.attempts_last_hour, 1);
    assert!(record.total_risk_score < 80);
    assert!(record.is_blocked);
    assert_eq!(record.blocked_until, Some(blocked_until));
    assert_eq!(record.block_reason.as_deref(), Some("daily limit exceeded"));
}
