//! Unit tests for the IP reputation tracker

use std::sync::Arc;

use og_shared::config::{GateConfig, RiskThresholds};

use crate::repositories::ip_reputation::MockIpReputationRepository;
use crate::services::tracking::IpReputationTracker;

fn tracker(
    repo: &Arc<MockIpReputationRepository>,
    config: GateConfig,
) -> IpReputationTracker<MockIpReputationRepository> {
    IpReputationTracker::new(Arc::clone(repo), config)
}

fn phone(i: usize) -> String {
    format!("+1555010{:04}", i)
}

#[tokio::test]
async fn test_first_attempt_is_unscored() {
    let repo = Arc::new(MockIpReputationRepository::new());
    let tracker = tracker(&repo, GateConfig::default());

    let record = tracker
        .track_attempt("203.0.113.7", "+15550100001")
        .await
        .unwrap();

    assert_eq!(record.total_attempts, 1);
    assert_eq!(record.risk_score, 0);
    assert!(!record.is_blocked);
}

#[tokio::test]
async fn test_distinct_phone_excess_raises_score() {
    let repo = Arc::new(MockIpReputationRepository::new());
    let tracker = tracker(&repo, GateConfig::default());

    let mut last = None;
    for i in 0..6 {
        last = Some(
            tracker
                .track_attempt("203.0.113.7", &phone(i))
                .await
                .unwrap(),
        );
    }

    let record = last.unwrap();
    assert_eq!(record.distinct_phone_count(), 6);
    assert_eq!(record.risk_score, 30);
    assert!(!record.is_blocked);
}

#[tokio::test]
async fn test_repeat_phone_does_not_grow_the_set() {
    let repo = Arc::new(MockIpReputationRepository::new());
    let tracker = tracker(&repo, GateConfig::default());

    for _ in 0..5 {
        tracker
            .track_attempt("203.0.113.7", "+15550100001")
            .await
            .unwrap();
    }

    let record = tracker
        .track_attempt("203.0.113.7", "+15550100001")
        .await
        .unwrap();

    assert_eq!(record.distinct_phone_count(), 1);
    assert_eq!(record.total_attempts, 6);
    assert_eq!(record.risk_score, 0);
}

#[tokio::test]
async fn test_score_ceiling_stays_below_default_critical() {
    // With default caps the IP score tops out at 90, under the default
    // critical threshold of 100: the automatic hard block only engages
    // when a deployment tightens the thresholds.
    let repo = Arc::new(MockIpReputationRepository::new());
    let tracker = tracker(&repo, GateConfig::default());

    let mut last = None;
    for i in 0..60 {
        last = Some(
            tracker
                .track_attempt("203.0.113.7", &phone(i % 25))
                .await
                .unwrap(),
        );
    }

    let record = last.unwrap();
    assert_eq!(record.risk_score, 90);
    assert!(!record.is_blocked);
}

#[tokio::test]
async fn test_hard_block_under_tight_thresholds_is_sticky() {
    let config = GateConfig {
        risk: RiskThresholds {
            critical: 70,
            ..Default::default()
        },
        ..Default::default()
    };
    let repo = Arc::new(MockIpReputationRepository::new());
    let tracker = tracker(&repo, config);

    let mut blocked_at = None;
    for i in 0..60 {
        let record = tracker
            .track_attempt("203.0.113.7", &phone(i % 25))
            .await
            .unwrap();
        if record.is_blocked && blocked_at.is_none() {
            blocked_at = Some(i);
        }
    }

    assert!(blocked_at.is_some(), "ip should have been hard blocked");

    // Once blocked, stays blocked
    let record = tracker
        .track_attempt("203.0.113.7", &phone(0))
        .await
        .unwrap();
    assert!(record.is_blocked);
}
