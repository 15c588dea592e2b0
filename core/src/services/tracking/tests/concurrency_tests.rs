//! Lost-update tests for concurrent tracking writes

use std::sync::Arc;

use og_shared::config::GateConfig;

use crate::repositories::ip_reputation::{IpReputationRepository, MockIpReputationRepository};
use crate::repositories::phone_risk::{MockPhoneRiskRepository, PhoneRiskRepository};
use crate::services::tracking::{IpReputationTracker, PhoneRiskTracker};

const WRITERS: usize = 10;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_phone_attempts_lose_no_updates() {
    let repo = Arc::new(MockPhoneRiskRepository::new());
    let tracker = Arc::new(PhoneRiskTracker::new(
        Arc::clone(&repo),
        GateConfig::default(),
    ));

    let mut handles = Vec::with_capacity(WRITERS);
    for i in 0..WRITERS {
        let tracker = Arc::clone(&tracker);
        handles.push(tokio::spawn(async move {
            tracker
                .record_attempt("+15550100001", &format!("203.0.113.{}", i), None)
                .await
        }));
    }

    for handle in handles {
        handle.await.unwrap().expect("write must not be dropped");
    }

    let record = repo.find_by_phone("+15550100001").await.unwrap().unwrap();
    assert_eq!(record.attempt_count, WRITERS as i64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_ip_attempts_lose_no_updates() {
    let repo = Arc::new(MockIpReputationRepository::new());
    let tracker = Arc::new(IpReputationTracker::new(
        Arc::clone(&repo),
        GateConfig::default(),
    ));

    let mut handles = Vec::with_capacity(WRITERS);
    for i in 0..WRITERS {
        let tracker = Arc::clone(&tracker);
        handles.push(tokio::spawn(async move {
            tracker
                .track_attempt("203.0.113.7", &format!("+1555010{:04}", i))
                .await
        }));
    }

    for handle in handles {
        handle.await.unwrap().expect("write must not be dropped");
    }

    let record = repo.find_by_ip("203.0.113.7").await.unwrap().unwrap();
    assert_eq!(record.total_attempts, WRITERS as i64);
    assert_eq!(record.distinct_phone_count(), WRITERS);
}
