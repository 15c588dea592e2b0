//! Tests for the mock block list repository

use crate::domain::entities::blocked_number::BlockedPhoneNumber;
use crate::repositories::block_list::{BlockListRepository, MockBlockListRepository};

#[tokio::test]
async fn test_insert_and_find() {
    let repo = MockBlockListRepository::new();

    assert!(repo.find_by_phone("+15550100001").await.unwrap().is_none());

    repo.insert(BlockedPhoneNumber::new("+15550100001", "fraud ring", "admin"))
        .await
        .unwrap();

    let entry = repo.find_by_phone("+15550100001").await.unwrap().unwrap();
    assert_eq!(entry.block_reason, "fraud ring");
    assert_eq!(entry.blocked_by, "admin");
}

#[tokio::test]
async fn test_duplicate_insert_is_surfaced() {
    let repo = MockBlockListRepository::new();
    repo.insert(BlockedPhoneNumber::new("+15550100001", "fraud ring", "admin"))
        .await
        .unwrap();

    let err = repo
        .insert(BlockedPhoneNumber::new("+15550100001", "spam", "other-admin"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_remove() {
    let repo = MockBlockListRepository::new();
    repo.insert(BlockedPhoneNumber::new("+15550100001", "fraud ring", "admin"))
        .await
        .unwrap();

    assert!(repo.remove("+15550100001").await.unwrap());
    assert!(!repo.remove("+15550100001").await.unwrap());
    assert!(repo.find_by_phone("+15550100001").await.unwrap().is_none());
}
