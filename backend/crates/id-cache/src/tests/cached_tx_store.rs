use super::gated_store::GatedStore;
use super::memory_store::{MemoryStore, test_identity};
use crate::CachedStore;

use id_core::{Email, Storer};

use std::sync::Arc;
use std::time::Duration;

use googletest::prelude::*;

fn cached() -> (MemoryStore, CachedStore<MemoryStore>) {
    let store = MemoryStore::default();
    (store.clone(), CachedStore::new(store, Duration::from_secs(60)))
}

#[tokio::test]
async fn given_tx_create_when_not_yet_committed_then_cache_untouched() {
    let (_store, cached) = cached();
    let identity = test_identity("pending@example.com");

    let tx = cached.begin().await.unwrap();
    tx.create(&identity).await.unwrap();

    assert!(cached.cache().is_empty());
    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn given_tx_create_when_committed_then_cached_and_stored() {
    let (store, cached) = cached();
    let identity = test_identity("commit@example.com");

    let tx = cached.begin().await.unwrap();
    tx.create(&identity).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(store.row_count(), 1);
    assert_eq!(cached.query_by_email(&identity.email).await.unwrap(), identity);
    assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn given_tx_create_when_rolled_back_then_nothing_cached_or_stored() {
    let (store, cached) = cached();
    let identity = test_identity("rollback@example.com");

    let tx = cached.begin().await.unwrap();
    tx.create(&identity).await.unwrap();
    tx.rollback().await.unwrap();

    assert!(cached.cache().is_empty());
    assert_eq!(store.row_count(), 0);
}

#[tokio::test]
async fn given_tx_delete_when_committed_then_both_keys_evicted() {
    let (store, cached) = cached();
    let identity = test_identity("txdelete@example.com");
    cached.create(&identity).await.unwrap();

    let tx = cached.begin().await.unwrap();
    tx.delete(&identity).await.unwrap();
    assert_eq!(cached.cache().len(), 2);
    tx.commit().await.unwrap();

    assert!(cached.cache().is_empty());
    assert_eq!(store.row_count(), 0);
}

#[tokio::test]
async fn given_tx_email_change_when_committed_then_old_key_evicted() {
    let (_store, cached) = cached();
    let mut identity = test_identity("before@example.com");
    cached.create(&identity).await.unwrap();

    identity.email = Email::parse("after@example.com").unwrap();
    let tx = cached.begin().await.unwrap();
    tx.update(&identity).await.unwrap();
    tx.commit().await.unwrap();

    assert_that!(cached.cache().get("before@example.com"), none());
    assert_eq!(
        cached.cache().get("after@example.com").map(|i| i.id),
        Some(identity.id)
    );
}

#[tokio::test]
async fn given_failed_commit_when_committing_then_cache_untouched() {
    let (store, cached) = cached();
    let identity = test_identity("late@example.com");

    let tx = cached.begin().await.unwrap();
    tx.create(&identity).await.unwrap();
    store.set_fail_writes(true);

    assert!(tx.commit().await.is_err());
    assert!(cached.cache().is_empty());
}

#[tokio::test]
async fn given_open_tx_when_begin_again_then_transaction_error() {
    let (_store, cached) = cached();

    let tx = cached.begin().await.unwrap();
    let nested = tx.begin().await;

    assert!(matches!(
        nested,
        Err(id_core::StoreError::Transaction { .. })
    ));
    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn given_evicted_id_key_when_tx_changes_email_then_old_email_not_found() {
    let (_store, cached) = cached();
    let mut identity = test_identity("txstale@example.com");
    cached.create(&identity).await.unwrap();
    cached.cache().delete(&identity.id.to_string());

    identity.email = Email::parse("txfresh@example.com").unwrap();
    let tx = cached.begin().await.unwrap();
    tx.update(&identity).await.unwrap();
    tx.commit().await.unwrap();

    assert_that!(cached.cache().get("txstale@example.com"), none());
    let old = Email::parse("txstale@example.com").unwrap();
    assert!(cached.query_by_email(&old).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn given_read_in_flight_when_tx_delete_commits_then_identity_not_cached_again() {
    let store = GatedStore::default();
    let cached = Arc::new(CachedStore::new(store.clone(), Duration::from_secs(60)));
    let identity = test_identity("txrace@example.com");
    store.inner().create(&identity).await.unwrap();

    store.hold_after("query_by_email");
    let reader = Arc::clone(&cached);
    let email = identity.email.clone();
    let read = tokio::spawn(async move { reader.query_by_email(&email).await });
    store.wait_until_held().await;

    let tx = cached.begin().await.unwrap();
    tx.delete(&identity).await.unwrap();
    tx.commit().await.unwrap();
    store.release();
    read.await.unwrap().unwrap();

    assert!(cached.cache().is_empty());
    assert!(
        cached
            .query_by_email(&identity.email)
            .await
            .unwrap_err()
            .is_not_found()
    );
}
