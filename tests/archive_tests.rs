//! SQLite archive integration tests

use chrono::DateTime;
use tempfile::TempDir;

use waste_watch::application::ports::{ArchiveStore, StoreError};
use waste_watch::domain::meeting::NewMeetingRecord;
use waste_watch::infrastructure::SqliteArchiveStore;

fn record(name: &str, ended_at: i64, attendees: usize) -> NewMeetingRecord {
    let attendee_names: Vec<String> = (1..=attendees).map(|i| format!("Attendee {}", i)).collect();
    let duration_milliseconds = 1_200_000;
    NewMeetingRecord {
        name: name.to_string(),
        date: DateTime::from_timestamp_millis(ended_at).unwrap(),
        total_cost: attendees as f64 * 45.0 * (duration_milliseconds as f64 / 3_600_000.0),
        attendee_names,
        average_hourly_rate: 45.0,
        duration_milliseconds,
        started_at: ended_at - duration_milliseconds as i64,
        ended_at,
    }
}

#[tokio::test]
async fn records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("archive.db");

    let id = {
        let store = SqliteArchiveStore::open(&path).unwrap();
        store.insert(record("Kickoff", 1_700_000_000_500, 4)).await.unwrap()
    };

    let reopened = SqliteArchiveStore::open(&path).unwrap();
    let got = reopened.get(id).await.unwrap();
    assert_eq!(got, record("Kickoff", 1_700_000_000_500, 4).with_id(id));
    assert_eq!(got.date.timestamp_millis(), 1_700_000_000_500);
}

#[tokio::test]
async fn list_orders_by_end_time_descending() {
    let dir = TempDir::new().unwrap();
    let store = SqliteArchiveStore::open(dir.path().join("archive.db")).unwrap();

    for ended_at in [100, 300, 200] {
        store.insert(record("m", ended_at, 1)).await.unwrap();
    }

    let ended: Vec<i64> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.ended_at)
        .collect();
    assert_eq!(ended, vec![300, 200, 100]);
}

#[tokio::test]
async fn clear_is_durable_and_ids_are_not_reused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("archive.db");

    let store = SqliteArchiveStore::open(&path).unwrap();
    let first = store.insert(record("a", 10, 2)).await.unwrap();
    store.insert(record("b", 20, 2)).await.unwrap();
    assert_eq!(store.clear_all().await.unwrap(), 2);
    drop(store);

    let reopened = SqliteArchiveStore::open(&path).unwrap();
    assert!(reopened.list_all().await.unwrap().is_empty());
    assert!(matches!(reopened.get(first).await, Err(StoreError::NotFound(_))));

    let next = reopened.insert(record("c", 30, 1)).await.unwrap();
    assert!(next > first + 1);
}

#[tokio::test]
async fn clones_share_one_archive() {
    let store = SqliteArchiveStore::open_in_memory().unwrap();
    let clone = store.clone();

    let id = clone.insert(record("shared", 5, 3)).await.unwrap();
    assert_eq!(store.get(id).await.unwrap().attendee_count(), 3);
}

#[tokio::test]
async fn stored_cost_matches_formula() {
    let store = SqliteArchiveStore::open_in_memory().unwrap();
    let id = store.insert(record("formula", 1_000, 6)).await.unwrap();

    let got = store.get(id).await.unwrap();
    assert!((got.total_cost - got.expected_cost()).abs() < 1e-9);
}
