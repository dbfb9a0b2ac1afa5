//! Tests for the in-memory visit store: overlap queries, caregiver filtering,
//! and guarded unassignment.

use availability_engine::{InMemoryVisitStore, Visit, VisitStore, UNASSIGNED};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// 2023-11-20 09:00 UTC, the anchor for every fixture below.
fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 11, 20, 9, 0, 0).unwrap()
}

/// Helper: visit for `caregiver` spanning `[base + start_min, base + end_min)`.
fn visit(id: &str, caregiver: &str, start_min: i64, end_min: i64) -> Visit {
    Visit::new(
        id,
        "tenant1",
        format!("patient-{}", id),
        caregiver,
        base() + Duration::minutes(start_min),
        base() + Duration::minutes(end_min),
    )
}

fn ids(visits: &[Visit]) -> Vec<&str> {
    visits.iter().map(|v| v.id.as_str()).collect()
}

fn calendar() -> InMemoryVisitStore {
    InMemoryVisitStore::new(vec![
        visit("1", "caregiver1", 0, 60),
        visit("2", "caregiver1", 120, 180),
        visit("3", "caregiver2", 60, 120),
        visit("4", "caregiver1", -60, -30),
        visit("5", "caregiver2", 240, 300),
    ])
}

// ─────────────────────────────────────────────────────────────────────────────
// query
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_returns_nothing() {
    let store = InMemoryVisitStore::new(vec![]);

    let result = store
        .query(None, base(), base() + Duration::hours(1))
        .await
        .unwrap();

    assert!(result.is_empty());
    assert!(store.is_empty().unwrap());
}

#[tokio::test]
async fn no_caregiver_filter_returns_all_overlapping_visits() {
    let store = calendar();

    let result = store
        .query(None, base() - Duration::hours(2), base() + Duration::hours(6))
        .await
        .unwrap();

    assert_eq!(
        ids(&result),
        vec!["1", "2", "3", "4", "5"],
        "all visits in insertion order"
    );
}

#[tokio::test]
async fn caregiver_filter_keeps_only_that_caregiver() {
    let store = calendar();

    let result = store
        .query(
            Some("caregiver1"),
            base() - Duration::hours(2),
            base() + Duration::hours(6),
        )
        .await
        .unwrap();

    assert_eq!(ids(&result), vec!["1", "2", "4"]);
    assert!(result.iter().all(|v| v.caregiver_id == "caregiver1"));
}

#[tokio::test]
async fn time_range_excludes_visits_outside_window() {
    let store = calendar();

    let result = store
        .query(
            None,
            base() - Duration::minutes(30),
            base() + Duration::hours(3),
        )
        .await
        .unwrap();

    // Visit 4 ends exactly at the window start; visit 5 starts after its end.
    assert_eq!(ids(&result), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn caregiver_and_time_range_combine() {
    let store = calendar();

    let result = store
        .query(Some("caregiver1"), base(), base() + Duration::hours(3))
        .await
        .unwrap();

    assert_eq!(ids(&result), vec!["1", "2"]);
}

#[tokio::test]
async fn unknown_caregiver_returns_empty() {
    let store = calendar();

    let result = store
        .query(
            Some("nonexistent_caregiver"),
            base() + Duration::hours(10),
            base() + Duration::hours(12),
        )
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn partially_overlapping_visits_are_included() {
    let store = InMemoryVisitStore::new(vec![
        visit("partial1", "caregiver1", -30, 30),
        visit("partial2", "caregiver1", 30, 90),
    ]);

    let result = store
        .query(None, base(), base() + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(ids(&result), vec!["partial1", "partial2"]);
}

#[tokio::test]
async fn visit_exactly_matching_window_is_included() {
    let store = InMemoryVisitStore::new(vec![visit("exact1", "caregiver1", 0, 60)]);

    let result = store
        .query(None, base(), base() + Duration::hours(1))
        .await
        .unwrap();

    assert_eq!(ids(&result), vec!["exact1"]);
}

#[tokio::test]
async fn adjacent_visits_do_not_overlap() {
    let store = InMemoryVisitStore::new(vec![
        visit("before", "caregiver1", -60, 0),
        visit("after", "caregiver1", 60, 120),
    ]);

    let result = store
        .query(None, base(), base() + Duration::hours(1))
        .await
        .unwrap();

    assert!(
        result.is_empty(),
        "a visit ending at the window start or starting at its end is outside"
    );
}

#[tokio::test]
async fn inverted_range_matches_nothing() {
    let store = calendar();

    let result = store
        .query(None, base() + Duration::hours(6), base() - Duration::hours(2))
        .await
        .unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn query_returns_copies() {
    let store = calendar();

    let mut result = store
        .query(Some("caregiver1"), base(), base() + Duration::hours(1))
        .await
        .unwrap();
    result[0].caregiver_id = "someone-else".to_string();

    let again = store
        .query(Some("caregiver1"), base(), base() + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(again[0].caregiver_id, "caregiver1");
}

// ─────────────────────────────────────────────────────────────────────────────
// unassign
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unassign_clears_the_matching_visit() {
    let store = InMemoryVisitStore::new(vec![
        visit("1", "caregiver1", 0, 60),
        visit("2", "caregiver2", 60, 120),
    ]);

    store.unassign("1", "caregiver1").await.unwrap();

    let window = (base() - Duration::hours(1), base() + Duration::hours(3));
    let c1 = store
        .query(Some("caregiver1"), window.0, window.1)
        .await
        .unwrap();
    let c2 = store
        .query(Some("caregiver2"), window.0, window.1)
        .await
        .unwrap();
    assert!(c1.is_empty(), "caregiver1 should hold no visits");
    assert_eq!(ids(&c2), vec!["2"], "caregiver2 is untouched");

    let all = store.snapshot().unwrap();
    assert_eq!(all[0].caregiver_id, UNASSIGNED);
    assert!(!all[0].is_assigned());
}

#[tokio::test]
async fn unassign_unknown_visit_is_noop() {
    let store = InMemoryVisitStore::new(vec![visit("1", "caregiver1", 0, 60)]);
    let before = store.snapshot().unwrap();

    store.unassign("nonexistent", "caregiver1").await.unwrap();

    assert_eq!(store.snapshot().unwrap(), before);
}

#[tokio::test]
async fn unassign_with_wrong_caregiver_is_noop() {
    let store = InMemoryVisitStore::new(vec![visit("1", "caregiver1", 0, 60)]);

    store.unassign("1", "wrong_caregiver").await.unwrap();

    let result = store
        .query(Some("caregiver1"), base(), base() + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(ids(&result), vec!["1"]);
}

#[tokio::test]
async fn unassign_touches_only_the_named_visit() {
    let store = InMemoryVisitStore::new(vec![
        visit("1", "caregiver1", 0, 60),
        visit("2", "caregiver1", 60, 120),
    ]);

    store.unassign("1", "caregiver1").await.unwrap();

    let result = store
        .query(
            Some("caregiver1"),
            base() - Duration::hours(1),
            base() + Duration::hours(3),
        )
        .await
        .unwrap();
    assert_eq!(ids(&result), vec!["2"]);
}

#[tokio::test]
async fn unassign_twice_equals_unassign_once() {
    let store = calendar();
    store.unassign("2", "caregiver1").await.unwrap();
    let once = store.snapshot().unwrap();

    store.unassign("2", "caregiver1").await.unwrap();

    assert_eq!(store.snapshot().unwrap(), once);
}

#[tokio::test]
async fn duplicate_ids_unassign_first_match_only() {
    let store = InMemoryVisitStore::new(vec![
        visit("dup", "caregiver1", 0, 60),
        visit("dup", "caregiver1", 120, 180),
        visit("dup", "caregiver2", 240, 300),
    ]);

    store.unassign("dup", "caregiver1").await.unwrap();
    let caregivers: Vec<String> = store
        .snapshot()
        .unwrap()
        .into_iter()
        .map(|v| v.caregiver_id)
        .collect();
    assert_eq!(caregivers, vec!["", "caregiver1", "caregiver2"]);

    // The first record no longer matches, so the next call reaches the second.
    store.unassign("dup", "caregiver1").await.unwrap();
    let caregivers: Vec<String> = store
        .snapshot()
        .unwrap()
        .into_iter()
        .map(|v| v.caregiver_id)
        .collect();
    assert_eq!(caregivers, vec!["", "", "caregiver2"]);
}

#[tokio::test]
async fn clones_share_one_calendar() {
    let store = InMemoryVisitStore::new(vec![visit("1", "caregiver1", 0, 60)]);
    let other = store.clone();

    other.insert(visit("2", "caregiver2", 60, 120)).unwrap();
    other.unassign("1", "caregiver1").await.unwrap();

    assert_eq!(store.len().unwrap(), 2);
    assert_eq!(store.snapshot().unwrap()[0].caregiver_id, UNASSIGNED);
}
