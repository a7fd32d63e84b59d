//! Tests for the session store lifecycle.

use super::*;
use crate::domain::ports::{MemorySessionSlot, MockSessionSlot, fixture_roster};
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn traveler() -> User {
    fixture_roster()
        .expect("fixture roster decodes")
        .into_iter()
        .next()
        .expect("roster is non-empty")
}

#[fixture]
fn slot() -> MemorySessionSlot {
    MemorySessionSlot::default()
}

#[rstest]
fn new_store_is_loading_and_logged_out(slot: MemorySessionSlot) {
    let store = SessionStore::new(slot);
    assert!(store.is_loading());
    assert!(!store.is_authenticated());
    assert!(store.user().is_none());
}

#[rstest]
fn restore_of_empty_slot_is_logged_out(slot: MemorySessionSlot) {
    let mut store = SessionStore::new(slot);
    let session = store.restore();
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
}

#[rstest]
fn restore_reproduces_the_committed_session(slot: MemorySessionSlot, traveler: User) {
    let mut first = SessionStore::new(slot.clone());
    first.restore();
    first.commit(traveler.clone()).expect("commit succeeds");
    let committed = first.session().clone();

    let mut second = SessionStore::new(slot);
    let restored = second.restore();
    assert_eq!(restored, &committed);
    assert_eq!(restored.user(), Some(&traveler));
}

#[rstest]
#[case("not json")]
#[case("{\"id\": \"1\"}")]
#[case("null")]
#[case("")]
fn restore_swallows_corrupt_records(#[case] record: &str) {
    let mut store = SessionStore::new(MemorySessionSlot::with_record(record));
    let session = store.restore();
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
}

#[rstest]
fn restore_swallows_read_failures() {
    let mut slot = MockSessionSlot::new();
    slot.expect_load()
        .times(1)
        .returning(|| Err(SessionSlotError::read("permission denied")));

    let mut store = SessionStore::new(slot);
    let session = store.restore();
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
}

#[rstest]
fn restore_reads_the_slot_only_once() {
    let mut slot = MockSessionSlot::new();
    slot.expect_load().times(1).returning(|| Ok(None));

    let mut store = SessionStore::new(slot);
    store.restore();
    store.restore();
    assert!(!store.is_loading());
}

#[rstest]
fn commit_writes_the_record_without_a_password(slot: MemorySessionSlot, traveler: User) {
    let mut store = SessionStore::new(slot.clone());
    store.restore();
    store.commit(traveler.clone()).expect("commit succeeds");

    assert!(store.is_authenticated());
    assert_eq!(store.user(), Some(&traveler));

    let record: serde_json::Value =
        serde_json::from_str(&slot.contents().expect("record stored")).expect("valid json");
    assert_eq!(record["email"], json!("voyageur@example.com"));
    assert!(record.get("password").is_none());
}

#[rstest]
fn failed_commit_leaves_session_unchanged(traveler: User) {
    let mut slot = MockSessionSlot::new();
    slot.expect_load().returning(|| Ok(None));
    slot.expect_store()
        .times(1)
        .returning(|_| Err(SessionSlotError::write("quota exceeded")));

    let mut store = SessionStore::new(slot);
    store.restore();
    let before = store.session().clone();

    let err = store.commit(traveler).expect_err("commit fails");
    assert!(matches!(err, SessionStoreError::Slot(_)));
    assert_eq!(store.session(), &before);
}

#[rstest]
fn clear_removes_the_record(slot: MemorySessionSlot, traveler: User) {
    let mut store = SessionStore::new(slot.clone());
    store.restore();
    store.commit(traveler).expect("commit succeeds");

    store.clear();
    assert!(!store.is_authenticated());
    assert_eq!(slot.contents(), None);
}

#[rstest]
fn clear_logs_out_even_when_removal_fails(traveler: User) {
    let mut slot = MockSessionSlot::new();
    slot.expect_load().returning(|| Ok(None));
    slot.expect_store().returning(|_| Ok(()));
    slot.expect_remove()
        .times(1)
        .returning(|| Err(SessionSlotError::remove("read-only medium")));

    let mut store = SessionStore::new(slot);
    store.restore();
    store.commit(traveler).expect("commit succeeds");
    store.clear();
    assert!(!store.is_authenticated());
}

#[rstest]
fn clear_on_logged_out_session_is_harmless(slot: MemorySessionSlot) {
    let mut store = SessionStore::new(slot.clone());
    store.restore();
    store.clear();
    assert!(!store.is_authenticated());
    assert_eq!(slot.contents(), None);
}

#[rstest]
fn session_serialises_with_derived_flag(slot: MemorySessionSlot, traveler: User) {
    let mut store = SessionStore::new(slot);
    store.restore();
    assert_eq!(
        serde_json::to_value(store.session()).expect("session serialises"),
        json!({"user": null, "isAuthenticated": false, "loading": false})
    );

    store.commit(traveler).expect("commit succeeds");
    let value = serde_json::to_value(store.session()).expect("session serialises");
    assert_eq!(value["isAuthenticated"], json!(true));
    assert_eq!(value["user"]["id"], json!("1"));
}

#[rstest]
fn close_returns_the_slot(slot: MemorySessionSlot, traveler: User) {
    let mut store = SessionStore::new(slot);
    store.restore();
    store.commit(traveler).expect("commit succeeds");
    let slot = store.close();
    assert!(slot.contents().is_some());
}
