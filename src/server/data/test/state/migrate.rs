use super::*;
use crate::server::service::cycle::CyclePolicy;
use chrono::FixedOffset;

/// Tests migrating a legacy date-string reset marker.
///
/// Verifies that the marker becomes an instant one cycle before the recorded date,
/// that the file is rewritten with a millisecond marker and that the next reset
/// evaluation starts a new cycle.
///
/// Expected: last_reset 2026-10-16 00:00 UTC, file rewritten, reset due
#[tokio::test]
async fn migrates_legacy_date_marker() {
    let document = StateDocumentFactory::new()
        .legacy_last_reset("Sat Oct 17 2026")
        .user(1234, "alice")
        .build();
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.last_reset, utc(2026, 10, 16, 0, 0));
    assert_eq!(state.participants.len(), 1);

    let stored = test.read_state().unwrap();
    assert_eq!(stored["lastReset"], utc(2026, 10, 16, 0, 0).timestamp_millis());

    let policy = CyclePolicy::new(20, FixedOffset::east_opt(0).unwrap()).unwrap();
    assert!(policy.should_reset(now(), state.last_reset));
}

/// Tests migrating a legacy marker recording today's date.
///
/// Verifies that a pond last reset "today" by the old format still gets a fresh
/// cycle, since the old marker cannot tell which side of the boundary it was on.
///
/// Expected: last_reset one cycle before midnight today, reset due
#[tokio::test]
async fn migrates_same_day_legacy_marker_to_reset_due() {
    let document = StateDocumentFactory::new()
        .legacy_last_reset("Mon Oct 19 2026")
        .build();
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.last_reset, utc(2026, 10, 18, 0, 0));
    let policy = CyclePolicy::new(20, FixedOffset::east_opt(0).unwrap()).unwrap();
    assert!(policy.should_reset(now(), state.last_reset));
}

/// Tests migrating a legacy marker that cannot be parsed.
///
/// Expected: last_reset one cycle before now
#[tokio::test]
async fn unparseable_legacy_marker_falls_back_to_now() {
    let document = StateDocumentFactory::new()
        .legacy_last_reset("sometime last week")
        .build();
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.last_reset, utc(2026, 10, 18, 10, 0));
    assert!(test.read_state().unwrap()["lastReset"].is_i64());
}

/// Tests loading a document with no reset marker at all.
///
/// Expected: last_reset one cycle before now, file rewritten with a marker
#[tokio::test]
async fn missing_marker_is_back_dated() {
    let document = StateDocumentFactory::new().without_last_reset().build();
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.last_reset, utc(2026, 10, 18, 10, 0));
    assert_eq!(
        test.read_state().unwrap()["lastReset"],
        utc(2026, 10, 18, 10, 0).timestamp_millis()
    );
}

/// Tests reconciling a stored counter that disagrees with the participants.
///
/// Expected: counter equals participant count, file corrected
#[tokio::test]
async fn reconciles_counter_mismatch() {
    let document = StateDocumentFactory::new()
        .user(1, "alice")
        .user(2, "bob")
        .daily_count(9)
        .build();
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.counter, 2);
    assert_eq!(test.read_state().unwrap()["dailyCount"], 2);
}

/// Tests dropping participants whose key is not a user ID.
///
/// Expected: only valid participants kept, counter reconciled
#[tokio::test]
async fn drops_invalid_user_ids() {
    let document = StateDocumentFactory::new()
        .user(1, "alice")
        .raw_user("not-a-snowflake", "mallory")
        .build();
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.participants.len(), 1);
    assert!(state.has_participated(1));
    assert_eq!(state.counter, 1);
    assert!(test.read_state().unwrap()["users"]
        .get("not-a-snowflake")
        .is_none());
}

/// Tests discarding an unparseable control message reference.
///
/// Expected: active_control None, IDs removed from the file
#[tokio::test]
async fn discards_unparseable_control_reference() {
    let document = StateDocumentFactory::new()
        .raw_control("555", "not-a-message")
        .build();
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.active_control, None);
    assert!(test.read_state().unwrap().get("buttonMessageId").is_none());
}

/// Tests discarding a control reference with only one of its two IDs.
///
/// Expected: active_control None
#[tokio::test]
async fn discards_incomplete_control_reference() {
    let marker = utc(2026, 10, 18, 20, 0).timestamp_millis();
    let test = TestBuilder::new()
        .with_raw_state(format!(
            r#"{{ "dailyCount": 0, "lastReset": {}, "users": {{}}, "buttonChannelId": "555" }}"#,
            marker
        ))
        .build()
        .unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.active_control, None);
    assert!(test.read_state().unwrap().get("buttonChannelId").is_none());
}

/// Tests discarding a control reference holding a zero ID.
///
/// Expected: active_control None
#[tokio::test]
async fn discards_zero_control_ids() {
    let document = StateDocumentFactory::new().control(0, 777).build();
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.active_control, None);
}

/// Tests dropping a participant whose record cannot be decoded.
///
/// Verifies that one damaged entry does not discard the rest of the document,
/// so the remaining users still count as having fished this cycle.
///
/// Expected: valid participants kept, damaged one dropped, counter reconciled
#[tokio::test]
async fn drops_malformed_participant_only() {
    let mut document = StateDocumentFactory::new()
        .user(1, "alice")
        .any_user()
        .user(2, "bob")
        .build();
    document["users"]["2"]["fishedAt"] = serde_json::json!("not a timestamp");
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.participants.len(), 2);
    assert!(state.has_participated(1));
    assert!(!state.has_participated(2));
    assert_eq!(state.counter, 2);
    assert_eq!(state.last_reset, utc(2026, 10, 18, 20, 0));

    let stored = test.read_state().unwrap();
    assert!(stored["users"].get("2").is_none());
    assert_eq!(stored["dailyCount"], 2);
}
