use super::*;
use crate::server::service::cycle::{CyclePolicy, CycleResetService};
use chrono::FixedOffset;

/// Tests loading when no state file exists yet.
///
/// Verifies that the first run starts an empty cycle at the current instant
/// without creating the file.
///
/// Expected: default state, file still absent
#[tokio::test]
async fn missing_file_yields_empty_cycle() {
    let test = TestBuilder::new().build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state, CycleState::new(now()));
    assert!(!test.state_exists());
}

/// Tests loading a file that is not valid JSON.
///
/// Verifies that a corrupt file does not prevent startup and is left untouched
/// until the next save overwrites it.
///
/// Expected: default state, file contents unchanged
#[tokio::test]
async fn corrupt_file_yields_empty_cycle() {
    let test = TestBuilder::new()
        .with_raw_state("{ \"dailyCount\": ")
        .build()
        .unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state, CycleState::new(now()));
    assert_eq!(test.read_raw_state().unwrap(), "{ \"dailyCount\": ");
}

/// Tests loading a document whose fields have the wrong types.
///
/// Expected: default state
#[tokio::test]
async fn wrongly_typed_document_yields_empty_cycle() {
    let test = TestBuilder::new()
        .with_raw_state(r#"{ "dailyCount": "three", "users": [] }"#)
        .build()
        .unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state, CycleState::new(now()));
}

/// Tests loading a document in the current format.
///
/// Verifies that counter, reset marker, participants and the control message
/// reference all survive, and that a consistent document is not rewritten.
///
/// Expected: state mirrors the document, file unchanged
#[tokio::test]
async fn loads_current_format() {
    let fished_at = utc(2026, 10, 18, 21, 15);
    let document = StateDocumentFactory::new()
        .last_reset(utc(2026, 10, 18, 20, 0))
        .fished_at(fished_at)
        .user(1234, "alice")
        .user(5678, "bob")
        .control(555, 777)
        .build();
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let before = test.read_raw_state().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.counter, 2);
    assert_eq!(state.last_reset, utc(2026, 10, 18, 20, 0));
    assert_eq!(state.participants.len(), 2);
    assert_eq!(state.participants[&1234].display_name, "alice");
    assert_eq!(state.participants[&1234].participated_at, fished_at);
    assert_eq!(state.participants[&5678].display_name, "bob");
    assert_eq!(state.active_control, Some(ControlMessageRef::new(555, 777)));
    assert_eq!(test.read_raw_state().unwrap(), before);
}

/// Tests loading a document without control message IDs.
///
/// Verifies that a pond that was never set up loads with no active control and
/// is not treated as needing migration.
///
/// Expected: active_control None, file unchanged
#[tokio::test]
async fn missing_control_ids_load_as_none() {
    let document = StateDocumentFactory::new().user(1, "alice").build();
    let test = TestBuilder::new().with_state(document).build().unwrap();
    let before = test.read_raw_state().unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.active_control, None);
    assert_eq!(state.counter, 1);
    assert_eq!(test.read_raw_state().unwrap(), before);
}

/// Tests loading a document that only contains some of the fields.
///
/// Expected: missing users and counter default to empty and zero
#[tokio::test]
async fn sparse_document_uses_defaults() {
    let marker = utc(2026, 10, 18, 20, 0).timestamp_millis();
    let test = TestBuilder::new()
        .with_raw_state(format!("{{ \"lastReset\": {} }}", marker))
        .build()
        .unwrap();
    let repo = StateRepository::new(test.state_path());

    let state = repo.load(now()).await;

    assert_eq!(state.counter, 0);
    assert!(state.participants.is_empty());
    assert_eq!(state.last_reset, utc(2026, 10, 18, 20, 0));
}

/// Tests loading a reset marker at the earliest representable instant.
///
/// Verifies that startup survives the marker with a positive UTC offset and that
/// the following reset check starts a new cycle at the current instant.
///
/// Expected: reset due, last_reset re-anchored to now
#[tokio::test]
async fn extreme_past_marker_resets_without_panicking() {
    let test = TestBuilder::new()
        .with_raw_state(format!(
            r#"{{ "dailyCount": 0, "lastReset": {}, "users": {{}} }}"#,
            DateTime::<Utc>::MIN_UTC.timestamp_millis()
        ))
        .build()
        .unwrap();
    let repo = StateRepository::new(test.state_path());
    let policy = CyclePolicy::new(5, FixedOffset::east_opt(330 * 60).unwrap()).unwrap();

    let mut state = repo.load(now()).await;
    let reset = CycleResetService::new(&repo, policy)
        .maybe_reset(&mut state, now())
        .await;

    assert!(reset);
    assert_eq!(state.last_reset, now());
    assert_eq!(test.read_state().unwrap()["lastReset"], now().timestamp_millis());
}
