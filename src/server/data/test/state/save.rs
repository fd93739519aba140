use super::*;

/// Tests that a saved state loads back unchanged.
///
/// Expected: loaded state equals saved state
#[tokio::test]
async fn saved_state_loads_back() {
    let test = TestBuilder::new().build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let mut state = CycleState::new(utc(2026, 10, 18, 20, 0));
    state.record_participation(1234, "alice", utc(2026, 10, 18, 21, 0));
    state.record_participation(5678, "bob", utc(2026, 10, 19, 9, 30));
    state.active_control = Some(ControlMessageRef::new(555, 777));

    repo.save(&state).await.unwrap();
    let loaded = repo.load(now()).await;

    assert_eq!(loaded, state);
}

/// Tests the on-disk layout written by save.
///
/// Verifies camelCase keys, a millisecond reset marker, string user keys and
/// string control message IDs.
///
/// Expected: document matches the persisted format
#[tokio::test]
async fn writes_current_format() {
    let test = TestBuilder::new().build().unwrap();
    let repo = StateRepository::new(test.state_path());

    let mut state = CycleState::new(utc(2026, 10, 18, 20, 0));
    state.record_participation(1234, "alice", utc(2026, 10, 18, 21, 0));
    state.active_control = Some(ControlMessageRef::new(555, 777));

    repo.save(&state).await.unwrap();
    let stored = test.read_state().unwrap();

    assert_eq!(stored["dailyCount"], 1);
    assert_eq!(
        stored["lastReset"],
        utc(2026, 10, 18, 20, 0).timestamp_millis()
    );
    assert_eq!(stored["users"]["1234"]["username"], "alice");
    assert!(stored["users"]["1234"]["fishedAt"].is_string());
    assert_eq!(stored["buttonChannelId"], "555");
    assert_eq!(stored["buttonMessageId"], "777");
}

/// Tests that control message keys are omitted before setup.
///
/// Expected: no buttonChannelId or buttonMessageId keys
#[tokio::test]
async fn omits_control_ids_when_unset() {
    let test = TestBuilder::new().build().unwrap();
    let repo = StateRepository::new(test.state_path());

    repo.save(&CycleState::new(now())).await.unwrap();
    let stored = test.read_state().unwrap();

    assert!(stored.get("buttonChannelId").is_none());
    assert!(stored.get("buttonMessageId").is_none());
}

/// Tests that save replaces the whole file.
///
/// Verifies that participants removed by a reset do not linger on disk and that
/// a corrupt file is overwritten cleanly.
///
/// Expected: file contains only the latest state, no temporary file left behind
#[tokio::test]
async fn overwrites_whole_file() {
    let test = TestBuilder::new()
        .with_raw_state("garbage that is not json")
        .build()
        .unwrap();
    let repo = StateRepository::new(test.state_path());

    let mut state = CycleState::new(utc(2026, 10, 18, 20, 0));
    state.record_participation(1234, "alice", utc(2026, 10, 18, 21, 0));
    repo.save(&state).await.unwrap();

    state.start_new_cycle(utc(2026, 10, 19, 20, 0));
    repo.save(&state).await.unwrap();

    let stored = test.read_state().unwrap();
    assert_eq!(stored["dailyCount"], 0);
    assert_eq!(stored["users"].as_object().map(|u| u.len()), Some(0));

    let leftovers: Vec<_> = std::fs::read_dir(test.dir())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

/// Tests saving into a directory that does not exist.
///
/// Expected: Err(StorageError::Write)
#[tokio::test]
async fn fails_when_directory_missing() {
    let test = TestBuilder::new().build().unwrap();
    let repo = StateRepository::new(test.dir().join("missing").join("state.json"));

    let result = repo.save(&CycleState::new(now())).await;

    assert!(matches!(
        result,
        Err(crate::server::error::storage::StorageError::Write { .. })
    ));
}
