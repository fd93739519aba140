//! Cycle state repository backed by a flat JSON file.
//!
//! This module provides the `StateRepository` for loading and saving the bot's
//! `CycleState`. The on-disk document keeps the camelCase shape written by earlier
//! versions of the bot (`dailyCount`, `lastReset`, `users`, `buttonChannelId`,
//! `buttonMessageId`) so existing files keep working. Conversion between the stored
//! document and the domain model happens here at the repository boundary.
//!
//! Two legacy shapes are migrated on load:
//! - `lastReset` stored as a human-readable date string (`"Mon Oct 19 2026"`)
//! - control message IDs missing or unparseable
//!
//! Damaged participant entries are dropped one by one rather than failing the load.
//!
//! Migrated documents are written back in the current shape before `load` returns.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::server::{
    error::storage::StorageError,
    model::{
        control::ControlMessageRef,
        cycle::{CycleState, ParticipationRecord, CYCLE_LENGTH},
    },
};

/// Date format produced by JavaScript's `Date.prototype.toDateString`.
const LEGACY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Reset marker as found on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
enum StoredResetMarker {
    /// Milliseconds since the Unix epoch (current shape).
    Millis(i64),
    /// Calendar date string (legacy shape).
    DateString(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct StoredParticipant {
    username: String,
    fished_at: DateTime<Utc>,
}

/// Participant entry as found on disk.
///
/// Entries that do not match the participant shape are kept as raw JSON so one
/// damaged record does not fail the whole document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
enum StoredParticipantEntry {
    Valid(StoredParticipant),
    Malformed(serde_json::Value),
}

/// State document as persisted in the JSON file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct StoredState {
    #[serde(default)]
    daily_count: u64,
    #[serde(default)]
    last_reset: Option<StoredResetMarker>,
    #[serde(default)]
    users: BTreeMap<String, StoredParticipantEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    button_channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    button_message_id: Option<String>,
}

impl StoredState {
    /// Converts a domain model into the current on-disk shape.
    fn from_domain(state: &CycleState) -> Self {
        Self {
            daily_count: state.counter,
            last_reset: Some(StoredResetMarker::Millis(state.last_reset.timestamp_millis())),
            users: state
                .participants
                .iter()
                .map(|(user_id, record)| {
                    (
                        user_id.to_string(),
                        StoredParticipantEntry::Valid(StoredParticipant {
                            username: record.display_name.clone(),
                            fished_at: record.participated_at,
                        }),
                    )
                })
                .collect(),
            button_channel_id: state.active_control.map(|c| c.channel_id.to_string()),
            button_message_id: state.active_control.map(|c| c.message_id.to_string()),
        }
    }

    /// Converts the stored document into a domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `now` - Current instant, used to back-date legacy reset markers
    ///
    /// # Returns
    /// - `(CycleState, true)` - The document used a legacy shape or was inconsistent
    ///   and should be rewritten
    /// - `(CycleState, false)` - The document was already in the current shape
    fn into_domain(self, now: DateTime<Utc>) -> (CycleState, bool) {
        let mut migrated = false;

        let last_reset = match self.last_reset {
            Some(StoredResetMarker::Millis(millis)) => match DateTime::from_timestamp_millis(millis)
            {
                Some(instant) => instant,
                None => {
                    tracing::warn!("Stored reset timestamp {} is out of range", millis);
                    migrated = true;
                    now - CYCLE_LENGTH
                }
            },
            Some(StoredResetMarker::DateString(date)) => {
                migrated = true;
                migrate_date_marker(&date, now)
            }
            None => {
                tracing::warn!("State file has no reset marker");
                migrated = true;
                now - CYCLE_LENGTH
            }
        };

        let mut participants = BTreeMap::new();
        for (user_id, entry) in self.users {
            let participant = match entry {
                StoredParticipantEntry::Valid(participant) => participant,
                StoredParticipantEntry::Malformed(raw) => {
                    tracing::warn!("Dropping malformed participant '{}': {}", user_id, raw);
                    migrated = true;
                    continue;
                }
            };

            match user_id.parse::<u64>() {
                Ok(id) => {
                    participants.insert(
                        id,
                        ParticipationRecord {
                            display_name: participant.username,
                            participated_at: participant.fished_at,
                        },
                    );
                }
                Err(e) => {
                    tracing::warn!("Dropping participant with invalid user ID '{}': {}", user_id, e);
                    migrated = true;
                }
            }
        }

        let active_control = match (self.button_channel_id, self.button_message_id) {
            (Some(channel_id), Some(message_id)) => {
                match (channel_id.parse::<u64>(), message_id.parse::<u64>()) {
                    // Snowflakes are never zero.
                    (Ok(channel_id), Ok(message_id)) if channel_id != 0 && message_id != 0 => {
                        Some(ControlMessageRef::new(channel_id, message_id))
                    }
                    _ => {
                        tracing::warn!(
                            "Discarding unparseable control message reference {}/{}",
                            channel_id,
                            message_id
                        );
                        migrated = true;
                        None
                    }
                }
            }
            (None, None) => None,
            _ => {
                tracing::warn!("Discarding incomplete control message reference");
                migrated = true;
                None
            }
        };

        let mut state = CycleState {
            counter: self.daily_count,
            last_reset,
            participants,
            active_control,
        };

        if state.reconcile_counter() {
            tracing::warn!(
                "Stored daily count {} did not match {} participants, corrected",
                self.daily_count,
                state.counter
            );
            migrated = true;
        }

        (state, migrated)
    }
}

/// Converts a legacy date-string reset marker into an instant.
///
/// The result is one full cycle before the start of the recorded date (capped at
/// `now`), which guarantees the next reset evaluation starts a new cycle.
fn migrate_date_marker(date: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let recorded = match NaiveDate::parse_from_str(date, LEGACY_DATE_FORMAT) {
        Ok(date) => date.and_time(NaiveTime::MIN).and_utc().min(now),
        Err(e) => {
            tracing::warn!("Unrecognised legacy reset date '{}': {}", date, e);
            now
        }
    };

    tracing::info!(
        "Migrating legacy reset marker '{}' to timestamp {}",
        date,
        recorded - CYCLE_LENGTH
    );

    recorded - CYCLE_LENGTH
}

/// Repository providing persistence for the single `CycleState` document.
///
/// Writes replace the whole file. The file is owned exclusively by this process.
#[derive(Debug, Clone)]
pub struct StateRepository {
    path: PathBuf,
}

impl StateRepository {
    /// Creates a new StateRepository for the given file path.
    ///
    /// The file does not need to exist yet; it is created by the first `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cycle state, falling back to a fresh state on any failure.
    ///
    /// A missing file is normal on first run and logged at info level. A file that
    /// cannot be read or parsed is logged as a warning and replaced by defaults in
    /// memory; it is overwritten on the next save. Legacy documents are migrated and
    /// written back immediately.
    ///
    /// # Arguments
    /// - `now` - Current instant; becomes `last_reset` of a fresh state
    ///
    /// # Returns
    /// - `CycleState` - The loaded, migrated, or default state
    pub async fn load(&self, now: DateTime<Utc>) -> CycleState {
        match self.read(now).await {
            Ok(Some((state, migrated))) => {
                if migrated {
                    match self.save(&state).await {
                        Ok(()) => tracing::info!(
                            "Migrated state file {} to the current format",
                            self.path.display()
                        ),
                        Err(e) => tracing::error!("Failed to persist migrated state: {}", e),
                    }
                }
                state
            }
            Ok(None) => {
                tracing::info!(
                    "No state file at {}, starting with an empty cycle",
                    self.path.display()
                );
                CycleState::new(now)
            }
            Err(e) => {
                tracing::warn!("{}; starting with an empty cycle", e);
                CycleState::new(now)
            }
        }
    }

    /// Reads and converts the state file.
    ///
    /// # Returns
    /// - `Ok(Some((state, migrated)))` - Document read; `migrated` is true if it needs rewriting
    /// - `Ok(None)` - No state file exists
    /// - `Err(StorageError::Read)` - File exists but could not be read
    /// - `Err(StorageError::Parse)` - File contents are not a state document
    async fn read(&self, now: DateTime<Utc>) -> Result<Option<(CycleState, bool)>, StorageError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let stored: StoredState =
            serde_json::from_str(&contents).map_err(|e| StorageError::Parse {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(Some(stored.into_domain(now)))
    }

    /// Persists the cycle state, replacing the whole file.
    ///
    /// The document is written to a temporary sibling file first and then renamed
    /// over the target so a crash mid-write never leaves a truncated state file.
    ///
    /// # Returns
    /// - `Ok(())` - State written
    /// - `Err(StorageError::Serialize)` - State could not be encoded
    /// - `Err(StorageError::Write)` - Temporary file could not be written or renamed
    pub async fn save(&self, state: &CycleState) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&StoredState::from_domain(state))
            .map_err(StorageError::Serialize)?;

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| StorageError::Write {
                path: tmp_path.clone(),
                source: e,
            })?;

        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| StorageError::Write {
                path: self.path.clone(),
                source: e,
            })?;

        tracing::debug!("Saved cycle state to {}", self.path.display());

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
