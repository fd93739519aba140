//! State document factory.
//!
//! Produces JSON documents in the layout of the bot's state file: camelCase keys,
//! a millisecond reset marker, users keyed by stringified ID with RFC 3339
//! timestamps, and control message IDs stored as strings.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::factory::helpers::{next_id, utc};

/// Factory for state file documents.
///
/// Unless overridden, the daily count matches the number of users added, so the
/// document is internally consistent.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::state::StateDocumentFactory;
///
/// let document = StateDocumentFactory::new()
///     .user(42, "alice")
///     .daily_count(7)
///     .build();
/// ```
pub struct StateDocumentFactory {
    daily_count: Option<u64>,
    last_reset: Value,
    users: Map<String, Value>,
    control: Option<(String, String)>,
    fished_at: DateTime<Utc>,
}

impl StateDocumentFactory {
    /// Creates a factory with no users, no control message and a reset marker of
    /// 2026-10-18 20:00 UTC.
    pub fn new() -> Self {
        let last_reset = utc(2026, 10, 18, 20, 0);
        Self {
            daily_count: None,
            last_reset: json!(last_reset.timestamp_millis()),
            users: Map::new(),
            control: None,
            fished_at: last_reset,
        }
    }

    /// Sets the millisecond reset marker.
    pub fn last_reset(mut self, instant: DateTime<Utc>) -> Self {
        self.last_reset = json!(instant.timestamp_millis());
        self
    }

    /// Sets a legacy date-string reset marker such as `"Sat Oct 17 2026"`.
    pub fn legacy_last_reset(mut self, date: impl Into<String>) -> Self {
        self.last_reset = Value::String(date.into());
        self
    }

    /// Removes the reset marker entirely.
    pub fn without_last_reset(mut self) -> Self {
        self.last_reset = Value::Null;
        self
    }

    /// Overrides the stored daily count.
    pub fn daily_count(mut self, count: u64) -> Self {
        self.daily_count = Some(count);
        self
    }

    /// Sets the timestamp recorded for users added afterwards.
    pub fn fished_at(mut self, instant: DateTime<Utc>) -> Self {
        self.fished_at = instant;
        self
    }

    /// Adds a participant.
    pub fn user(mut self, user_id: u64, username: impl Into<String>) -> Self {
        self.users.insert(
            user_id.to_string(),
            json!({
                "username": username.into(),
                "fishedAt": self.fished_at.to_rfc3339(),
            }),
        );
        self
    }

    /// Adds a participant with a generated ID and name.
    pub fn any_user(self) -> Self {
        let id = next_id();
        self.user(id, format!("Angler {}", id))
    }

    /// Adds a participant under a raw key, e.g. one that is not a valid user ID.
    pub fn raw_user(mut self, key: impl Into<String>, username: impl Into<String>) -> Self {
        self.users.insert(
            key.into(),
            json!({
                "username": username.into(),
                "fishedAt": self.fished_at.to_rfc3339(),
            }),
        );
        self
    }

    /// Records the active control message.
    pub fn control(self, channel_id: u64, message_id: u64) -> Self {
        self.raw_control(channel_id.to_string(), message_id.to_string())
    }

    /// Records the active control message with raw ID strings.
    pub fn raw_control(mut self, channel_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        self.control = Some((channel_id.into(), message_id.into()));
        self
    }

    /// Builds the document.
    pub fn build(self) -> Value {
        let daily_count = self.daily_count.unwrap_or(self.users.len() as u64);

        let mut document = Map::new();
        document.insert("dailyCount".to_string(), json!(daily_count));
        if !self.last_reset.is_null() {
            document.insert("lastReset".to_string(), self.last_reset);
        }
        document.insert("users".to_string(), Value::Object(self.users));
        if let Some((channel_id, message_id)) = self.control {
            document.insert("buttonChannelId".to_string(), json!(channel_id));
            document.insert("buttonMessageId".to_string(), json!(message_id));
        }

        Value::Object(document)
    }
}

impl Default for StateDocumentFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a default state document with no participants.
pub fn create_state() -> Value {
    StateDocumentFactory::new().build()
}
