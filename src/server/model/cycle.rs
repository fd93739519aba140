//! Domain models for the daily fishing cycle.
//!
//! `CycleState` is the single piece of mutable state the bot owns. It is loaded from
//! the state file on startup, mutated in place by the reset engine and the
//! interaction service, and persisted after every mutation.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeMap;

use crate::server::model::control::ControlMessageRef;

/// Length of one cycle. Used to back-date migrated reset markers.
pub const CYCLE_LENGTH: TimeDelta = TimeDelta::days(1);

/// Proof that a user has already fished in the current cycle.
///
/// Created once per user per cycle and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipationRecord {
    /// Username shown in the public confirmation message.
    pub display_name: String,
    /// Instant the catch was recorded.
    pub participated_at: DateTime<Utc>,
}

/// Counters, participants and control message of the current cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleState {
    /// Number of successful catches in the current cycle.
    pub counter: u64,
    /// Instant the current cycle began.
    pub last_reset: DateTime<Utc>,
    /// Participation records keyed by Discord user ID.
    pub participants: BTreeMap<u64, ParticipationRecord>,
    /// The live "click to fish" message, if one has been published.
    pub active_control: Option<ControlMessageRef>,
}

impl CycleState {
    /// Creates an empty state whose cycle begins at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            counter: 0,
            last_reset: now,
            participants: BTreeMap::new(),
            active_control: None,
        }
    }

    /// Checks whether the user already has a record in the current cycle.
    pub fn has_participated(&self, user_id: u64) -> bool {
        self.participants.contains_key(&user_id)
    }

    /// Records a catch for the user and increments the counter.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID of the participant
    /// - `display_name` - Name used in the confirmation message
    /// - `now` - Instant of the catch
    ///
    /// # Returns
    /// - `Some(counter)` - The new counter value after recording
    /// - `None` - The user already participated this cycle; nothing changed
    pub fn record_participation(
        &mut self,
        user_id: u64,
        display_name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Option<u64> {
        if self.has_participated(user_id) {
            return None;
        }

        self.participants.insert(
            user_id,
            ParticipationRecord {
                display_name: display_name.into(),
                participated_at: now,
            },
        );
        self.counter += 1;

        Some(self.counter)
    }

    /// Removes a record created in this cycle, undoing its counter increment.
    ///
    /// Used when the confirmation for a freshly recorded catch could not be delivered.
    ///
    /// # Returns
    /// - `true` - A record was removed
    /// - `false` - The user had no record
    pub fn revoke_participation(&mut self, user_id: u64) -> bool {
        if self.participants.remove(&user_id).is_some() {
            self.counter = self.counter.saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// Clears counter and participants and starts a new cycle at `now`.
    ///
    /// The active control reference is kept; the control message stays valid
    /// across cycles.
    pub fn start_new_cycle(&mut self, now: DateTime<Utc>) {
        self.counter = 0;
        self.participants.clear();
        self.last_reset = now;
    }

    /// Forces `counter` to match the number of participation records.
    ///
    /// # Returns
    /// - `true` - The counter was out of sync and has been corrected
    /// - `false` - The counter was already consistent
    pub fn reconcile_counter(&mut self) -> bool {
        let expected = self.participants.len() as u64;
        if self.counter == expected {
            return false;
        }

        self.counter = expected;
        true
    }
}
