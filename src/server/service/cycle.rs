//! Daily cycle policy and reset engine.
//!
//! `CyclePolicy` is pure: it maps instants onto the daily boundary at a fixed local
//! hour and decides whether a boundary has been crossed. `CycleResetService` applies
//! that decision to a `CycleState` and persists the result. The reset engine runs at
//! the top of every entry point (startup, scheduled job, each interaction) since the
//! scheduler and live interactions share no ordering guarantee.

use chrono::{DateTime, FixedOffset, NaiveTime, TimeDelta, Timelike, Utc};

use crate::server::{data::state::StateRepository, model::cycle::CycleState};

/// Format used for timestamps shown to users, e.g. `October 19, 2026, 08:01:05 PM`.
const DISPLAY_FORMAT: &str = "%B %-d, %Y, %I:%M:%S %p";

/// Daily boundary at a fixed local hour in a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePolicy {
    boundary: NaiveTime,
    offset: FixedOffset,
}

impl CyclePolicy {
    /// Creates a policy with the boundary at `boundary_hour:00:00` local time.
    ///
    /// # Returns
    /// - `Some(CyclePolicy)` - Valid boundary hour (0-23)
    /// - `None` - `boundary_hour` is out of range
    pub fn new(boundary_hour: u32, offset: FixedOffset) -> Option<Self> {
        let boundary = NaiveTime::from_hms_opt(boundary_hour, 0, 0)?;
        Some(Self { boundary, offset })
    }

    pub fn boundary_hour(&self) -> u32 {
        self.boundary.hour()
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns the most recent boundary at or before `instant`.
    ///
    /// When the local time of day is before the boundary hour the boundary belongs
    /// to the previous local day. Returns `None` when the boundary falls outside the
    /// range chrono can represent, which only happens for corrupt markers near the
    /// ends of that range.
    pub fn cycle_start(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let utc_offset = TimeDelta::seconds(i64::from(self.offset.local_minus_utc()));
        let local = instant.naive_utc().checked_add_signed(utc_offset)?;
        let mut date = local.date();
        if local.time() < self.boundary {
            date = date.pred_opt()?;
        }

        let local_boundary = date.and_time(self.boundary);

        local_boundary
            .checked_sub_signed(utc_offset)
            .map(|boundary| boundary.and_utc())
    }

    /// Decides whether `now` belongs to a later cycle than `last_reset`.
    ///
    /// A `last_reset` lying in a later cycle than `now` (clock skew or a hand-edited
    /// file) is also reported as due so the stored marker is re-anchored to `now`.
    /// A `last_reset` slightly in the future but within the current cycle is not.
    /// A `last_reset` whose boundary cannot be computed is due as well.
    pub fn should_reset(&self, now: DateTime<Utc>, last_reset: DateTime<Utc>) -> bool {
        match (self.cycle_start(now), self.cycle_start(last_reset)) {
            (Some(current), Some(previous)) => current != previous,
            _ => true,
        }
    }

    /// Six-field cron expression (seconds first, UTC) firing at every boundary.
    pub fn cron_expression(&self) -> String {
        let offset_minutes = i64::from(self.offset.local_minus_utc()) / 60;
        let boundary_minutes = i64::from(self.boundary.hour()) * 60;
        let utc_minutes = (boundary_minutes - offset_minutes).rem_euclid(24 * 60);

        format!("0 {} {} * * *", utc_minutes % 60, utc_minutes / 60)
    }

    /// Formats an instant in the policy's local offset for display in chat.
    pub fn format_local(&self, instant: DateTime<Utc>) -> String {
        instant
            .with_timezone(&self.offset)
            .format(DISPLAY_FORMAT)
            .to_string()
    }
}

/// Reset engine applying a `CyclePolicy` to the cycle state.
pub struct CycleResetService<'a> {
    repo: &'a StateRepository,
    policy: CyclePolicy,
}

impl<'a> CycleResetService<'a> {
    /// Creates a new CycleResetService instance.
    ///
    /// # Arguments
    /// - `repo` - Repository used to persist the state after a reset
    /// - `policy` - Daily boundary policy
    pub fn new(repo: &'a StateRepository, policy: CyclePolicy) -> Self {
        Self { repo, policy }
    }

    /// Starts a new cycle if `now` has crossed a boundary since the last reset.
    ///
    /// Clears counter and participants, sets `last_reset` to `now` and persists. A
    /// failed save is logged; the in-memory reset stands. Calling this twice in a row
    /// only resets once because the second call sees the advanced `last_reset`.
    ///
    /// # Arguments
    /// - `state` - The cycle state, already locked by the caller
    /// - `now` - Current instant
    ///
    /// # Returns
    /// - `true` - A reset took place
    /// - `false` - Still within the current cycle
    pub async fn maybe_reset(&self, state: &mut CycleState, now: DateTime<Utc>) -> bool {
        if !self.policy.should_reset(now, state.last_reset) {
            return false;
        }

        if state.last_reset > now {
            tracing::warn!(
                "Last reset {} lies in a later cycle than now ({}), re-anchoring",
                state.last_reset,
                now
            );
        }

        let previous_count = state.counter;
        let previous_reset = state.last_reset;
        state.start_new_cycle(now);

        tracing::info!(
            "Daily data reset at {} (previous cycle began {} with {} catches)",
            now,
            previous_reset,
            previous_count
        );

        if let Err(e) = self.repo.save(state).await {
            tracing::error!("Failed to persist cycle reset: {}", e);
        }

        true
    }
}
