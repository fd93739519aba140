//! Interaction service: the per-user, per-cycle state machine.
//!
//! Each user moves from "not fished" to "fished" once per cycle. The service handles
//! the two triggers the bot reacts to:
//!
//! - **Setup** - posts a fresh control message in the invoking channel and records it
//! - **Participate** - records a catch, confirms it publicly and replaces the control
//!
//! Both start with a reset check under the cycle state lock and follow the order
//! mutate in memory, persist, respond. Participate releases the lock before it
//! replaces the control message.

use chrono::{DateTime, Utc};

use crate::server::{
    error::AppError,
    model::{
        control::ControlMessageRef,
        cycle::CycleState,
        trigger::{ParticipateTrigger, SetupTrigger, Trigger},
    },
    service::{
        control_message::ControlMessageService,
        cycle::{CyclePolicy, CycleResetService},
        message,
        platform::{Messenger, Reply, Responder},
    },
    state::{AppState, CycleStore},
};

/// Result of handling a fishing button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipateOutcome {
    /// The catch was recorded; `counter` is the new cycle total.
    Recorded { counter: u64 },
    /// The user already fished this cycle; nothing changed.
    AlreadyParticipated,
}

/// Result of handling any trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A new control message was posted.
    Setup(ControlMessageRef),
    Participate(ParticipateOutcome),
}

/// Service dispatching triggers against the shared cycle state.
pub struct InteractionService<'a> {
    store: &'a CycleStore,
    messenger: &'a dyn Messenger,
    policy: CyclePolicy,
}

impl<'a> InteractionService<'a> {
    /// Creates a new InteractionService instance.
    ///
    /// # Arguments
    /// - `store` - Owner of the cycle state
    /// - `messenger` - Discord message operations for the control message
    /// - `policy` - Daily reset boundary
    pub fn new(store: &'a CycleStore, messenger: &'a dyn Messenger, policy: CyclePolicy) -> Self {
        Self {
            store,
            messenger,
            policy,
        }
    }

    /// Creates a service from the shared application state.
    pub fn from_app_state(state: &'a AppState, messenger: &'a dyn Messenger) -> Self {
        Self::new(&state.store, messenger, state.policy)
    }

    /// Handles a resolved trigger.
    ///
    /// # Arguments
    /// - `trigger` - The interaction to handle
    /// - `responder` - Replies to the interaction
    /// - `now` - Instant the interaction arrived
    ///
    /// # Returns
    /// - `Ok(TriggerOutcome)` - The trigger was handled
    /// - `Err(AppError)` - A Discord call the flow depends on failed
    pub async fn handle(
        &self,
        trigger: Trigger,
        responder: &dyn Responder,
        now: DateTime<Utc>,
    ) -> Result<TriggerOutcome, AppError> {
        match trigger {
            Trigger::Setup(setup) => self
                .setup(setup, responder, now)
                .await
                .map(TriggerOutcome::Setup),
            Trigger::Participate(participate) => self
                .participate(participate, responder, now)
                .await
                .map(TriggerOutcome::Participate),
        }
    }

    /// Posts a fresh control message in the invoking channel.
    ///
    /// Safe to invoke repeatedly: each call supersedes the previous control, which is
    /// retired on a best-effort basis. Counter and participants are untouched apart
    /// from the reset check every entry point performs.
    ///
    /// # Returns
    /// - `Ok(ControlMessageRef)` - The new active control
    /// - `Err(AppError::PlatformErr)` - The control could not be posted
    pub async fn setup(
        &self,
        trigger: SetupTrigger,
        responder: &dyn Responder,
        now: DateTime<Utc>,
    ) -> Result<ControlMessageRef, AppError> {
        let mut state = self.store.lock().await;
        self.reset_service().maybe_reset(&mut state, now).await;

        let control = self
            .control_service()
            .replace(&mut state, trigger.channel_id, None)
            .await?;
        self.persist(&state).await;

        if let Err(e) = responder
            .respond(Reply::Private(message::SETUP_ACKNOWLEDGED.to_string()))
            .await
        {
            tracing::warn!("Failed to acknowledge setup command: {}", e);
        }

        Ok(control)
    }

    /// Records a catch for the user unless they already fished this cycle.
    ///
    /// 1. Runs the reset check, so a press arriving just after the boundary starts
    ///    the new cycle even if the scheduled job has not fired yet.
    /// 2. Answers privately and changes nothing for a repeat press.
    /// 3. Otherwise records the catch, persists and confirms publicly. If the
    ///    confirmation cannot be delivered the catch is rolled back and persisted
    ///    again so the user can retry.
    /// 4. After a delivered confirmation, releases the lock and replaces the control
    ///    message. Failures there are logged and do not affect the recorded catch.
    ///
    /// # Returns
    /// - `Ok(ParticipateOutcome::Recorded)` - Catch recorded and confirmed
    /// - `Ok(ParticipateOutcome::AlreadyParticipated)` - Repeat press answered
    /// - `Err(AppError::PlatformErr)` - A reply could not be delivered
    pub async fn participate(
        &self,
        trigger: ParticipateTrigger,
        responder: &dyn Responder,
        now: DateTime<Utc>,
    ) -> Result<ParticipateOutcome, AppError> {
        let mut state = self.store.lock().await;
        self.reset_service().maybe_reset(&mut state, now).await;

        let Some(counter) = state.record_participation(trigger.user_id, &trigger.display_name, now)
        else {
            tracing::debug!(
                "User {} ({}) already fished this cycle",
                trigger.display_name,
                trigger.user_id
            );
            responder
                .respond(Reply::Private(message::ALREADY_PARTICIPATED.to_string()))
                .await?;
            return Ok(ParticipateOutcome::AlreadyParticipated);
        };
        self.persist(&state).await;

        let confirmation = message::confirmation(
            &trigger.display_name,
            &self.policy.format_local(now),
            counter,
        );
        if let Err(e) = responder.respond(Reply::Public(confirmation)).await {
            tracing::error!(
                "Failed to confirm catch for user {} ({}), rolling back: {}",
                trigger.display_name,
                trigger.user_id,
                e
            );
            state.revoke_participation(trigger.user_id);
            self.persist(&state).await;
            return Err(e.into());
        }

        tracing::info!(
            "User {} ({}) fished, {} catches this cycle",
            trigger.display_name,
            trigger.user_id,
            counter
        );

        drop(state);
        self.replace_clicked_control(&trigger).await;

        Ok(ParticipateOutcome::Recorded { counter })
    }

    /// Posts a replacement for the clicked control and retires the superseded ones.
    ///
    /// Runs without the state lock except for the swap of `active_control`. When two
    /// replacements overlap, the later swap wins and retires the earlier control.
    async fn replace_clicked_control(&self, trigger: &ParticipateTrigger) {
        let control_service = self.control_service();

        let control = match control_service.publish(trigger.channel_id).await {
            Ok(control) => control,
            Err(e) => {
                tracing::error!(
                    "Failed to replace control message in channel {}: {}",
                    trigger.channel_id,
                    e
                );
                return;
            }
        };

        let previous = {
            let mut state = self.store.lock().await;
            let previous = state.active_control.replace(control);
            self.persist(&state).await;
            previous
        };

        control_service
            .retire_superseded(control, previous, Some(trigger.clicked_control()))
            .await;
    }

    fn reset_service(&self) -> CycleResetService<'_> {
        CycleResetService::new(self.store.repo(), self.policy)
    }

    fn control_service(&self) -> ControlMessageService<'_> {
        ControlMessageService::new(self.messenger)
    }

    /// Saves the state, logging instead of failing.
    async fn persist(&self, state: &CycleState) {
        if let Err(e) = self.store.repo().save(state).await {
            tracing::error!("Failed to persist cycle state: {}", e);
        }
    }
}
