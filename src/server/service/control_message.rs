//! Control message lifecycle.
//!
//! Keeps a single "click to fish" message current. Every replacement posts the new
//! control first and retires the old one afterwards, so a failed post leaves the
//! previous control live and recorded. Retirement is best effort: the bot only
//! guarantees that one control is *recorded* as current, not that older messages
//! are actually gone.

use crate::server::{
    error::platform::PlatformCallError,
    model::{control::ControlMessageRef, cycle::CycleState},
    service::platform::Messenger,
};

/// Service publishing and retiring control messages.
pub struct ControlMessageService<'a> {
    messenger: &'a dyn Messenger,
}

impl<'a> ControlMessageService<'a> {
    /// Creates a new ControlMessageService instance.
    ///
    /// # Arguments
    /// - `messenger` - Discord message operations
    pub fn new(messenger: &'a dyn Messenger) -> Self {
        Self { messenger }
    }

    /// Posts a fresh control message in the channel.
    ///
    /// # Returns
    /// - `Ok(ControlMessageRef)` - Reference to the new control
    /// - `Err(PlatformCallError)` - The message could not be posted
    pub async fn publish(&self, channel_id: u64) -> Result<ControlMessageRef, PlatformCallError> {
        let message_id = self.messenger.send_control(channel_id).await?;
        let control = ControlMessageRef::new(channel_id, message_id);

        tracing::info!(
            "Posted control message {} in channel {}",
            control.message_id,
            control.channel_id
        );

        Ok(control)
    }

    /// Deletes a control message, swallowing every failure.
    ///
    /// A message that is already gone is logged at debug level, any other failure
    /// as a warning.
    pub async fn retire(&self, control: ControlMessageRef) {
        match self.messenger.delete_message(control).await {
            Ok(()) => tracing::debug!(
                "Retired control message {} in channel {}",
                control.message_id,
                control.channel_id
            ),
            Err(e) if e.is_not_found() => tracing::debug!(
                "Control message {} in channel {} was already deleted",
                control.message_id,
                control.channel_id
            ),
            Err(e) => tracing::warn!(
                "Failed to retire control message {} in channel {}: {}",
                control.message_id,
                control.channel_id,
                e
            ),
        }
    }

    /// Replaces the active control with a new one posted in `channel_id`.
    ///
    /// Publishes first, then retires the previous active control and, if it differs,
    /// the `clicked` control the interaction came from. The state is updated in
    /// memory only; the caller persists it.
    ///
    /// # Arguments
    /// - `state` - Cycle state whose `active_control` is superseded
    /// - `channel_id` - Channel for the new control
    /// - `clicked` - Control message the triggering interaction came from, if any
    ///
    /// # Returns
    /// - `Ok(ControlMessageRef)` - The new active control
    /// - `Err(PlatformCallError)` - Posting failed; the state is unchanged
    pub async fn replace(
        &self,
        state: &mut CycleState,
        channel_id: u64,
        clicked: Option<ControlMessageRef>,
    ) -> Result<ControlMessageRef, PlatformCallError> {
        let control = self.publish(channel_id).await?;
        let previous = state.active_control.replace(control);

        self.retire_superseded(control, previous, clicked).await;

        Ok(control)
    }

    /// Retires the controls superseded by `control`, each at most once.
    ///
    /// # Arguments
    /// - `control` - The control that is now active; never retired
    /// - `previous` - The control that was active before
    /// - `clicked` - Control message the triggering interaction came from, if any
    pub async fn retire_superseded(
        &self,
        control: ControlMessageRef,
        previous: Option<ControlMessageRef>,
        clicked: Option<ControlMessageRef>,
    ) {
        if let Some(previous) = previous.filter(|p| *p != control) {
            self.retire(previous).await;
        }

        if let Some(clicked) = clicked.filter(|c| Some(*c) != previous && *c != control) {
            self.retire(clicked).await;
        }
    }
}
