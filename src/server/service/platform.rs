//! Seams between the service layer and the Discord API.
//!
//! The service layer never talks to serenity directly. `Messenger` covers channel
//! message calls and `Responder` answers the interaction currently being handled.
//! The bot layer provides serenity-backed implementations; tests provide recording
//! fakes.

use serenity::async_trait;

use crate::server::{error::platform::PlatformCallError, model::control::ControlMessageRef};

/// Reply to the interaction being handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Visible only to the user who triggered the interaction.
    Private(String),
    /// Visible to everyone in the channel.
    Public(String),
}

/// Channel message operations used to manage the control message.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Posts a new control message (caption plus fishing button) to a channel.
    ///
    /// # Returns
    /// - `Ok(message_id)` - ID of the posted message
    /// - `Err(PlatformCallError)` - Discord rejected or failed the call
    async fn send_control(&self, channel_id: u64) -> Result<u64, PlatformCallError>;

    /// Deletes a previously posted control message.
    ///
    /// # Returns
    /// - `Ok(())` - Message deleted
    /// - `Err(PlatformCallError::NotFound)` - Message already gone
    /// - `Err(PlatformCallError::Discord)` - Any other failure
    async fn delete_message(&self, control: ControlMessageRef) -> Result<(), PlatformCallError>;
}

/// Answers the interaction currently being handled.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, reply: Reply) -> Result<(), PlatformCallError>;
}
