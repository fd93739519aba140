//! Serenity-backed implementations of the service layer's Discord seams.

use serenity::{
    all::{
        ButtonStyle, ChannelId, CommandInteraction, ComponentInteraction, CreateActionRow,
        CreateButton, CreateInteractionResponse, CreateInteractionResponseMessage, CreateMessage,
        MessageId,
    },
    async_trait,
    http::Http,
};
use std::sync::Arc;

use crate::server::{
    error::platform::PlatformCallError,
    model::{
        control::{ControlMessageRef, CONTROL_BUTTON_LABEL, CONTROL_CAPTION},
        trigger::PARTICIPATE_BUTTON_ID,
    },
    service::platform::{Messenger, Reply, Responder},
};

/// Builds the action row holding the fishing button.
pub fn control_components() -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![CreateButton::new(
        PARTICIPATE_BUTTON_ID,
    )
    .label(CONTROL_BUTTON_LABEL)
    .style(ButtonStyle::Primary)])]
}

/// Channel message operations through the Discord HTTP client.
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn send_control(&self, channel_id: u64) -> Result<u64, PlatformCallError> {
        let message = CreateMessage::new()
            .content(CONTROL_CAPTION)
            .components(control_components());

        let sent = ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await
            .map_err(|e| PlatformCallError::from_serenity("send control message", e))?;

        Ok(sent.id.get())
    }

    async fn delete_message(&self, control: ControlMessageRef) -> Result<(), PlatformCallError> {
        self.http
            .delete_message(
                ChannelId::new(control.channel_id),
                MessageId::new(control.message_id),
                None,
            )
            .await
            .map_err(|e| PlatformCallError::from_serenity("delete control message", e))
    }
}

/// Interaction being answered.
#[derive(Clone, Copy)]
pub enum InteractionSource<'a> {
    Command(&'a CommandInteraction),
    Component(&'a ComponentInteraction),
}

/// Answers a slash command or button interaction.
pub struct DiscordResponder<'a> {
    http: Arc<Http>,
    source: InteractionSource<'a>,
}

impl<'a> DiscordResponder<'a> {
    pub fn new(http: Arc<Http>, source: InteractionSource<'a>) -> Self {
        Self { http, source }
    }
}

#[async_trait]
impl Responder for DiscordResponder<'_> {
    async fn respond(&self, reply: Reply) -> Result<(), PlatformCallError> {
        let message = match reply {
            Reply::Private(content) => CreateInteractionResponseMessage::new()
                .content(content)
                .ephemeral(true),
            Reply::Public(content) => CreateInteractionResponseMessage::new().content(content),
        };
        let response = CreateInteractionResponse::Message(message);

        let result = match self.source {
            InteractionSource::Command(command) => {
                command.create_response(&self.http, response).await
            }
            InteractionSource::Component(component) => {
                component.create_response(&self.http, response).await
            }
        };

        result.map_err(|e| PlatformCallError::from_serenity("respond to interaction", e))
    }
}
