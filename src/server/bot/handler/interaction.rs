//! Interaction event handler.
//!
//! Resolves slash commands and button presses into `Trigger`s and hands them to the
//! `InteractionService`. Interactions the bot does not own are ignored.

use chrono::Utc;
use serenity::all::{Context, Interaction};

use crate::server::{
    bot::messenger::{DiscordMessenger, DiscordResponder, InteractionSource},
    model::trigger::{ParticipateTrigger, SetupTrigger, Trigger, TriggerKind},
    service::interaction::InteractionService,
    state::AppState,
};

/// Resolves a gateway interaction into a trigger.
///
/// # Returns
/// - `Some((trigger, source))` - The interaction belongs to the bot
/// - `None` - Unknown command, unknown button, or another interaction type
fn resolve(interaction: &Interaction) -> Option<(Trigger, InteractionSource<'_>)> {
    match interaction {
        Interaction::Command(command) => {
            match TriggerKind::from_command_name(&command.data.name)? {
                TriggerKind::Setup => Some((
                    Trigger::Setup(SetupTrigger {
                        channel_id: command.channel_id.get(),
                    }),
                    InteractionSource::Command(command),
                )),
                TriggerKind::Participate => None,
            }
        }
        Interaction::Component(component) => {
            match TriggerKind::from_custom_id(&component.data.custom_id)? {
                TriggerKind::Participate => Some((
                    Trigger::Participate(ParticipateTrigger {
                        user_id: component.user.id.get(),
                        display_name: component.user.name.clone(),
                        channel_id: component.channel_id.get(),
                        message_id: component.message.id.get(),
                    }),
                    InteractionSource::Component(component),
                )),
                TriggerKind::Setup => None,
            }
        }
        _ => None,
    }
}

/// Handles an interaction delivered by the gateway.
///
/// # Arguments
/// - `state` - Shared application state
/// - `ctx` - Discord context providing the HTTP client
/// - `interaction` - The interaction to handle
pub async fn handle_interaction(state: &AppState, ctx: Context, interaction: Interaction) {
    let now = Utc::now();

    let Some((trigger, source)) = resolve(&interaction) else {
        tracing::debug!("Ignoring unrelated interaction {:?}", interaction.kind());
        return;
    };

    let kind = trigger.kind();
    let messenger = DiscordMessenger::new(ctx.http.clone());
    let responder = DiscordResponder::new(ctx.http.clone(), source);

    match InteractionService::from_app_state(state, &messenger)
        .handle(trigger, &responder, now)
        .await
    {
        Ok(outcome) => tracing::debug!("Handled {:?} interaction: {:?}", kind, outcome),
        Err(e) => tracing::error!("Failed to handle {:?} interaction: {}", kind, e),
    }
}
