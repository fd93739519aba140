use serenity::all::{Client, GatewayIntents};

use crate::server::{bot::handler::Handler, config::Config, error::AppError, state::AppState};

/// Starts the Discord bot in a blocking manner
///
/// Creates the gateway client and runs it until shutdown. Only the `GUILDS` intent is
/// needed: slash commands and button presses arrive as interactions regardless of
/// intents.
///
/// # Arguments
/// - `config` - Bot configuration holding the token
/// - `state` - Shared application state handed to the event handler
///
/// # Returns
/// - `Ok(())` if the bot runs and shuts down cleanly
/// - `Err(AppError)` if bot initialization or connection fails
pub async fn start_bot(config: &Config, state: AppState) -> Result<(), AppError> {
    let intents = GatewayIntents::GUILDS;

    let handler = Handler::new(state);

    let mut client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Starting Discord bot...");

    // Blocks until shutdown
    client.start().await?;

    Ok(())
}
