//! Ready event handler for bot initialization.
//!
//! This module handles the `ready` event which is fired when the bot successfully
//! connects to Discord's gateway and completes the initial handshake.
//!
//! The ready handler is used to:
//! - Log connection information
//! - Register the global `/fishsetup` slash command

use serenity::all::{Command, Context, CreateCommand, Ready};

use crate::server::model::trigger::{SETUP_COMMAND_DESCRIPTION, SETUP_COMMAND_NAME};

/// Builds the global slash commands the bot serves.
pub fn commands() -> Vec<CreateCommand> {
    vec![CreateCommand::new(SETUP_COMMAND_NAME).description(SETUP_COMMAND_DESCRIPTION)]
}

/// Handles the ready event when the bot connects to Discord.
///
/// Registration failures are logged; the bot keeps running so buttons on existing
/// control messages still work.
///
/// # Arguments
/// - `ctx` - Discord context used for command registration
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!("Bot is ready! Logged in as {}", ready.user.name);

    tracing::info!("Registering slash commands...");
    match Command::set_global_commands(&ctx.http, commands()).await {
        Ok(registered) => tracing::info!("Registered {} slash command(s)", registered.len()),
        Err(e) => tracing::error!("Error registering slash commands: {}", e),
    }
}
