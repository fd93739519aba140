//! Discord bot integration.
//!
//! This module connects the bot to Discord's gateway and routes interactions to the
//! service layer. The bot reacts to two interactions:
//! - the `/fishsetup` slash command, which posts the fishing button
//! - presses of the fishing button
//!
//! Serenity types stay inside this module. The service layer talks to Discord only
//! through the `Messenger` and `Responder` traits implemented in `messenger`.
//!
//! # Gateway Intents
//!
//! The bot requires only the `GUILDS` intent.

pub mod handler;
pub mod messenger;
pub mod start;
