//! Interaction triggers handled by the bot.
//!
//! Discord identifies slash commands by name and buttons by custom ID. Both are
//! resolved once, at the gateway boundary, into a closed `Trigger` enum so the
//! service layer only ever matches on variants.

use crate::server::model::control::ControlMessageRef;

/// Name of the slash command that posts the fishing button.
pub const SETUP_COMMAND_NAME: &str = "fishsetup";

/// Description shown for the setup command in the Discord client.
pub const SETUP_COMMAND_DESCRIPTION: &str = "Set up the fishing pond";

/// Custom ID attached to the fishing button.
pub const PARTICIPATE_BUTTON_ID: &str = "fish_button";

/// Kinds of interaction the bot reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Setup,
    Participate,
}

impl TriggerKind {
    /// Resolves a slash command name.
    pub fn from_command_name(name: &str) -> Option<Self> {
        match name {
            SETUP_COMMAND_NAME => Some(Self::Setup),
            _ => None,
        }
    }

    /// Resolves a message component custom ID.
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        match custom_id {
            PARTICIPATE_BUTTON_ID => Some(Self::Participate),
            _ => None,
        }
    }
}

/// Setup command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupTrigger {
    /// Channel the command was invoked in; the control is posted here.
    pub channel_id: u64,
}

/// Fishing button press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipateTrigger {
    pub user_id: u64,
    pub display_name: String,
    /// Channel holding the clicked control; the replacement is posted here.
    pub channel_id: u64,
    /// ID of the message whose button was clicked.
    pub message_id: u64,
}

impl ParticipateTrigger {
    /// Reference to the control message that was clicked.
    pub fn clicked_control(&self) -> ControlMessageRef {
        ControlMessageRef::new(self.channel_id, self.message_id)
    }
}

/// A resolved interaction ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Setup(SetupTrigger),
    Participate(ParticipateTrigger),
}

impl Trigger {
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::Setup(_) => TriggerKind::Setup,
            Self::Participate(_) => TriggerKind::Participate,
        }
    }
}
