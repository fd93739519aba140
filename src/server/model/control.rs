//! Control message model.
//!
//! The control message is the single live message carrying the "Fish!" button.
//! It is replaced after every successful catch so users always click a fresh one.

/// Caption posted above the fishing button.
pub const CONTROL_CAPTION: &str = "🎣 Welcome to Stardust Pond — click to fish!";

/// Label of the fishing button.
pub const CONTROL_BUTTON_LABEL: &str = "🎣 Fish!";

/// Identifies the live control message within Discord.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlMessageRef {
    /// Discord channel ID the control was posted in.
    pub channel_id: u64,
    /// Discord message ID of the control.
    pub message_id: u64,
}

impl ControlMessageRef {
    pub fn new(channel_id: u64, message_id: u64) -> Self {
        Self {
            channel_id,
            message_id,
        }
    }
}
