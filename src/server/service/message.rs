//! Chat texts sent in reply to interactions.

/// Private notice for a user who already fished this cycle.
pub const ALREADY_PARTICIPATED: &str = "❌ You've already fished today! Come back tomorrow.";

/// Private acknowledgement of the setup command.
pub const SETUP_ACKNOWLEDGED: &str = "Pond is ready.";

/// Builds the public confirmation for a recorded catch.
///
/// # Arguments
/// - `display_name` - Name of the user who fished
/// - `timestamp` - Human-readable time of the catch
/// - `counter` - Catch count of the current cycle including this one
pub fn confirmation(display_name: &str, timestamp: &str, counter: u64) -> String {
    format!(
        "{} has fished! 🐟🎣 at date : {}  total number of fishing done : {}",
        display_name, timestamp, counter
    )
}
