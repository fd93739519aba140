use std::path::PathBuf;
use thiserror::Error;

/// Failures reading or writing the persisted cycle state file.
///
/// None of these are fatal. Loading degrades to a fresh in-memory state and
/// failed saves are logged while the bot keeps running on its in-memory copy.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The state file exists but could not be read.
    #[error("Failed to read state file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file (or its temporary sibling) could not be written or renamed.
    #[error("Failed to write state file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file contents are not a recognised state document.
    #[error("Failed to parse state file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory state could not be encoded as JSON.
    #[error("Failed to serialize cycle state: {0}")]
    Serialize(#[source] serde_json::Error),
}
