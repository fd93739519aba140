use thiserror::Error;

/// Errors that can occur while preparing or inspecting a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Temporary directory or state file I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// State file contents could not be encoded or decoded as JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
