use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::error::TestError;

/// File name of the state file inside the test directory.
pub const STATE_FILE_NAME: &str = "fishing_data.json";

/// Test context owning an isolated temporary directory.
///
/// The directory and everything in it is removed when the context is dropped, so
/// keep the context alive for the whole test.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Creates a new context with an empty temporary directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fresh context
    /// - `Err(TestError::Io)` - Temporary directory could not be created
    pub fn new() -> Result<Self, TestError> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Root of the temporary directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path the state file lives at (whether or not it exists yet).
    pub fn state_path(&self) -> PathBuf {
        self.dir.path().join(STATE_FILE_NAME)
    }

    /// Checks whether the state file has been written.
    pub fn state_exists(&self) -> bool {
        self.state_path().exists()
    }

    /// Writes raw contents to the state file.
    pub fn write_raw_state(&self, contents: &str) -> Result<(), TestError> {
        std::fs::write(self.state_path(), contents)?;
        Ok(())
    }

    /// Writes a JSON document to the state file.
    pub fn write_state(&self, document: &Value) -> Result<(), TestError> {
        self.write_raw_state(&serde_json::to_string_pretty(document)?)
    }

    /// Reads the raw contents of the state file.
    pub fn read_raw_state(&self) -> Result<String, TestError> {
        Ok(std::fs::read_to_string(self.state_path())?)
    }

    /// Reads and parses the state file.
    ///
    /// # Returns
    /// - `Ok(Value)` - Parsed state document
    /// - `Err(TestError::Io)` - File missing or unreadable
    /// - `Err(TestError::Json)` - File is not valid JSON
    pub fn read_state(&self) -> Result<Value, TestError> {
        Ok(serde_json::from_str(&self.read_raw_state()?)?)
    }
}
