use serde_json::Value;

use crate::{context::TestContext, error::TestError};

/// Initial contents of the state file.
enum Seed {
    Document(Value),
    Raw(String),
}

/// Builder for creating test contexts with an optional pre-seeded state file.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
///
/// let test = TestBuilder::new()
///     .with_raw_state("{ not json")
///     .build()?;
/// ```
pub struct TestBuilder {
    /// State file contents written during `build()`; no file is written when `None`.
    seed: Option<Seed>,
}

impl TestBuilder {
    /// Creates a new test builder that leaves the state file absent.
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Seeds the state file with a JSON document.
    ///
    /// Use the `factory::state` builders to create documents in the current or a
    /// legacy shape.
    pub fn with_state(mut self, document: Value) -> Self {
        self.seed = Some(Seed::Document(document));
        self
    }

    /// Seeds the state file with arbitrary contents, e.g. to test corrupt files.
    pub fn with_raw_state(mut self, contents: impl Into<String>) -> Self {
        self.seed = Some(Seed::Raw(contents.into()));
        self
    }

    /// Builds the test context and writes the seeded state file, if any.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Temporary directory ready for use
    /// - `Err(TestError)` - Directory creation or seeding failed
    pub fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new()?;

        match self.seed {
            Some(Seed::Document(document)) => context.write_state(&document)?,
            Some(Seed::Raw(contents)) => context.write_raw_state(&contents)?,
            None => {}
        }

        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
