//! Stardust Pond Test Utils
//!
//! Provides shared testing utilities for the bot. This crate offers a builder pattern
//! for creating test contexts backed by a temporary directory, with the state file
//! optionally pre-seeded in the current or a legacy format.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment owning the temporary directory and state file path
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builders for state documents in every supported shape
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn loads_existing_state() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_state(factory::state::StateDocumentFactory::new().user(1, "alice").build())
//!         .build()?;
//!
//!     let repo = StateRepository::new(test.state_path());
//!     // Perform repository operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
