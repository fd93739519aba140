//! Factory methods for creating test data.
//!
//! Factories build state documents with sensible defaults so tests only spell out
//! the fields they care about. Documents are plain `serde_json::Value`s; seed them
//! into a test context with `TestBuilder::with_state`.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! // Current format with two participants and a control message
//! let document = factory::state::StateDocumentFactory::new()
//!     .last_reset(factory::helpers::utc(2026, 10, 18, 20, 0))
//!     .user(1, "alice")
//!     .user(2, "bob")
//!     .control(10, 20)
//!     .build();
//!
//! // Legacy format with a date-string reset marker
//! let legacy = factory::state::StateDocumentFactory::new()
//!     .legacy_last_reset("Sat Oct 17 2026")
//!     .build();
//! ```
//!
//! # Available Factories
//!
//! - `state` - Create state file documents
//! - `helpers` - ID generation and timestamp helpers

pub mod helpers;
pub mod state;

pub use state::{create_state, StateDocumentFactory};
