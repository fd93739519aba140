//! Domain models used throughout the service layer.
//!
//! The persisted file format lives in the data layer; these types are what the
//! rest of the bot works with once a state document has been loaded.

pub mod control;
pub mod cycle;
pub mod trigger;
