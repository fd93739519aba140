//! Persistence layer.
//!
//! The bot keeps its whole state in one JSON document. `StateRepository` owns the
//! file format and converts stored documents to and from the `CycleState` domain
//! model.

pub mod state;

#[cfg(test)]
mod test;
