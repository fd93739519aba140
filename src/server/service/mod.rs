//! Business logic.
//!
//! Services orchestrate between the cycle state, the state repository and the
//! Discord API. They hold borrowed dependencies and are created per operation.
//!
//! - `cycle` - Daily boundary policy and the reset engine
//! - `control_message` - Publishing and retiring the control message
//! - `interaction` - Setup and participate handling
//! - `platform` - Traits abstracting the Discord calls services make
//! - `message` - Chat texts

pub mod control_message;
pub mod cycle;
pub mod interaction;
pub mod message;
pub mod platform;
