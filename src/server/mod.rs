//! Bot backend.
//!
//! This module contains the complete implementation of the Stardust Pond bot: a
//! single-guild Discord bot where users press a button once per daily cycle to
//! register a catch.
//!
//! # Architecture
//!
//! The bot follows a layered architecture with clear separation of concerns:
//!
//! - **Bot Layer** (`bot/`) - Gateway client, event handlers and serenity-backed Discord calls
//! - **Service Layer** (`service/`) - Cycle policy, reset engine, interaction state machine
//!   and control message lifecycle
//! - **Data Layer** (`data/`) - JSON state file persistence and schema migration
//! - **Model Layer** (`model/`) - Domain models and interaction triggers
//! - **Error Layer** (`error/`) - Application error types
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based configuration
//! - **State** (`state`) - Mutex-guarded cycle state shared by every entry point
//! - **Startup** (`startup`) - Logging setup and initial state load
//! - **Scheduler** (`scheduler/`) - Daily reset cron job
//!
//! # Trigger Flow
//!
//! 1. **Bot** receives an interaction and resolves it into a `Trigger`
//! 2. **Service** locks the cycle state and runs the reset check
//! 3. **Service** applies the trigger, persists through the **Data** layer, then
//!    replies and manages the control message through the `Messenger`/`Responder` traits

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
