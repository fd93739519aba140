//! Application state shared across event handlers and the scheduler.
//!
//! This module defines `CycleStore`, the single owner of the bot's `CycleState`, and
//! `AppState`, the cheap-to-clone bundle handed to the Discord event handler and the
//! reset scheduler.
//!
//! Every entry point locks the store for its whole read-modify-persist-respond
//! sequence. Two near-simultaneous button presses are therefore checked one after
//! the other, and a user can never pass the "not yet fished" check twice in one cycle.
//! Replacing the control message after a catch happens outside that sequence.

use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::server::{
    data::state::StateRepository, model::cycle::CycleState, service::cycle::CyclePolicy,
};

/// Mutex-guarded cycle state together with the repository that persists it.
pub struct CycleStore {
    repo: StateRepository,
    state: Mutex<CycleState>,
}

impl CycleStore {
    /// Creates a store owning an already loaded state.
    pub fn new(repo: StateRepository, state: CycleState) -> Self {
        Self {
            repo,
            state: Mutex::new(state),
        }
    }

    pub fn repo(&self) -> &StateRepository {
        &self.repo
    }

    /// Locks the cycle state for exclusive use.
    ///
    /// Hold the guard from the reset check until the reply has been sent so
    /// concurrent triggers are serialized.
    pub async fn lock(&self) -> MutexGuard<'_, CycleState> {
        self.state.lock().await
    }

    /// Returns a copy of the current state.
    #[cfg(test)]
    pub async fn snapshot(&self) -> CycleState {
        self.state.lock().await.clone()
    }
}

/// Shared state for the bot.
///
/// All fields use cheap-to-clone types:
/// - `Arc<CycleStore>` is a reference-counted pointer
/// - `CyclePolicy` is `Copy`
#[derive(Clone)]
pub struct AppState {
    /// Owner of the cycle state.
    pub store: Arc<CycleStore>,

    /// Daily reset boundary.
    pub policy: CyclePolicy,
}

impl AppState {
    pub fn new(store: Arc<CycleStore>, policy: CyclePolicy) -> Self {
        Self { store, policy }
    }
}
