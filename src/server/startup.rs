//! Startup helpers: logging and state loading.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config, data::state::StateRepository, service::cycle::CycleResetService,
    state::CycleStore,
};

/// Installs the global tracing subscriber.
///
/// Honors `RUST_LOG`, defaulting to `info` for the bot and `warn` for serenity.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,serenity=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads the cycle state and runs the reset check once before serving.
///
/// Never fails: a missing or corrupt state file yields a fresh state.
///
/// # Arguments
/// - `config` - Configuration naming the state file and reset policy
/// - `now` - Current instant
///
/// # Returns
/// - `Arc<CycleStore>` - Store owning the loaded state
pub async fn load_state(config: &Config, now: DateTime<Utc>) -> Arc<CycleStore> {
    let repo = StateRepository::new(config.state_file.clone());
    let mut state = repo.load(now).await;

    CycleResetService::new(&repo, config.policy)
        .maybe_reset(&mut state, now)
        .await;

    tracing::info!(
        "Loaded cycle state from {}: {} catches since {}",
        repo.path().display(),
        state.counter,
        state.last_reset
    );

    Arc::new(CycleStore::new(repo, state))
}
