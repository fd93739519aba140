mod server;

use chrono::Utc;
use std::process::ExitCode;

use crate::server::{
    bot, config::Config, error::AppError, scheduler::cycle_reset, startup, state::AppState,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            tracing::error!("Check the environment or the .env file.");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Bot stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    let store = startup::load_state(&config, Utc::now()).await;
    let state = AppState::new(store.clone(), config.policy);

    if let Err(e) = cycle_reset::start_scheduler(store, config.policy).await {
        tracing::error!("Cycle reset scheduler error: {}", e);
    }

    bot::start::start_bot(&config, state).await
}
