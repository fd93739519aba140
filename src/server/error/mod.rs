//! Error types for the bot.
//!
//! This module provides the application's error hierarchy. The `AppError` enum serves
//! as the top-level error type that wraps the category-specific errors:
//!
//! - `ConfigError` - Missing or malformed environment configuration (fatal at startup)
//! - `StorageError` - State file read, write or parse failures (degrade and continue)
//! - `PlatformCallError` - Discord API call failures (logged, never retried)

pub mod config;
pub mod platform;
pub mod storage;

use thiserror::Error;

use crate::server::error::{config::ConfigError, platform::PlatformCallError, storage::StorageError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Most variants use
/// `#[from]` for automatic error conversion so `?` can be used throughout the
/// service and bot layers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// State file persistence error.
    #[error(transparent)]
    StorageErr(#[from] StorageError),

    /// Discord call made on behalf of an interaction failed.
    #[error(transparent)]
    PlatformErr(#[from] PlatformCallError),

    /// Discord client error from Serenity.
    ///
    /// Boxed due to large size. Raised when the gateway client cannot be built
    /// or stops with an error.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
