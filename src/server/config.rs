//! Environment-based configuration.
//!
//! Values are read from the process environment after `dotenvy` has loaded an
//! optional `.env` file. Only the bot token is required.

use chrono::FixedOffset;
use std::path::PathBuf;

use crate::server::{error::config::ConfigError, service::cycle::CyclePolicy};

const DEFAULT_STATE_FILE: &str = "fishing_data.json";
const DEFAULT_RESET_HOUR: u32 = 20;
const DEFAULT_RESET_UTC_OFFSET_MINUTES: i32 = 0;

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token (`DISCORD_BOT_TOKEN`).
    pub discord_bot_token: String,
    /// Path of the JSON state file (`STATE_FILE`).
    pub state_file: PathBuf,
    /// Daily reset boundary (`RESET_HOUR`, `RESET_UTC_OFFSET_MINUTES`).
    pub policy: CyclePolicy,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required values present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DISCORD_BOT_TOKEN` is not set
    /// - `Err(ConfigError::InvalidEnvVar)` - An optional value could not be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_bot_token = lookup("DISCORD_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?;

        let state_file = lookup("STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));

        let reset_hour = match lookup("RESET_HOUR") {
            Some(value) => parse_var("RESET_HOUR", &value)?,
            None => DEFAULT_RESET_HOUR,
        };

        let offset_minutes: i32 = match lookup("RESET_UTC_OFFSET_MINUTES") {
            Some(value) => parse_var("RESET_UTC_OFFSET_MINUTES", &value)?,
            None => DEFAULT_RESET_UTC_OFFSET_MINUTES,
        };

        let offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                invalid(
                    "RESET_UTC_OFFSET_MINUTES",
                    &offset_minutes.to_string(),
                    "offset must be within ±1439 minutes",
                )
            })?;

        let policy = CyclePolicy::new(reset_hour, offset).ok_or_else(|| {
            invalid(
                "RESET_HOUR",
                &reset_hour.to_string(),
                "hour must be between 0 and 23",
            )
        })?;

        Ok(Self {
            discord_bot_token,
            state_file,
            policy,
        })
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| invalid(name, value, &e.to_string()))
}

fn invalid(name: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
