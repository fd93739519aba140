//! Cron jobs.
//!
//! - `cycle_reset` - Daily reset at the configured boundary

pub mod cycle_reset;
