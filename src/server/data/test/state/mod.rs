use chrono::{DateTime, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{helpers::utc, state::StateDocumentFactory},
};

use crate::server::{
    data::state::StateRepository,
    model::{control::ControlMessageRef, cycle::CycleState},
};

mod load;
mod migrate;
mod save;

/// Instant used as "now" throughout the repository tests.
fn now() -> DateTime<Utc> {
    utc(2026, 10, 19, 10, 0)
}
