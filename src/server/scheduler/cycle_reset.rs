use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::cycle::{CyclePolicy, CycleResetService},
    state::CycleStore,
};

/// Starts the daily cycle reset scheduler
///
/// The job fires once a day at the policy's boundary (expressed in UTC) and runs the
/// reset engine. Interactions run the same check on their own, so a late or missed
/// job only delays the reset until the next interaction.
///
/// # Arguments
/// - `store`: Owner of the cycle state
/// - `policy`: Daily reset boundary
pub async fn start_scheduler(store: Arc<CycleStore>, policy: CyclePolicy) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let cron = policy.cron_expression();
    let job_store = store.clone();

    let job = Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let store = job_store.clone();

        Box::pin(async move {
            run_scheduled_reset(&store, policy, Utc::now()).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Cycle reset scheduler started: boundary {:02}:00 at UTC{} ({} UTC)",
        policy.boundary_hour(),
        policy.offset(),
        cron
    );

    Ok(())
}

/// Runs the reset engine on behalf of the scheduler.
///
/// # Returns
/// - `true` - A new cycle was started
/// - `false` - The cycle had already been reset, e.g. by an earlier interaction
pub async fn run_scheduled_reset(
    store: &CycleStore,
    policy: CyclePolicy,
    now: DateTime<Utc>,
) -> bool {
    let mut state = store.lock().await;
    let reset = CycleResetService::new(store.repo(), policy)
        .maybe_reset(&mut state, now)
        .await;

    if reset {
        tracing::info!("Scheduled reset at {}", now);
    } else {
        tracing::debug!("Scheduled reset at {} found the cycle already current", now);
    }

    reset
}
