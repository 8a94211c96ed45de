//! Periodic dashboard refresh.
//!
//! [`subscribe_to_analytics_updates`] registers a repeating job that rebuilds
//! the dashboard and hands a [`DashboardUpdate`] to the callback. The first
//! run happens one interval after subscribing. A tick that comes due while
//! the previous one is still running is skipped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use leffa_analytics::DashboardUpdate;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::error::MerchantError;
use crate::service::MerchantAnalytics;

pub type UpdateCallback = Arc<dyn Fn(DashboardUpdate) + Send + Sync>;

/// Handle for a running subscription.
///
/// Call [`Subscription::unsubscribe`] to stop the job and see any shutdown
/// error. Dropping the handle stops callbacks at once and tears the
/// scheduler down in the background on the current runtime.
pub struct Subscription {
    scheduler: JobScheduler,
    job_id: Uuid,
    cancelled: Arc<AtomicBool>,
    stopped: bool,
}

impl Subscription {
    /// Stops the job. No callback fires after this returns, even for a tick
    /// that was already fetching.
    ///
    /// # Errors
    ///
    /// Returns [`MerchantError::Scheduler`] if the job cannot be removed or
    /// the scheduler fails to shut down.
    pub async fn unsubscribe(mut self) -> Result<(), MerchantError> {
        self.stopped = true;
        self.cancelled.store(true, Ordering::SeqCst);
        self.scheduler.remove(&self.job_id).await?;
        self.scheduler.shutdown().await?;
        tracing::info!(job_id = %self.job_id, "analytics polling stopped");
        Ok(())
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if self.stopped {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(job_id = %self.job_id, "subscription dropped outside a runtime; scheduler left running");
            return;
        };
        let mut scheduler = self.scheduler.clone();
        let job_id = self.job_id;
        runtime.spawn(async move {
            if let Err(e) = scheduler.remove(&job_id).await {
                tracing::warn!(%job_id, error = %e, "failed to remove dropped polling job");
            }
            if let Err(e) = scheduler.shutdown().await {
                tracing::warn!(%job_id, error = %e, "failed to shut down scheduler for dropped subscription");
            }
            tracing::info!(%job_id, "analytics polling stopped after handle was dropped");
        });
    }
}

/// Clears the in-flight flag when a tick ends, panicked or not.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Starts polling the dashboard every `interval`.
///
/// Fetch failures never reach the callback as errors; they show up in the
/// update's `sources`. A panic inside a tick is logged and the schedule
/// keeps running.
///
/// # Errors
///
/// Returns [`MerchantError::Scheduler`] if the scheduler cannot be created,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn subscribe_to_analytics_updates(
    service: Arc<MerchantAnalytics>,
    interval: Duration,
    callback: UpdateCallback,
) -> Result<Subscription, MerchantError> {
    let scheduler = JobScheduler::new().await?;
    let cancelled = Arc::new(AtomicBool::new(false));
    let in_flight = Arc::new(AtomicBool::new(false));

    let job = {
        let cancelled = Arc::clone(&cancelled);
        Job::new_repeated_async(interval, move |_uuid, _lock| {
            let service = Arc::clone(&service);
            let callback = Arc::clone(&callback);
            let cancelled = Arc::clone(&cancelled);
            let in_flight = Arc::clone(&in_flight);

            Box::pin(async move {
                if cancelled.load(Ordering::SeqCst) {
                    return;
                }
                if in_flight.swap(true, Ordering::SeqCst) {
                    tracing::warn!("poller: previous refresh still running; skipping tick");
                    return;
                }
                let _guard = InFlight(in_flight);

                let tick = tokio::spawn(async move {
                    let update = service.dashboard_update().await;
                    if update.dashboard.sources.is_degraded() {
                        tracing::warn!(sources = ?update.dashboard.sources, "poller: refresh ran with missing data");
                    }
                    if cancelled.load(Ordering::SeqCst) {
                        return;
                    }
                    callback(update);
                });
                if let Err(e) = tick.await {
                    tracing::error!(error = %e, "poller: refresh failed");
                }
            })
        })?
    };

    let job_id = scheduler.add(job).await?;
    scheduler.start().await?;
    tracing::info!(%job_id, interval_secs = interval.as_secs(), "analytics polling started");

    Ok(Subscription {
        scheduler,
        job_id,
        cancelled,
        stopped: false,
    })
}
