use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio::time::MissedTickBehavior;

use crate::domain::context::OperationContext;
use crate::user::ports::UserServicePort;

/// Periodically logs the number of active users.
///
/// Informational only: a failed count is logged and the next tick tries again.
pub struct ActiveUserReporter<S>
where
    S: UserServicePort,
{
    service: Arc<S>,
    interval: Duration,
    timeout: Duration,
}

impl<S> ActiveUserReporter<S>
where
    S: UserServicePort,
{
    /// # Arguments
    /// * `service` - User service to query
    /// * `interval` - Delay between two reports
    /// * `timeout` - Deadline for each count
    pub fn new(service: Arc<S>, interval: Duration, timeout: Duration) -> Self {
        Self {
            service,
            interval,
            timeout,
        }
    }

    /// Count once and log the result.
    pub async fn report_once(&self) -> Option<u64> {
        let ctx = OperationContext::with_timeout(self.timeout);

        match self.service.count_active_users(&ctx).await {
            Ok(count) => {
                tracing::info!(active_users = count, "Active users");
                Some(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to count active users");
                None
            }
        }
    }

    /// Report forever, first tick one interval after start.
    ///
    /// This is a long-running task that should be spawned in a separate tokio task
    pub async fn start_reporting(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Starting active user reporter"
        );

        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.report_once().await;
        }
    }
}
