use std::future::IntoFuture;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

/// Returned when an operation outlives its context.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("context deadline exceeded")]
pub struct DeadlineExceeded;

/// Per-operation context passed first to every storage call.
///
/// Carries an optional deadline. Copies share it, so every storage call made
/// for one request gives up at the same instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationContext {
    deadline: Option<Instant>,
}

impl OperationContext {
    /// Context without a deadline.
    pub fn background() -> Self {
        Self { deadline: None }
    }

    /// Context expiring `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.deadline
            .map(|deadline| deadline <= Instant::now())
            .unwrap_or(false)
    }

    /// Drive `operation` to completion unless the deadline passes first.
    ///
    /// On expiry the operation future is dropped, which aborts whatever I/O
    /// it had in flight.
    ///
    /// # Errors
    /// * `DeadlineExceeded` - The deadline passed before the operation finished
    pub async fn run<F>(&self, operation: F) -> Result<F::Output, DeadlineExceeded>
    where
        F: IntoFuture,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, operation)
                .await
                .map_err(|_| DeadlineExceeded),
            None => Ok(operation.await),
        }
    }
}
