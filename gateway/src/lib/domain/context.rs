use std::time::Duration;

use tokio::time::Instant;

/// Per-request context handed to every remote call. The default has no
/// deadline.
///
/// The remaining budget is forwarded to user-service as the gRPC deadline, so
/// the callee gives up at the same moment the gateway does.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationContext {
    deadline: Option<Instant>,
}

impl OperationContext {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Time left before the deadline, `None` when unbounded.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.deadline
            .map(|deadline| deadline <= Instant::now())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_remaining_shrinks() {
        let ctx = OperationContext::with_timeout(Duration::from_secs(2));
        assert_eq!(ctx.remaining(), Some(Duration::from_secs(2)));

        tokio::time::advance(Duration::from_millis(500)).await;
        assert_eq!(ctx.remaining(), Some(Duration::from_millis(1500)));
        assert!(!ctx.is_expired());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
        assert!(ctx.is_expired());
    }

    #[test]
    fn test_default_is_unbounded() {
        let ctx = OperationContext::default();
        assert!(ctx.remaining().is_none());
        assert!(!ctx.is_expired());
    }
}
