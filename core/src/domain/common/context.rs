use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::common::entities::app_errors::{CoreError, TransientKind};

/// Deadline and cancellation carried through every repository call of one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    deadline: Instant,
    cancellation: CancellationToken,
}

impl RequestContext {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    const UNBOUNDED: Duration = Duration::from_secs(86_400 * 365 * 30);

    pub fn new(timeout: Duration) -> Self {
        Self::with_cancellation(timeout, CancellationToken::new())
    }

    pub fn with_cancellation(timeout: Duration, cancellation: CancellationToken) -> Self {
        let now = Instant::now();
        // Timeouts past the clock's range mean "no deadline".
        let deadline = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + Self::UNBOUNDED);

        Self {
            deadline,
            cancellation,
        }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Drives `operation` until it finishes, the deadline passes or the request is cancelled.
    pub async fn run<F, T>(&self, operation: F) -> Result<T, CoreError>
    where
        F: Future<Output = Result<T, CoreError>>,
    {
        if self.cancellation.is_cancelled() {
            return Err(CoreError::Transient(TransientKind::Cancelled));
        }

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => {
                Err(CoreError::Transient(TransientKind::Cancelled))
            }
            outcome = tokio::time::timeout_at(self.deadline, operation) => {
                outcome.unwrap_or(Err(CoreError::Transient(TransientKind::Timeout)))
            }
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn huge_timeout_does_not_overflow_the_clock() {
        let ctx = RequestContext::new(Duration::from_secs(u64::MAX));
        assert!(ctx.remaining() > Duration::from_secs(86_400));

        let value = ctx.run(async { Ok::<_, CoreError>("done") }).await.unwrap();
        assert_eq!(value, "done");
    }

    #[tokio::test]
    async fn completed_operation_passes_through() {
        let ctx = RequestContext::default();
        let value = ctx.run(async { Ok::<_, CoreError>(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn elapsed_deadline_reports_timeout() {
        let ctx = RequestContext::new(Duration::from_millis(10));
        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, CoreError>(())
            })
            .await;

        assert!(matches!(
            result,
            Err(CoreError::Transient(TransientKind::Timeout))
        ));
    }

    #[tokio::test]
    async fn cancelled_context_short_circuits() {
        let ctx = RequestContext::default();
        ctx.cancel();

        let result = ctx.run(async { Ok::<_, CoreError>(()) }).await;
        assert!(matches!(
            result,
            Err(CoreError::Transient(TransientKind::Cancelled))
        ));
    }
}
