//! Retry of transient remote failures.

use std::future::Future;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};

use crate::platform::{self, RemoteError};

/// Configuration for retry operations.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Minimum delay between retries.
    pub min_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Maximum number of retry attempts.
    pub max_retries: usize,
    /// Whether to add jitter to delays.
    pub with_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            max_retries: 3,
            with_jitter: true,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn new(min_delay: Duration, max_delay: Duration, max_retries: usize) -> Self {
        Self {
            min_delay,
            max_delay,
            max_retries,
            with_jitter: true,
        }
    }

    #[must_use]
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.with_jitter = jitter;
        self
    }

    /// Build an exponential backoff strategy from this configuration.
    #[must_use]
    pub fn into_backoff(self) -> ExponentialBuilder {
        let builder = ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries);

        if self.with_jitter {
            builder.with_jitter()
        } else {
            builder
        }
    }
}

/// Run `operation`, retrying while it fails with a transient error.
///
/// Rate limits are not retried here: waiting out a reset window inside a
/// sync would hold its transaction open for minutes.
pub async fn with_retry<T, F, Fut>(
    operation: F,
    config: &RetryConfig,
    request: &str,
) -> platform::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = platform::Result<T>>,
{
    operation
        .retry(config.clone().into_backoff())
        .when(RemoteError::is_transient)
        .notify(|err, dur| {
            tracing::debug!(request, retry_in = ?dur, error = %err, "retrying remote request");
        })
        .await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    fn fast() -> RetryConfig {
        RetryConfig::new(Duration::from_millis(1), Duration::from_millis(2), 3).with_jitter(false)
    }

    #[test]
    fn retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert!(config.with_jitter);
        assert!(config.min_delay < config.max_delay);
    }

    #[tokio::test]
    async fn retries_transient_errors_until_success() {
        let attempts = &AtomicU32::new(0);
        let value = with_retry(
            || async move {
                if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(RemoteError::network("connection reset"))
                } else {
                    Ok(42)
                }
            },
            &fast(),
            "/test",
        )
        .await
        .expect("third attempt should succeed");

        assert_eq!(value, 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_not_found() {
        let attempts = &AtomicU32::new(0);
        let err = with_retry(
            || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(RemoteError::not_found("octo/repo"))
            },
            &fast(),
            "/repos/octo/repo",
        )
        .await
        .expect_err("not found is final");

        assert!(err.is_not_found());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let attempts = &AtomicU32::new(0);
        let err = with_retry(
            || async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(RemoteError::network("timeout"))
            },
            &fast(),
            "/test",
        )
        .await
        .expect_err("should give up");

        assert!(err.is_transient());
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }
}
