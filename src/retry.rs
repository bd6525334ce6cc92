//! Retry logic for connection-level failures
//!
//! The query API is retried with a fixed delay between attempts. Only
//! transport failures qualify; an HTTP error status reaches the caller
//! on the first attempt and is never retried.

use crate::config::RetryConfig;
use crate::error::Error;
use std::future::Future;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (connection refused, reset, timeout) should return
/// `true`. Everything else is permanent and surfaces immediately.
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for reqwest::Error {
    fn is_retryable(&self) -> bool {
        self.is_connect() || self.is_timeout()
    }
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            Error::Network(e) => e.is_retryable(),
            // Transport exhaustion already consumed its retry budget
            Error::TransportExhausted { .. } => false,
            Error::MalformedIdentifier(_)
            | Error::UnsupportedSiteType(_)
            | Error::UpstreamStatus { .. }
            | Error::UnexpectedResponse(_)
            | Error::Serialization(_) => false,
        }
    }
}

/// Execute an async operation, retrying transient failures with a fixed delay
///
/// Makes up to `config.max_attempts` attempts in total, sleeping
/// `config.delay` between them. Returns the successful result, or the last
/// error once the budget is spent or a non-retryable error occurs.
pub async fn with_fixed_delay<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
{
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempts = attempt, "operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(e) if e.is_retryable() && attempt < config.max_attempts => {
                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = config.delay.as_millis(),
                    "connection attempt failed, retrying"
                );
                tokio::time::sleep(config.delay).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, attempts = attempt, "operation failed");
                return Err(e);
            }
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[derive(Debug)]
    enum TestError {
        Transient,
        Permanent,
    }

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                TestError::Transient => write!(f, "transient error"),
                TestError::Permanent => write!(f, "permanent error"),
            }
        }
    }

    impl IsRetryable for TestError {
        fn is_retryable(&self) -> bool {
            matches!(self, TestError::Transient)
        }
    }

    fn fast_config(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            delay: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn success_needs_no_retry() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = with_fixed_delay(&fast_config(5), || {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TestError>(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 1, "should only call once");
    }

    #[tokio::test]
    async fn four_failures_then_success_completes() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = with_fixed_delay(&fast_config(5), || {
            let counter = counter_clone.clone();
            async move {
                let count = counter.fetch_add(1, Ordering::SeqCst);
                if count < 4 {
                    Err(TestError::Transient)
                } else {
                    Ok("page")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "page");
        assert_eq!(
            counter.load(Ordering::SeqCst),
            5,
            "should succeed on the fifth attempt"
        );
    }

    #[tokio::test]
    async fn five_failures_exhaust_the_budget() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = with_fixed_delay(&fast_config(5), || {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(TestError::Transient)
            }
        })
        .await;

        assert!(matches!(result, Err(TestError::Transient)));
        assert_eq!(
            counter.load(Ordering::SeqCst),
            5,
            "should stop after five attempts in total"
        );
    }

    #[tokio::test]
    async fn permanent_error_is_not_retried() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = with_fixed_delay(&fast_config(5), || {
            let counter = counter_clone.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(TestError::Permanent)
            }
        })
        .await;

        assert!(matches!(result, Err(TestError::Permanent)));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delay_between_attempts_is_fixed() {
        let config = RetryConfig {
            max_attempts: 3,
            delay: Duration::from_millis(40),
        };

        let start = std::time::Instant::now();
        let _result =
            with_fixed_delay(&config, || async { Err::<i32, _>(TestError::Transient) }).await;
        let elapsed = start.elapsed();

        // Two sleeps of 40ms between three attempts
        assert!(
            elapsed >= Duration::from_millis(80),
            "should sleep between attempts, waited {:?}",
            elapsed
        );
        assert!(
            elapsed < Duration::from_secs(2),
            "delay must not grow, waited {:?}",
            elapsed
        );
    }

    #[test]
    fn upstream_status_is_not_retryable() {
        let err = Error::UpstreamStatus {
            status: 500,
            url: "http://example.com/api.php".to_string(),
        };
        assert!(!err.is_retryable(), "HTTP error statuses are never retried");
    }

    #[test]
    fn unexpected_response_is_not_retryable() {
        let err = Error::UnexpectedResponse("missing query key".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn malformed_identifier_is_not_retryable() {
        assert!(!Error::MalformedIdentifier("nope".to_string()).is_retryable());
        assert!(!Error::UnsupportedSiteType("wordpress".to_string()).is_retryable());
    }
}
