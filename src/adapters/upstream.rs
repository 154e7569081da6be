//! Shared plumbing for outbound HTTP calls: client construction, error
//! mapping and the bounded retry used for response-source fetches.

use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::{UpstreamError, UpstreamService};

/// Builds a reqwest client with an explicit request timeout.
pub fn build_client(service: UpstreamService, timeout: Duration) -> Result<Client, UpstreamError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| UpstreamError::network(service, format!("Failed to create HTTP client: {}", e)))
}

/// Maps a transport error onto the upstream error taxonomy.
pub fn map_send_error(service: UpstreamService, err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::timeout(service)
    } else if err.is_connect() {
        UpstreamError::network(service, format!("Connection failed: {}", err))
    } else {
        UpstreamError::network(service, err.to_string())
    }
}

/// Passes successful responses through; turns any other status into
/// `UpstreamError::Status` carrying the response body.
pub async fn check_status(
    service: UpstreamService,
    response: Response,
) -> Result<Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(UpstreamError::status(service, status.as_u16(), body))
}

/// Bounded retry with exponential backoff (`base_delay`, doubled per attempt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Runs `operation` until it succeeds, fails with a non-retryable error,
    /// or `max_retries` retries have been spent.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, UpstreamError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let mut retry_count = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.max_retries {
                        return Err(err);
                    }
                    tracing::warn!(
                        service = %err.service(),
                        attempt = retry_count + 1,
                        error = %err,
                        "Upstream call failed, retrying"
                    );
                }
            }

            // Exponential backoff: base, 2 * base, 4 * base, ...
            sleep(self.base_delay * (1u32 << retry_count.min(16))).await;
            retry_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries).with_base_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn returns_first_success() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let result = fast(3)
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, UpstreamError>(7)
            })
            .await;
        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_failures_until_success() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let result = fast(3)
            .run(|| async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(UpstreamError::timeout(UpstreamService::Chatwoot))
                } else {
                    Ok("done")
                }
            })
            .await;
        assert_eq!(result, Ok("done"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let result: Result<(), _> = fast(2)
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(UpstreamError::status(UpstreamService::Rasa, 503, "down"))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let result: Result<(), _> = fast(5)
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(UpstreamError::status(UpstreamService::Chatwoot, 401, "nope"))
            })
            .await;
        assert_eq!(
            result,
            Err(UpstreamError::status(UpstreamService::Chatwoot, 401, "nope"))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_retry_policy_calls_once() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let _: Result<(), _> = RetryPolicy::none()
            .run(|| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(UpstreamError::timeout(UpstreamService::Rasa))
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
