// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based retry layer for Google API requests.
//!
//! This module implements a retry layer that resends a request when the
//! response carries a transient status (500, 503, 504, 429, 408) or the
//! transport failed in a recoverable way. It never interprets response bodies:
//! any other status, success or failure, is handed back unchanged.
//!
//! The policy is explicit. [`RetryPolicy::default`] keeps retrying forever
//! with a fixed one second pause, which matches how Google's own client
//! libraries behave for idempotent metadata calls. Bounded and exponential
//! policies are available for callers that would rather fail than wait.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use reqwest::StatusCode;
use tower::{Layer, ServiceExt};
use tracing::{debug, warn};

use super::request::{ApiRequest, ApiResponse};
use crate::config::constants::{DEFAULT_RETRY_DELAY, RETRYABLE_STATUS_CODES};
use crate::errors::TransportError;

/// Whether a status is one of the transient statuses
pub fn is_retryable_status(status: StatusCode) -> bool {
    RETRYABLE_STATUS_CODES.contains(&status.as_u16())
}

/// Pause between attempts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backoff {
    /// The same pause before every retry
    Fixed(Duration),
    /// `min(base * 2^attempt, max)`
    Exponential {
        /// Pause before the first retry
        base: Duration,
        /// Upper bound on any pause
        max: Duration,
    },
}

impl Backoff {
    /// Pause before retry number `attempt` (0-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { base, max } => {
                let multiplier = 2u64.saturating_pow(attempt);
                let delay_ms = base.as_millis().saturating_mul(multiplier as u128);
                let capped_delay_ms = delay_ms.min(max.as_millis()) as u64;
                Duration::from_millis(capped_delay_ms)
            }
        }
    }
}

/// How many times, and how far apart, transient failures are retried
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum retries after the initial attempt; `None` retries forever
    pub max_retries: Option<u32>,
    /// Pause between attempts
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl RetryPolicy {
    /// Retries forever with a fixed one second pause
    pub fn unbounded() -> Self {
        Self {
            max_retries: None,
            backoff: Backoff::Fixed(DEFAULT_RETRY_DELAY),
        }
    }

    /// Retries at most `max_retries` times with a fixed one second pause
    ///
    /// # Example
    ///
    /// ```rust
    /// use gapi_sheets::RetryPolicy;
    ///
    /// let policy = RetryPolicy::bounded(5);
    /// assert!(policy.allows_retry(4));
    /// assert!(!policy.allows_retry(5));
    /// ```
    pub fn bounded(max_retries: u32) -> Self {
        Self {
            max_retries: Some(max_retries),
            backoff: Backoff::Fixed(DEFAULT_RETRY_DELAY),
        }
    }

    /// Never retries
    pub fn none() -> Self {
        Self::bounded(0)
    }

    /// Bounded exponential backoff with jitter-free doubling
    ///
    /// This preset uses:
    /// - 5 retry attempts
    /// - 500ms base delay
    /// - 32s maximum delay
    pub fn exponential() -> Self {
        Self {
            max_retries: Some(5),
            backoff: Backoff::Exponential {
                base: Duration::from_millis(500),
                max: Duration::from_secs(32),
            },
        }
    }

    /// Replaces the backoff strategy
    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Uses a fixed pause of `delay`
    #[must_use]
    pub fn with_fixed_delay(self, delay: Duration) -> Self {
        self.with_backoff(Backoff::Fixed(delay))
    }

    /// Whether another retry is allowed after `retries_done` retries
    pub fn allows_retry(&self, retries_done: u32) -> bool {
        self.max_retries.is_none_or(|max| retries_done < max)
    }
}

/// A Tower layer that retries transient failures according to a [`RetryPolicy`].
///
/// # Example
///
/// ```rust,ignore
/// use gapi_sheets::transport::{HttpService, RetryLayer};
/// use gapi_sheets::RetryPolicy;
/// use tower::Layer;
///
/// let service = RetryLayer::new(RetryPolicy::bounded(3)).layer(http_service);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RetryLayer {
    policy: Arc<RetryPolicy>,
}

impl RetryLayer {
    /// Creates a retry layer with the given policy
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    /// The policy applied by this layer
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

impl<S> Layer<S> for RetryLayer {
    type Service = RetryService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RetryService {
            service,
            policy: self.policy.clone(),
        }
    }
}

/// A Tower service that resends requests on transient failures.
#[derive(Clone, Debug)]
pub struct RetryService<S> {
    service: S,
    policy: Arc<RetryPolicy>,
}

impl<S> tower::Service<ApiRequest> for RetryService<S>
where
    S: tower::Service<ApiRequest, Response = ApiResponse, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = ApiResponse;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: ApiRequest) -> Self::Future {
        let service = self.service.clone();
        let policy = self.policy.clone();

        Box::pin(async move {
            let mut attempt = 0u32;
            loop {
                let result = service.clone().oneshot(request.clone()).await;

                let transient = match &result {
                    Ok(response) if response.is_retryable() => Some(response.status.to_string()),
                    Err(error) if error.is_retryable() => Some(error.to_string()),
                    Ok(_) => {
                        if attempt > 0 {
                            debug!(attempt = attempt, url = %request.url, "Request settled after retry");
                        }
                        None
                    }
                    Err(error) => {
                        debug!(error = %error, url = %request.url, "Non-retryable error, not retrying");
                        None
                    }
                };

                let Some(reason) = transient else {
                    return result;
                };

                if !policy.allows_retry(attempt) {
                    warn!(
                        reason = %reason,
                        attempts = attempt + 1,
                        url = %request.url,
                        "Max retries exceeded"
                    );
                    return result;
                }

                let delay = policy.backoff.delay(attempt);
                warn!(
                    reason = %reason,
                    attempt = attempt + 1,
                    max_retries = ?policy.max_retries,
                    delay_ms = delay.as_millis(),
                    url = %request.url,
                    "Transient failure, backing off"
                );

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use url::Url;

    /// Service that replays scripted outcomes and counts calls
    #[derive(Clone, Default)]
    struct ScriptedService {
        outcomes: Arc<Mutex<VecDeque<Result<u16, String>>>>,
        calls: Arc<AtomicU32>,
    }

    impl ScriptedService {
        fn new(outcomes: Vec<Result<u16, String>>) -> Self {
            Self {
                outcomes: Arc::new(Mutex::new(outcomes.into())),
                calls: Arc::default(),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl tower::Service<ApiRequest> for ScriptedService {
        type Response = ApiResponse;
        type Error = TransportError;
        type Future = Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + Send>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _request: ApiRequest) -> Self::Future {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let outcome = self
                .outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted service ran out of outcomes");
            Box::pin(async move {
                match outcome {
                    Ok(status) => Ok(ApiResponse::new(
                        StatusCode::from_u16(status).unwrap(),
                        format!("status {status}"),
                    )),
                    Err(reason) => Err(TransportError::Token { reason }),
                }
            })
        }
    }

    fn request() -> ApiRequest {
        ApiRequest::get(Url::parse("https://example.com/drive/v3/files").unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_transient_status_until_success() {
        let inner = ScriptedService::new(vec![Ok(503), Ok(503), Ok(200)]);
        let service = RetryLayer::new(RetryPolicy::default()).layer(inner.clone());

        let started = tokio::time::Instant::now();
        let response = service.oneshot(request()).await.unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(inner.calls(), 3, "Two retries after the initial attempt");
        assert_eq!(started.elapsed(), Duration::from_secs(2), "Fixed 1s pauses");
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_status_returned_unchanged() {
        let inner = ScriptedService::new(vec![Ok(404)]);
        let service = RetryLayer::new(RetryPolicy::default()).layer(inner.clone());

        let response = service.oneshot(request()).await.unwrap();

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "status 404");
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_retryable_status_is_retried() {
        for status in RETRYABLE_STATUS_CODES {
            let inner = ScriptedService::new(vec![Ok(status), Ok(201)]);
            let service = RetryLayer::new(RetryPolicy::default()).layer(inner.clone());

            let response = service.oneshot(request()).await.unwrap();

            assert_eq!(response.status, StatusCode::CREATED);
            assert_eq!(inner.calls(), 2, "status {status} should be retried");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_errors_are_not_retried() {
        for status in [400, 401, 403, 409, 501, 502] {
            let inner = ScriptedService::new(vec![Ok(status)]);
            let service = RetryLayer::new(RetryPolicy::default()).layer(inner.clone());

            let response = service.oneshot(request()).await.unwrap();

            assert_eq!(response.status.as_u16(), status);
            assert_eq!(inner.calls(), 1, "status {status} should not be retried");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_policy_returns_last_response() {
        let inner = ScriptedService::new(vec![Ok(500), Ok(504), Ok(429)]);
        let service = RetryLayer::new(RetryPolicy::bounded(2)).layer(inner.clone());

        let response = service.oneshot(request()).await.unwrap();

        assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_transport_error_propagates() {
        let inner = ScriptedService::new(vec![Err("no credentials".to_string())]);
        let service = RetryLayer::new(RetryPolicy::default()).layer(inner.clone());

        let err = service.oneshot(request()).await.unwrap_err();

        assert!(matches!(err, TransportError::Token { .. }));
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exponential_backoff_timing() {
        let inner = ScriptedService::new(vec![Ok(503), Ok(503), Ok(503), Ok(200)]);
        let policy = RetryPolicy::bounded(5).with_backoff(Backoff::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_secs(10),
        });
        let service = RetryLayer::new(policy).layer(inner.clone());

        let started = tokio::time::Instant::now();
        service.oneshot(request()).await.unwrap();

        // 100ms + 200ms + 400ms
        assert_eq!(started.elapsed(), Duration::from_millis(700));
    }

    #[test]
    fn test_default_policy_is_unbounded_fixed() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, None);
        assert_eq!(policy.backoff, Backoff::Fixed(Duration::from_secs(1)));
        assert!(policy.allows_retry(u32::MAX));
    }

    #[test]
    fn test_none_policy() {
        assert!(!RetryPolicy::none().allows_retry(0));
    }

    #[test]
    fn test_calculate_backoff() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_secs(10),
        };

        assert_eq!(backoff.delay(0), Duration::from_millis(100));
        assert_eq!(backoff.delay(1), Duration::from_millis(200));
        assert_eq!(backoff.delay(2), Duration::from_millis(400));
        assert_eq!(backoff.delay(3), Duration::from_millis(800));
    }

    #[test]
    fn test_calculate_backoff_capped() {
        let backoff = Backoff::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(500),
        };

        assert_eq!(backoff.delay(3), Duration::from_millis(500));
        assert_eq!(backoff.delay(10), Duration::from_millis(500));
    }

    #[test]
    fn test_calculate_backoff_overflow_protection() {
        let backoff = Backoff::Exponential {
            base: Duration::from_secs(1),
            max: Duration::from_secs(60),
        };

        assert_eq!(backoff.delay(50), Duration::from_secs(60));
        assert_eq!(backoff.delay(u32::MAX), Duration::from_secs(60));
    }

    #[test]
    fn test_is_retryable_status() {
        assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable_status(StatusCode::REQUEST_TIMEOUT));
        assert!(!is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable_status(StatusCode::OK));
    }
}
