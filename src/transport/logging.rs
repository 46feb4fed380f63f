// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based logging layer for Google API requests.
//!
//! This module implements a logging layer that uses `tracing` to record
//! method, URL, status and timing of every HTTP attempt.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use tower::Layer;
use tracing::{debug, trace, warn, Instrument};

use super::request::{ApiRequest, ApiResponse};
use crate::errors::TransportError;

/// A Tower layer that adds logging/tracing to API requests.
///
/// Placed inside the retry layer it logs every attempt; outside, one event per
/// logical call.
///
/// # Example
///
/// ```rust,ignore
/// use gapi_sheets::transport::{LoggingLayer, RetryLayer};
/// use tower::Layer;
///
/// let service = RetryLayer::default().layer(LoggingLayer::new().layer(http_service));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LoggingLayer {
    /// Whether to log request bodies (can be verbose)
    log_requests: bool,
    /// Whether to log response bodies (can be verbose)
    log_responses: bool,
}

impl LoggingLayer {
    /// Creates a new logging layer with default settings.
    ///
    /// By default, only method, URL, status and timing are logged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables logging of request bodies.
    pub fn with_request_logging(mut self) -> Self {
        self.log_requests = true;
        self
    }

    /// Enables logging of response bodies.
    pub fn with_response_logging(mut self) -> Self {
        self.log_responses = true;
        self
    }

    /// Enables logging of both request and response bodies.
    pub fn verbose(mut self) -> Self {
        self.log_requests = true;
        self.log_responses = true;
        self
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = LoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        LoggingService {
            service,
            log_requests: self.log_requests,
            log_responses: self.log_responses,
        }
    }
}

/// A Tower service that logs API requests and responses.
#[derive(Clone, Debug)]
pub struct LoggingService<S> {
    service: S,
    log_requests: bool,
    log_responses: bool,
}

impl<S> tower::Service<ApiRequest> for LoggingService<S>
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
        let log_requests = self.log_requests;
        let log_responses = self.log_responses;
        // The inner service was polled ready for this call; take it and leave a clone behind
        let clone = self.service.clone();
        let mut service = std::mem::replace(&mut self.service, clone);

        let span = tracing::info_span!(
            "gapi_request",
            method = %request.method,
            path = %request.url.path(),
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        Box::pin(
            async move {
                let start = Instant::now();

                if log_requests {
                    trace!(query = ?request.query, body = ?request.body, "API request");
                } else {
                    debug!("API request: {request}");
                }

                let result = service.call(request).await;
                let duration = start.elapsed();
                let span = tracing::Span::current();
                span.record("duration_ms", duration.as_millis() as u64);

                match &result {
                    Ok(response) => {
                        span.record("status", response.status.as_u16());
                        if log_responses {
                            trace!(
                                status = %response.status,
                                body = %response.text(),
                                duration_ms = %duration.as_millis(),
                                "API response"
                            );
                        } else {
                            debug!(
                                status = %response.status,
                                duration_ms = %duration.as_millis(),
                                "API response"
                            );
                        }
                    }
                    Err(e) => {
                        warn!(
                            error = %e,
                            duration_ms = %duration.as_millis(),
                            "API transport error"
                        );
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_layer_default() {
        let layer = LoggingLayer::new();
        assert!(!layer.log_requests);
        assert!(!layer.log_responses);
    }

    #[test]
    fn test_logging_layer_with_request_logging() {
        let layer = LoggingLayer::new().with_request_logging();
        assert!(layer.log_requests);
        assert!(!layer.log_responses);
    }

    #[test]
    fn test_logging_layer_verbose() {
        let layer = LoggingLayer::new().verbose();
        assert!(layer.log_requests);
        assert!(layer.log_responses);
    }
}
