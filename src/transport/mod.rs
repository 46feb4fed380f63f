// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transport layer for Google API requests.
//!
//! Requests travel through a Tower stack:
//!
//! ```text
//! RetryService ─▶ LoggingService ─▶ HttpService (reqwest + bearer token)
//! ```
//!
//! # Retry
//!
//! [`RetryLayer`] resends requests that fail with a transient status
//! (500, 503, 504, 429, 408) or a recoverable transport error, pausing
//! according to a [`RetryPolicy`]. Every other response is returned as is.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gapi_sheets::transport::{HttpService, LoggingLayer, RetryLayer};
//! use gapi_sheets::{GapiConfig, RetryPolicy, StaticToken};
//! use std::sync::Arc;
//! use tower::{Layer, ServiceExt};
//!
//! let config = GapiConfig::default();
//! let http = HttpService::new(&config, Arc::new(StaticToken::new(token)))?;
//! let service = RetryLayer::new(RetryPolicy::bounded(3))
//!     .layer(LoggingLayer::new().layer(http));
//!
//! let response = service.oneshot(request).await?;
//! ```

mod http;
mod logging;
mod request;
mod retry;

pub use http::HttpService;
pub use logging::{LoggingLayer, LoggingService};
pub use request::{ApiRequest, ApiResponse};
pub use retry::{is_retryable_status, Backoff, RetryLayer, RetryPolicy, RetryService};
