//! Configuration for gapi-sheets clients
//!
//! This module controls where requests go, how long metadata stays cached,
//! how transient failures are retried and how long a single request may take.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use gapi_sheets::GapiConfig;
//!
//! // Google endpoints, 5 s cache window, unbounded 1 s retries, 30 s timeout
//! let config = GapiConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use gapi_sheets::{GapiConfigBuilder, RetryPolicy};
//! use std::time::Duration;
//!
//! let config = GapiConfigBuilder::new()
//!     .cache_window(Duration::from_secs(30))
//!     .retry_policy(RetryPolicy::bounded(5))
//!     .build();
//! ```
//!
//! # Example: Tests against a local server
//!
//! ```rust
//! use gapi_sheets::GapiConfig;
//!
//! let config = GapiConfig::minimal().with_base_url("http://127.0.0.1:8080");
//! ```

use std::time::Duration;

use crate::transport::RetryPolicy;

pub mod constants;
mod endpoints;

pub use endpoints::ApiEndpoints;

use constants::{
    DEFAULT_CACHE_WINDOW, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DRIVE_PAGE_SIZE,
    USER_AGENT,
};

/// Configuration for a [`crate::GoogleApi`] client
///
/// Use [`GapiConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct GapiConfig {
    /// Base URLs of the Drive, Sheets and Script APIs
    pub endpoints: ApiEndpoints,

    /// How long file listings, team-drive listings and opened spreadsheet
    /// metadata are served without a network round trip
    /// Default: 5 seconds
    pub cache_window: Duration,

    /// How transient failures are retried
    /// Default: unbounded attempts with a fixed 1 second pause
    pub retry: RetryPolicy,

    /// Deadline for a single HTTP request
    /// Default: 30 seconds (a hung connection surfaces as a retryable timeout)
    pub request_timeout: Option<Duration>,

    /// Deadline for establishing a connection
    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// Items requested per Drive listing page
    /// Default: 1000
    pub page_size: u32,

    /// User agent sent with every request
    pub user_agent: String,

    /// Whether request and response bodies are logged at TRACE level
    /// Default: false
    pub log_bodies: bool,
}

impl Default for GapiConfig {
    fn default() -> Self {
        Self {
            endpoints: ApiEndpoints::default(),
            cache_window: DEFAULT_CACHE_WINDOW,
            retry: RetryPolicy::default(),
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            page_size: DRIVE_PAGE_SIZE,
            user_agent: USER_AGENT.to_string(),
            log_bodies: false,
        }
    }
}

impl GapiConfig {
    /// Create minimal config for tests
    ///
    /// Retries are bounded to three attempts with a 10 ms pause so a failing
    /// test finishes quickly.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gapi_sheets::GapiConfig;
    ///
    /// let config = GapiConfig::minimal();
    /// assert_eq!(config.retry.max_retries, Some(3));
    /// ```
    pub fn minimal() -> Self {
        Self {
            retry: RetryPolicy::bounded(3).with_fixed_delay(Duration::from_millis(10)),
            request_timeout: Some(Duration::from_secs(5)),
            ..Self::default()
        }
    }

    /// Points every API at `base_url`, keeping Google's path layout
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.endpoints = ApiEndpoints::with_base(base_url);
        self
    }
}

/// Builder for [`GapiConfig`]
///
/// # Example
///
/// ```rust
/// use gapi_sheets::{Backoff, GapiConfigBuilder, RetryPolicy};
/// use std::time::Duration;
///
/// let config = GapiConfigBuilder::new()
///     .retry_policy(RetryPolicy::bounded(4).with_backoff(Backoff::Exponential {
///         base: Duration::from_millis(250),
///         max: Duration::from_secs(8),
///     }))
///     .request_timeout(Duration::from_secs(60))
///     .build();
///
/// assert_eq!(config.request_timeout, Some(Duration::from_secs(60)));
/// ```
#[derive(Debug, Clone)]
pub struct GapiConfigBuilder {
    config: GapiConfig,
}

impl Default for GapiConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GapiConfigBuilder {
    /// Create a new builder with production defaults
    ///
    /// Initializes the builder with the same values as [`GapiConfig::default`].
    pub fn new() -> Self {
        Self {
            config: GapiConfig::default(),
        }
    }

    /// Start from an existing configuration, e.g. [`GapiConfig::minimal`]
    pub fn from_config(config: GapiConfig) -> Self {
        Self { config }
    }

    /// Set all API base URLs
    pub fn endpoints(mut self, endpoints: ApiEndpoints) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// Point every API at one server
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.config.endpoints = ApiEndpoints::with_base(base_url);
        self
    }

    /// Set the metadata cache window
    pub fn cache_window(mut self, window: Duration) -> Self {
        self.config.cache_window = window;
        self
    }

    /// Set the retry policy
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Set the per-request deadline
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    /// Remove the per-request deadline
    ///
    /// A hung connection then blocks until the peer closes it.
    pub fn no_request_timeout(mut self) -> Self {
        self.config.request_timeout = None;
        self
    }

    /// Set the connect deadline
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the Drive listing page size
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.config.page_size = page_size.max(1);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Log request and response bodies at TRACE level
    pub fn log_bodies(mut self, enabled: bool) -> Self {
        self.config.log_bodies = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> GapiConfig {
        self.config
    }
}
