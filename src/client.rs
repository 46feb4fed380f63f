// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The [`GoogleApi`] client handle.
//!
//! A `GoogleApi` owns the request stack, the metadata caches and the active
//! drive scope. It is cheap to clone; clones share all state.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tower::util::BoxCloneSyncService;
use tower::{Layer, ServiceExt};

use crate::auth::{AccessToken, StaticToken, TokenProvider};
use crate::cache::{CacheStats, TimedCache};
use crate::config::{ApiEndpoints, GapiConfig};
use crate::errors::{RequestError, TransportError};
use crate::transport::{ApiRequest, ApiResponse, HttpService, LoggingLayer, RetryLayer};
use crate::types::drive::{DriveScope, FileMeta, TeamDrive};
use crate::types::sheets::SpreadsheetMeta;

/// Type-erased request stack
pub(crate) type ApiService = BoxCloneSyncService<ApiRequest, ApiResponse, TransportError>;

pub(crate) struct Inner {
    pub(crate) config: GapiConfig,
    service: ApiService,
    /// File listings per drive scope
    pub(crate) files: TimedCache<DriveScope, Vec<FileMeta>>,
    /// Team drives visible to the caller
    pub(crate) team_drives: TimedCache<(), Vec<TeamDrive>>,
    /// Metadata of opened spreadsheets, keyed by spreadsheet id
    pub(crate) spreadsheets: TimedCache<String, SpreadsheetMeta>,
    pub(crate) scope: Mutex<DriveScope>,
}

/// Client for the Drive, Sheets and Apps Script APIs
///
/// # Example
///
/// ```rust,ignore
/// use gapi_sheets::{GapiConfig, GoogleApi};
///
/// let api = GoogleApi::with_token(GapiConfig::default(), std::env::var("GOOGLE_TOKEN")?)?;
/// for name in api.spreadsheets().await? {
///     println!("{name}");
/// }
/// ```
#[derive(Clone)]
pub struct GoogleApi {
    pub(crate) inner: Arc<Inner>,
}

impl fmt::Debug for GoogleApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleApi")
            .field("endpoints", &self.inner.config.endpoints)
            .field("retry", &self.inner.config.retry)
            .finish_non_exhaustive()
    }
}

impl GoogleApi {
    /// Builds the default request stack: retry, then logging, then HTTP
    pub fn new(config: GapiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, TransportError> {
        let http = HttpService::new(&config, tokens)?;
        let logging = if config.log_bodies {
            LoggingLayer::new().verbose()
        } else {
            LoggingLayer::new()
        };
        let service = RetryLayer::new(config.retry.clone()).layer(logging.layer(http));
        Ok(Self::with_service(config, service))
    }

    /// Same as [`GoogleApi::new`] with a fixed bearer token
    pub fn with_token(
        config: GapiConfig,
        token: impl Into<AccessToken>,
    ) -> Result<Self, TransportError> {
        Self::new(config, Arc::new(StaticToken::new(token)))
    }

    /// Uses a caller-supplied request stack
    ///
    /// `config.retry` and the HTTP settings are not applied; the service is
    /// used as given.
    pub fn with_service<S>(config: GapiConfig, service: S) -> Self
    where
        S: tower::Service<ApiRequest, Response = ApiResponse, Error = TransportError>
            + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        let window = config.cache_window;
        Self {
            inner: Arc::new(Inner {
                config,
                service: BoxCloneSyncService::new(service),
                files: TimedCache::new("files", window),
                team_drives: TimedCache::new("team_drives", window),
                spreadsheets: TimedCache::new("spreadsheets", window),
                scope: Mutex::new(DriveScope::MyDrive),
            }),
        }
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &GapiConfig {
        &self.inner.config
    }

    pub(crate) fn endpoints(&self) -> &ApiEndpoints {
        &self.inner.config.endpoints
    }

    /// The drive scope files are currently listed from
    pub async fn scope(&self) -> DriveScope {
        self.inner.scope.lock().await.clone()
    }

    /// Statistics of the three metadata caches, by cache name
    pub async fn cache_stats(&self) -> Vec<(&'static str, CacheStats)> {
        vec![
            (self.inner.files.name(), self.inner.files.stats().await),
            (
                self.inner.team_drives.name(),
                self.inner.team_drives.stats().await,
            ),
            (
                self.inner.spreadsheets.name(),
                self.inner.spreadsheets.stats().await,
            ),
        ]
    }

    /// Sends a request through the stack and fails on a non-2xx status
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<ApiResponse, RequestError> {
        let response = self
            .inner
            .service
            .clone()
            .oneshot(request.clone())
            .await?;
        response.error_for_status(&request)
    }

    /// Sends a request and decodes the JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, RequestError> {
        let response = self.send(request.clone()).await?;
        response.json(&request)
    }
}
