// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The innermost service of the request stack: sends one request over HTTP.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use reqwest::Client;

use super::request::{ApiRequest, ApiResponse};
use crate::auth::TokenProvider;
use crate::config::GapiConfig;
use crate::errors::TransportError;

/// A Tower service that performs a single authenticated HTTP exchange.
///
/// Each call asks the [`TokenProvider`] for a token, sends the request with
/// `Authorization: Bearer`, and reads the whole body. Status codes are not
/// interpreted here.
#[derive(Clone)]
pub struct HttpService {
    client: Client,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for HttpService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpService").finish_non_exhaustive()
    }
}

impl HttpService {
    /// Builds a reqwest client from the configured timeouts and user agent
    pub fn new(config: &GapiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, tokens))
    }

    /// Uses an existing reqwest client
    pub fn with_client(client: Client, tokens: Arc<dyn TokenProvider>) -> Self {
        Self { client, tokens }
    }
}

impl tower::Service<ApiRequest> for HttpService {
    type Response = ApiResponse;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: ApiRequest) -> Self::Future {
        let client = self.client.clone();
        let tokens = self.tokens.clone();

        Box::pin(async move {
            let token = tokens
                .access_token()
                .await
                .map_err(|e| TransportError::Token {
                    reason: e.to_string(),
                })?;

            let mut builder = client
                .request(request.method, request.url)
                .bearer_auth(token.secret());
            if !request.query.is_empty() {
                builder = builder.query(&request.query);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;

            Ok(ApiResponse { status, body })
        })
    }
}
