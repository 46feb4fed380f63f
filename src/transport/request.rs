// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Request and response values that flow through the transport stack.
//!
//! Requests are plain data so the retry layer can clone and resend them.

use std::fmt;

use bytes::Bytes;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::retry::is_retryable_status;
use crate::errors::{RequestError, TransportError};

/// A single Google API call
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Fully built endpoint URL
    pub url: Url,
    /// Query-string parameters
    pub query: Vec<(String, String)>,
    /// JSON body, if any
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request with no query and no body
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            body: None,
        }
    }

    /// `GET url`
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// `POST url`
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// `PUT url`
    pub fn put(url: Url) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Adds a query-string parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Sets the JSON body
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, TransportError> {
        let value = serde_json::to_value(body).map_err(|e| TransportError::InvalidRequest {
            reason: format!("failed to serialize request body: {e}"),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Value of a query parameter, if set
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// A response as received, body uninterpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Raw body
    pub body: Bytes,
}

impl ApiResponse {
    /// Creates a response from a status and body
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Whether the status is one of the transient statuses
    pub fn is_retryable(&self) -> bool {
        is_retryable_status(self.status)
    }

    /// Body as text, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fails with [`RequestError::Status`] unless the status is 2xx
    pub fn error_for_status(self, request: &ApiRequest) -> Result<Self, RequestError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(RequestError::Status {
                method: request.method.to_string(),
                url: request.url.to_string(),
                status: self.status,
                body: self.text(),
            })
        }
    }

    /// Decodes the body as JSON
    ///
    /// An empty body decodes as `null`, which lets endpoints that answer
    /// with no content map onto `serde_json::Value` or `Option<T>`.
    pub fn json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, RequestError> {
        let body: &[u8] = if self.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &self.body
        };
        serde_json::from_slice(body).map_err(|source| RequestError::Decode {
            url: request.url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ApiRequest {
        ApiRequest::get(Url::parse("https://example.com/files").unwrap())
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::post(Url::parse("https://example.com/x").unwrap())
            .query("pageSize", 1000)
            .query("supportsTeamDrives", true)
            .json(&json!({"name": "copy"}))
            .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(request.query_value("pageSize"), Some("1000"));
        assert_eq!(request.query_value("supportsTeamDrives"), Some("true"));
        assert_eq!(request.query_value("missing"), None);
        assert_eq!(request.body, Some(json!({"name": "copy"})));
        assert_eq!(request.to_string(), "POST https://example.com/x");
    }

    #[test]
    fn test_error_for_status() {
        let ok = ApiResponse::new(StatusCode::OK, "{}");
        assert!(ok.error_for_status(&request()).is_ok());

        let missing = ApiResponse::new(StatusCode::NOT_FOUND, "gone");
        let err = missing.error_for_status(&request()).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_json_decoding() {
        let response = ApiResponse::new(StatusCode::OK, r#"{"values": [["a"]]}"#);
        let value: serde_json::Value = response.json(&request()).unwrap();
        assert_eq!(value["values"][0][0], "a");

        let empty = ApiResponse::new(StatusCode::OK, "");
        let value: serde_json::Value = empty.json(&request()).unwrap();
        assert!(value.is_null());

        let garbage = ApiResponse::new(StatusCode::OK, "<html>");
        let err = garbage.json::<serde_json::Value>(&request()).unwrap_err();
        assert!(matches!(err, RequestError::Decode { .. }));
    }

    #[test]
    fn test_retryable_response() {
        assert!(ApiResponse::new(StatusCode::SERVICE_UNAVAILABLE, "").is_retryable());
        assert!(!ApiResponse::new(StatusCode::BAD_REQUEST, "").is_retryable());
    }
}
