// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Access tokens for Google API requests.
//!
//! Obtaining a token (the OAuth consent flow, refresh-token exchange, service
//! account signing) is left to the caller. The client only needs something that
//! can hand out a current bearer token before each request.
//!
//! # Example
//!
//! ```rust
//! use gapi_sheets::auth::{StaticToken, TokenProvider};
//!
//! let tokens = StaticToken::new("ya29.a0Af...");
//! ```

use std::fmt;

use async_trait::async_trait;

/// Error type returned by token providers
pub type TokenError = Box<dyn std::error::Error + Send + Sync>;

/// A bearer token
///
/// The secret is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token for the `Authorization` header
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Source of bearer tokens
///
/// Called once per HTTP attempt, so implementations that refresh tokens
/// should cache them.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a currently valid access token
    async fn access_token(&self) -> Result<AccessToken, TokenError>;
}

/// A fixed token, for short-lived processes and tests
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: AccessToken,
}

impl StaticToken {
    /// Creates a provider that always returns `token`
    pub fn new(token: impl Into<AccessToken>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<AccessToken, TokenError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret");
        assert_eq!(format!("{token:?}"), "AccessToken(<redacted>)");
        assert_eq!(token.secret(), "super-secret");
    }

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticToken::new("abc");
        let token = provider.access_token().await.unwrap();
        assert_eq!(token.secret(), "abc");
    }
}
