//! TokenProvider trait and AccessToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::error::AuthError;

/// An access token with optional expiration and refresh token.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The bearer token used for API authentication.
    pub access_token: String,
    /// When the token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token for obtaining new access tokens without re-authentication.
    pub refresh_token: Option<String>,
}

impl AccessToken {
    /// Creates a new access token with just the token string.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: None,
            refresh_token: None,
        }
    }

    /// Creates a new access token with expiration time.
    pub fn with_expiry(access_token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Some(expires_at),
            refresh_token: None,
        }
    }

    /// Returns `true` if the token has expired.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns `true` if the token will expire within the given duration.
    ///
    /// Returns `false` if expiration time is unknown.
    pub fn expires_within(&self, duration: chrono::Duration) -> bool {
        self.expires_at
            .is_some_and(|exp| Utc::now() + duration >= exp)
    }

    /// Returns `true` if a refresh token is available.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Returns the token as a bearer authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Trait for providing access tokens to the client.
///
/// The client calls `get_token` before each API request. Implementations
/// should return cached tokens while valid and handle refresh or
/// re-authentication transparently; how tokens are acquired (session
/// login, OAuth, long-lived API keys) is entirely up to the implementor.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets an access token for the specified resource.
    ///
    /// The `resource` parameter is the service base URL
    /// (e.g., `https://erp.example.com`).
    async fn get_token(&self, resource: &str) -> Result<AccessToken, AuthError>;
}

/// A simple token provider that always returns the same static token.
///
/// Useful for testing or when you have a long-lived token that doesn't
/// need refresh logic.
///
/// # Example
///
/// ```
/// use erprest_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("my-access-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a new static token provider with the given access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }

    /// Creates a new static token provider from an existing AccessToken.
    pub fn from_token(token: AccessToken) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _resource: &str) -> Result<AccessToken, AuthError> {
        Ok(self.token.clone())
    }
}
