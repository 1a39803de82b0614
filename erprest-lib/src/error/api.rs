//! API error types

use super::ServiceErrorDetail;

/// Errors that can occur during API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the API.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
        /// Service error code, if available.
        code: Option<String>,
        /// Detailed error information from the service.
        inner: Option<Box<ServiceErrorDetail>>,
    },

    /// Network error during API call.
    ///
    /// Timeouts surface here as well, via [`reqwest::Error::is_timeout`].
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            code: None,
            inner: None,
        }
    }

    /// Creates a new HTTP error with service error details.
    pub fn http_with_detail(
        status: u16,
        message: impl Into<String>,
        detail: ServiceErrorDetail,
    ) -> Self {
        Self::Http {
            status,
            message: message.into(),
            code: detail.code.clone(),
            inner: Some(Box::new(detail)),
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the service error code if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Http { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Returns the service error detail if available.
    pub fn service_detail(&self) -> Option<&ServiceErrorDetail> {
        match self {
            Self::Http { inner, .. } => inner.as_deref(),
            _ => None,
        }
    }
}
