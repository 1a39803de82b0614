//! Authentication error types

/// Errors that can occur while obtaining an access token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The supplied credentials were rejected.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The token expired and could not be renewed.
    #[error("Token expired and refresh failed: {message}")]
    TokenExpired { message: String },

    /// Network error while talking to the token endpoint.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// The token endpoint returned an unparseable response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}
