//! Error types

mod api;
mod auth;
mod criteria;
mod detail;

pub use api::*;
pub use auth::*;
pub use criteria::*;
pub use detail::*;

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from an API call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Error obtaining an access token.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Malformed search criteria.
    #[error(transparent)]
    Criteria(#[from] CriteriaError),
}
