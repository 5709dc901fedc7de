//! Authentication failures.

use thiserror::Error;

/// Errors raised while hashing, issuing or verifying credentials.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authentication token required")]
    MissingToken,

    #[error("authorization header must be \"Bearer <token>\"")]
    MalformedHeader,

    #[error("invalid token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("token signing secret must not be empty")]
    EmptySecret,

    #[error("token lifetime {0:?} is out of range")]
    InvalidTtl(std::time::Duration),

    #[error("token signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("password hashing failed")]
    Hash(#[from] bcrypt::BcryptError),
}
