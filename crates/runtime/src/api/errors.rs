//! Unified error types surfaced by the runtime API.
//!
//! [`ServiceError`] is the request-level taxonomy: every variant maps to one
//! HTTP status and one client-safe message. [`RuntimeError`] covers building
//! and shutting down the runtime itself.
use std::time::Duration;

use thiserror::Error;

pub use crate::auth::AuthError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0} not found")]
    NotFound(Resource),

    #[error("username {0:?} already exists")]
    Conflict(String),

    #[error("storage failure")]
    Storage(#[source] RepositoryError),

    #[error("storage call timed out after {0:?}")]
    StorageTimeout(Duration),

    #[error("blocking task failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

/// Records a request can fail to find.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resource {
    User,
    Pet,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Resource::User => "user",
            Resource::Pet => "pet",
        };
        write!(f, "{}", label)
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateUsername { username } => ServiceError::Conflict(username),
            other => ServiceError::Storage(other),
        }
    }
}

impl From<pet_core::StatError> for ServiceError {
    fn from(err: pet_core::StatError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl ServiceError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::Auth(auth) => match auth {
                AuthError::MissingToken | AuthError::MalformedHeader => 401,
                AuthError::InvalidCredentials => 401,
                AuthError::InvalidToken(_) | AuthError::Expired => 403,
                AuthError::EmptySecret
                | AuthError::InvalidTtl(_)
                | AuthError::Signing(_)
                | AuthError::Hash(_) => 500,
            },
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::Storage(_)
            | ServiceError::StorageTimeout(_)
            | ServiceError::WorkerJoin(_) => 500,
        }
    }

    /// Message safe to show a client. Internal detail never leaks.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation(message) => message.clone(),
            ServiceError::Auth(AuthError::MissingToken) => {
                "Authentication token required.".to_string()
            }
            ServiceError::Auth(AuthError::MalformedHeader) => {
                "Token format is \"Bearer <token>\".".to_string()
            }
            ServiceError::Auth(AuthError::InvalidCredentials) => {
                "Invalid username or password.".to_string()
            }
            ServiceError::Auth(AuthError::InvalidToken(_) | AuthError::Expired) => {
                "Invalid or expired token.".to_string()
            }
            ServiceError::NotFound(Resource::Pet) => "Pet not found for this user.".to_string(),
            ServiceError::NotFound(Resource::User) => "User not found.".to_string(),
            ServiceError::Conflict(_) => {
                "Username already exists. Please choose another.".to_string()
            }
            ServiceError::Auth(_)
            | ServiceError::Storage(_)
            | ServiceError::StorageTimeout(_)
            | ServiceError::WorkerJoin(_) => "Internal server error.".to_string(),
        }
    }

    /// True when the failure is the server's fault and worth an error log.
    pub fn is_internal(&self) -> bool {
        self.status() >= 500
    }
}

/// Errors raised while assembling or stopping the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime requires a store to be configured before building")]
    MissingStore,

    #[error("runtime requires a token signing secret")]
    MissingSecret,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("decay worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ServiceError::Validation("x".into()).status(), 400);
        assert_eq!(ServiceError::Auth(AuthError::MissingToken).status(), 401);
        assert_eq!(ServiceError::Auth(AuthError::InvalidCredentials).status(), 401);
        assert_eq!(ServiceError::Auth(AuthError::Expired).status(), 403);
        assert_eq!(ServiceError::NotFound(Resource::Pet).status(), 404);
        assert_eq!(ServiceError::Conflict("alice".into()).status(), 409);
        assert_eq!(
            ServiceError::StorageTimeout(Duration::from_secs(1)).status(),
            500
        );
    }

    #[test]
    fn duplicate_username_becomes_conflict() {
        let err: ServiceError = RepositoryError::DuplicateUsername {
            username: "alice".into(),
        }
        .into();
        assert!(matches!(err, ServiceError::Conflict(ref name) if name == "alice"));
    }

    #[test]
    fn storage_detail_is_hidden() {
        let err: ServiceError = RepositoryError::CorruptedData("pets row 3".into()).into();
        assert_eq!(err.status(), 500);
        assert!(err.is_internal());
        assert!(!err.public_message().contains("pets row"));
    }

    #[test]
    fn unknown_action_is_validation() {
        let err: ServiceError = pet_core::StatError::UnknownAction("dance".into()).into();
        assert_eq!(err.status(), 400);
    }
}
