use thiserror::Error;

use crate::errors::ServiceError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("An account with this email already exists.")]
    Conflict,
    /// Same message whether the email is unknown or the password is wrong.
    #[error("Invalid email or password.")]
    Unauthorized,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code, logged with every error response
    pub fn code(&self) -> u16 {
        match self {
            AuthError::InvalidInput(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::Unauthorized => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<ServiceError> for AuthError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Conflict(_) => AuthError::Conflict,
            other => AuthError::Repository(other.to_string()),
        }
    }
}
