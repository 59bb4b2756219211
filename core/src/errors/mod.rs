//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, ErrorResponse, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Unexpected persistence or collaborator failure. Internal detail is
    /// never part of the client-facing response outside development.
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// The fixed status-code contract the transport layer preserves.
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Validation { .. } => 400,
            DomainError::NotFound { .. } => 404,
            DomainError::Internal { .. } => 500,
            DomainError::Auth(err) => match err {
                AuthError::EmailAlreadyUsed => 400,
                AuthError::UserNotFound => 404,
                _ => 401,
            },
            DomainError::Token(_) => 401,
        }
    }

    /// Client-facing projection of this error.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            DomainError::Validation { message } => ErrorResponse::new("VALIDATION_ERROR", message),
            DomainError::NotFound { resource } => {
                ErrorResponse::new("NOT_FOUND", format!("{} not found", resource))
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "Internal server error")
            }
            DomainError::Auth(err) => err.clone().into(),
            DomainError::Token(err) => (*err).into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
