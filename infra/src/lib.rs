//! # Infrastructure Layer
//!
//! Concrete implementations behind the core's repository and collaborator
//! traits:
//! - **Database**: MySQL repositories using SQLx
//! - **Mail**: SendGrid delivery plus a mock for development and testing
//! - **Password**: bcrypt hashing behind the core `PasswordHasher` trait

use th_core::errors::DomainError;

pub mod database;
pub mod mail;
pub mod password;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail provider error
    #[error("Mail service error: {0}")]
    Mail(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
