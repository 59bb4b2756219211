//! Concrete error enums for token and authentication flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Internal token-verification failures.
///
/// This is a closed set: every way a presented token can be rejected maps
/// onto exactly one variant. The set exists so the service boundary can
/// collapse it deliberately (see `TokenService`) instead of leaking which
/// case occurred to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature verification failed")]
    InvalidSignature,

    #[error("malformed token")]
    Malformed,

    #[error("token expired")]
    Expired,

    #[error("token not found")]
    NotFound,

    #[error("token generation failed")]
    GenerationFailed,
}

/// Boundary errors surfaced by the auth and token services.
///
/// Wordings are part of the external contract; transports map these onto
/// 400/401 responses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Uniform rejection for any refresh-token failure: bad signature,
    /// not found, already consumed, blacklisted, or expired.
    #[error("Please authenticate")]
    Unauthorized,

    /// Uniform rejection for login: unknown email and wrong password are
    /// indistinguishable to the caller.
    #[error("Incorrect email or password")]
    IncorrectCredentials,

    /// Uniform rejection for the unauthenticated reset-password flow.
    #[error("Password reset failed")]
    InvalidOrExpiredResetToken,

    #[error("Email is already used")]
    EmailAlreadyUsed,

    #[error("User not found")]
    UserNotFound,
}

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::Unauthorized => "UNAUTHORIZED",
            AuthError::IncorrectCredentials => "INCORRECT_CREDENTIALS",
            AuthError::InvalidOrExpiredResetToken => "PASSWORD_RESET_FAILED",
            AuthError::EmailAlreadyUsed => "EMAIL_ALREADY_USED",
            AuthError::UserNotFound => "USER_NOT_FOUND",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::InvalidSignature => "INVALID_SIGNATURE",
            TokenError::Malformed => "MALFORMED_TOKEN",
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::NotFound => "TOKEN_NOT_FOUND",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_wordings_are_stable() {
        assert_eq!(AuthError::Unauthorized.to_string(), "Please authenticate");
        assert_eq!(
            AuthError::IncorrectCredentials.to_string(),
            "Incorrect email or password"
        );
        assert_eq!(
            AuthError::InvalidOrExpiredResetToken.to_string(),
            "Password reset failed"
        );
    }

    #[test]
    fn error_response_carries_machine_code() {
        let response: ErrorResponse = AuthError::Unauthorized.into();
        assert_eq!(response.error, "UNAUTHORIZED");
        assert_eq!(response.message, "Please authenticate");
    }
}
