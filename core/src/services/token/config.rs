//! Configuration for the token service

use th_shared::config::JwtConfig;

/// Configuration for the token service.
///
/// Constructed once at startup and handed to [`super::TokenService`];
/// there is no global mutable state behind it.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret
    pub jwt_secret: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
    /// Reset-password token expiry in minutes
    pub reset_password_expiry_minutes: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
            reset_password_expiry_minutes: config.reset_password_expiry_minutes,
        }
    }
}

impl TokenServiceConfig {
    /// Override the signing secret. Exists to support negative testing of
    /// signature mismatch; production code uses the configured secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = secret.into();
        self
    }
}
