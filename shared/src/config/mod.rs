//! Configuration module
//!
//! Organized into logical areas:
//! - `auth` - JWT secret and token lifetimes
//! - `database` - connection pool settings
//! - `email` - outbound mail provider settings
//! - `environment` - environment detection

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;

use serde::{Deserialize, Serialize};
use std::env;

pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::Environment;

/// Complete application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Outbound email configuration
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is honored when present.
    /// Missing variables fall back to development defaults; malformed
    /// numeric values are rejected.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let mut config = AppConfig {
            environment: Environment::from_env(),
            ..Default::default()
        };

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database.url = url;
        }
        if let Ok(secret) = env::var("JWT_SECRET") {
            config.jwt.secret = secret;
        }
        if let Some(minutes) = parse_var("JWT_ACCESS_EXPIRATION_MINUTES")? {
            config.jwt.access_token_expiry_minutes = minutes;
        }
        if let Some(days) = parse_var("JWT_REFRESH_EXPIRATION_DAYS")? {
            config.jwt.refresh_token_expiry_days = days;
        }
        if let Some(minutes) = parse_var("JWT_RESET_PASSWORD_EXPIRATION_MINUTES")? {
            config.jwt.reset_password_expiry_minutes = minutes;
        }
        if let Ok(key) = env::var("EMAIL_API_KEY") {
            config.email.api_key = key;
        }
        if let Ok(from) = env::var("EMAIL_FROM_ADDRESS") {
            config.email.from_address = from;
        }
        if let Ok(base_url) = env::var("RESET_PASSWORD_BASE_URL") {
            config.email.reset_password_base_url = base_url;
        }

        if config.environment.is_production() && config.jwt.is_using_default_secret() {
            return Err(String::from(
                "JWT_SECRET must be set in the production environment",
            ));
        }

        Ok(config)
    }
}

fn parse_var(name: &str) -> Result<Option<i64>, String> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("{} must be an integer, got {:?}", name, raw)),
        Err(_) => Ok(None),
    }
}
