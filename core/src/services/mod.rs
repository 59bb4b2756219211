//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

pub use auth::{AuthService, AuthServiceConfig, MailService, PasswordHasher};
pub use token::{TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig};
