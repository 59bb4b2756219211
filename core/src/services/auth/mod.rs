//! Authentication service module

mod config;
mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
pub use traits::{MailService, PasswordHasher};
