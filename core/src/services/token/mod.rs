//! Token service module
//!
//! Handles all token-related operations:
//! - Stateless access token issuance and verification
//! - Stored refresh token issuance, verification, and rotation
//! - Reset-password token issuance and verification
//! - Bulk invalidation and expired-record cleanup

mod cleanup;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, TokenCleanupConfig, TokenCleanupService};
pub use config::TokenServiceConfig;
pub use service::TokenService;
