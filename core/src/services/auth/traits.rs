//! Collaborator traits the auth flows depend on.
//!
//! Implementations live in the infrastructure layer; the core only ever
//! sees these interfaces.

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Outbound mail collaborator.
///
/// From the auth service's perspective sending is fire-and-forget:
/// failures are logged by the dispatch task, never surfaced to the
/// caller of `forgot_password`.
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send the reset-password email carrying the raw token.
    ///
    /// The token travels only here, out-of-band; it is never returned in
    /// an HTTP body.
    async fn send_reset_password_email(
        &self,
        to: &str,
        raw_token: &str,
        base_url: &str,
    ) -> DomainResult<()>;
}

/// Password hashing collaborator. The core never hashes inline.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    async fn hash(&self, password: &str) -> DomainResult<String>;

    /// Verify a plaintext password against a stored hash
    async fn verify(&self, password: &str, password_hash: &str) -> DomainResult<bool>;
}
