//! Bcrypt password hashing behind the core `PasswordHasher` trait.
//!
//! Bcrypt is CPU-bound, so both hashing and verification run on the
//! blocking thread pool to keep the async executor responsive.

use async_trait::async_trait;
use tokio::task;
use tracing::error;

use th_core::errors::{DomainError, DomainResult};
use th_core::services::PasswordHasher;

/// Bcrypt-backed password hasher
#[derive(Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the bcrypt default cost
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit cost. Tests use a low cost to
    /// keep hashing fast.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.cost;

        task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| {
                error!("Password hashing task failed: {}", e);
                DomainError::Internal {
                    message: format!("Hashing task failed: {}", e),
                }
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            })
    }

    async fn verify(&self, password: &str, password_hash: &str) -> DomainResult<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();

        task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
            .await
            .map_err(|e| {
                error!("Password verification task failed: {}", e);
                DomainError::Internal {
                    message: format!("Verification task failed: {}", e),
                }
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Password verification failed: {}", e),
            })
    }
}
