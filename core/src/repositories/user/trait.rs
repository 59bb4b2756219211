//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations.
///
/// The auth flows only ever see users through this boundary; password
/// hashes travel inside the `User` entity and stop here.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by email address (case-insensitive: emails are stored
    /// lowercase).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user.
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace a user's password hash.
    ///
    /// # Returns
    /// * `Ok(true)` - Password updated
    /// * `Ok(false)` - User not found
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Delete a user. Implementations also remove the user's token
    /// records: a deleted user leaves no live credentials behind.
    ///
    /// # Returns
    /// * `Ok(true)` - User deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
