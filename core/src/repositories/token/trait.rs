//! Token repository trait defining the interface for token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::{TokenKind, TokenRecord};
use crate::errors::DomainError;

/// Repository trait for persisted refresh and reset-password tokens.
///
/// Implementations store sha-256 digests, never raw token values. The
/// digest is the unique lookup key within the collection.
///
/// # Atomicity
/// `take` is the single-use primitive: match-and-delete must be one
/// atomic operation so that two concurrent presentations of the same
/// token cannot both succeed.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new token record.
    ///
    /// # Returns
    /// * `Ok(TokenRecord)` - The saved record
    /// * `Err(DomainError)` - Save failed (duplicate digest, storage error)
    async fn save(&self, record: TokenRecord) -> Result<TokenRecord, DomainError>;

    /// Find a record by digest and kind, excluding blacklisted records.
    ///
    /// # Returns
    /// * `Ok(Some(TokenRecord))` - Matching usable record found
    /// * `Ok(None)` - No match (absent, wrong kind, or blacklisted)
    async fn find(
        &self,
        token_hash: &str,
        kind: TokenKind,
    ) -> Result<Option<TokenRecord>, DomainError>;

    /// Atomically delete and return the record matching digest, kind, and
    /// owning user. Blacklisted records are neither returned nor deleted.
    ///
    /// # Returns
    /// * `Ok(Some(TokenRecord))` - The record, now removed from storage
    /// * `Ok(None)` - No usable match; storage unchanged
    async fn take(
        &self,
        token_hash: &str,
        kind: TokenKind,
        user_id: Uuid,
    ) -> Result<Option<TokenRecord>, DomainError>;

    /// Delete a record by digest. Idempotent.
    ///
    /// # Returns
    /// * `Ok(true)` - A record was deleted
    /// * `Ok(false)` - No record with that digest
    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Delete all records of one kind belonging to a user.
    ///
    /// Used for logout-all and for superseding outstanding
    /// reset-password tokens.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_all_for_user(
        &self,
        user_id: Uuid,
        kind: TokenKind,
    ) -> Result<usize, DomainError>;

    /// Delete expired records of every kind.
    ///
    /// Maintenance only; verification never relies on this having run.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
