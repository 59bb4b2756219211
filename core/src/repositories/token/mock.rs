//! In-memory implementation of TokenRepository for testing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::{TokenKind, TokenRecord};
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// In-memory token repository keyed by digest.
///
/// Clones share the same underlying map, so a test can hold a handle to
/// the store while a service owns another.
#[derive(Clone)]
pub struct InMemoryTokenRepository {
    records: Arc<RwLock<HashMap<String, TokenRecord>>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records, of any kind
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// All records of one kind belonging to a user
    pub async fn records_for_user(&self, user_id: Uuid, kind: TokenKind) -> Vec<TokenRecord> {
        self.records
            .read()
            .await
            .values()
            .filter(|r| r.user_id == user_id && r.kind == kind)
            .cloned()
            .collect()
    }

    /// Test support: mark a stored record blacklisted
    pub async fn mark_blacklisted(&self, token_hash: &str) -> bool {
        let mut records = self.records.write().await;
        match records.get_mut(token_hash) {
            Some(record) => {
                record.blacklisted = true;
                true
            }
            None => false,
        }
    }

    /// Test support: rewrite a stored record's expiry
    pub async fn set_expiry(&self, token_hash: &str, expires_at: DateTime<Utc>) -> bool {
        let mut records = self.records.write().await;
        match records.get_mut(token_hash) {
            Some(record) => {
                record.expires_at = expires_at;
                true
            }
            None => false,
        }
    }
}

impl Default for InMemoryTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save(&self, record: TokenRecord) -> Result<TokenRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.token_hash) {
            return Err(DomainError::Internal {
                message: "Duplicate token digest".to_string(),
            });
        }

        records.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn find(
        &self,
        token_hash: &str,
        kind: TokenKind,
    ) -> Result<Option<TokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records
            .get(token_hash)
            .filter(|r| r.kind == kind && !r.blacklisted)
            .cloned())
    }

    async fn take(
        &self,
        token_hash: &str,
        kind: TokenKind,
        user_id: Uuid,
    ) -> Result<Option<TokenRecord>, DomainError> {
        // Single write-lock section: observe-and-remove cannot interleave.
        let mut records = self.records.write().await;

        let matches = records
            .get(token_hash)
            .map(|r| r.kind == kind && r.user_id == user_id && !r.blacklisted)
            .unwrap_or(false);

        if matches {
            Ok(records.remove(token_hash))
        } else {
            Ok(None)
        }
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        Ok(records.remove(token_hash).is_some())
    }

    async fn delete_all_for_user(
        &self,
        user_id: Uuid,
        kind: TokenKind,
    ) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, r| !(r.user_id == user_id && r.kind == kind));

        Ok(initial_count - records.len())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, r| !r.is_expired());

        Ok(initial_count - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(user_id: Uuid, hash: &str, kind: TokenKind) -> TokenRecord {
        TokenRecord::new(
            user_id,
            hash.to_string(),
            kind,
            Utc::now() + Duration::days(1),
        )
    }

    #[tokio::test]
    async fn save_rejects_duplicate_digest() {
        let repo = InMemoryTokenRepository::new();
        let user_id = Uuid::new_v4();

        repo.save(record(user_id, "h1", TokenKind::Refresh))
            .await
            .unwrap();
        let err = repo
            .save(record(user_id, "h1", TokenKind::Refresh))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Internal { .. }));
    }

    #[tokio::test]
    async fn find_is_scoped_by_kind() {
        let repo = InMemoryTokenRepository::new();
        let user_id = Uuid::new_v4();
        repo.save(record(user_id, "h1", TokenKind::Refresh))
            .await
            .unwrap();

        assert!(repo.find("h1", TokenKind::Refresh).await.unwrap().is_some());
        assert!(repo
            .find("h1", TokenKind::ResetPassword)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn take_consumes_exactly_once() {
        let repo = InMemoryTokenRepository::new();
        let user_id = Uuid::new_v4();
        repo.save(record(user_id, "h1", TokenKind::Refresh))
            .await
            .unwrap();

        let first = repo.take("h1", TokenKind::Refresh, user_id).await.unwrap();
        let second = repo.take("h1", TokenKind::Refresh, user_id).await.unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn take_ignores_other_users_tokens() {
        let repo = InMemoryTokenRepository::new();
        let owner = Uuid::new_v4();
        repo.save(record(owner, "h1", TokenKind::Refresh))
            .await
            .unwrap();

        let stolen = repo
            .take("h1", TokenKind::Refresh, Uuid::new_v4())
            .await
            .unwrap();

        assert!(stolen.is_none());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn take_leaves_blacklisted_records_in_place() {
        let repo = InMemoryTokenRepository::new();
        let user_id = Uuid::new_v4();
        repo.save(record(user_id, "h1", TokenKind::Refresh))
            .await
            .unwrap();
        assert!(repo.mark_blacklisted("h1").await);

        let taken = repo.take("h1", TokenKind::Refresh, user_id).await.unwrap();

        assert!(taken.is_none());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryTokenRepository::new();
        let user_id = Uuid::new_v4();
        repo.save(record(user_id, "h1", TokenKind::Refresh))
            .await
            .unwrap();

        assert!(repo.delete("h1").await.unwrap());
        assert!(!repo.delete("h1").await.unwrap());
    }

    #[tokio::test]
    async fn delete_all_for_user_is_scoped_by_kind() {
        let repo = InMemoryTokenRepository::new();
        let user_id = Uuid::new_v4();
        repo.save(record(user_id, "h1", TokenKind::Refresh))
            .await
            .unwrap();
        repo.save(record(user_id, "h2", TokenKind::Refresh))
            .await
            .unwrap();
        repo.save(record(user_id, "h3", TokenKind::ResetPassword))
            .await
            .unwrap();

        let deleted = repo
            .delete_all_for_user(user_id, TokenKind::Refresh)
            .await
            .unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn delete_expired_sweeps_only_expired_records() {
        let repo = InMemoryTokenRepository::new();
        let user_id = Uuid::new_v4();
        repo.save(record(user_id, "live", TokenKind::Refresh))
            .await
            .unwrap();
        repo.save(record(user_id, "dead", TokenKind::Refresh))
            .await
            .unwrap();
        repo.set_expiry("dead", Utc::now() - Duration::hours(1)).await;

        let deleted = repo.delete_expired().await.unwrap();

        assert_eq!(deleted, 1);
        assert!(repo.find("live", TokenKind::Refresh).await.unwrap().is_some());
    }
}
