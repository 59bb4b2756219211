//! In-memory implementation of UserRepository for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::TokenKind;
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::token::{InMemoryTokenRepository, TokenRepository};

use super::r#trait::UserRepository;

/// In-memory user repository keyed by id.
///
/// When linked to a token store via [`Self::with_token_store`], deleting
/// a user also deletes their token records, matching the trait's cascade
/// contract.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    tokens: Option<InMemoryTokenRepository>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            tokens: None,
        }
    }

    /// Link a token store so user deletion cascades to token records
    pub fn with_token_store(tokens: InMemoryTokenRepository) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            tokens: Some(tokens),
        }
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let needle = email.to_lowercase();
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == needle).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyUsed.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let removed = self.users.write().await.remove(&id).is_some();

        if removed {
            if let Some(tokens) = &self.tokens {
                for kind in [TokenKind::Refresh, TokenKind::ResetPassword] {
                    tokens.delete_all_for_user(id, kind).await?;
                }
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let repo = InMemoryUserRepository::new();
        repo.create(User::new("Ada", "ada@example.com", "h1".into()))
            .await
            .unwrap();

        let err = repo
            .create(User::new("Imposter", "ADA@example.com", "h2".into()))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DomainError::Auth(AuthError::EmailAlreadyUsed)
        ));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn lookup_by_email_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(User::new("Ada", "ada@example.com", "h1".into()))
            .await
            .unwrap();

        let found = repo.find_by_email("Ada@Example.COM").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn update_password_reports_missing_user() {
        let repo = InMemoryUserRepository::new();
        assert!(!repo.update_password(Uuid::new_v4(), "h").await.unwrap());
    }

    #[tokio::test]
    async fn delete_cascades_to_token_records() {
        use crate::domain::entities::token::TokenRecord;
        use chrono::{Duration, Utc};

        let tokens = InMemoryTokenRepository::new();
        let repo = InMemoryUserRepository::with_token_store(tokens.clone());
        let user = repo
            .create(User::new("Ada", "ada@example.com", "h1".into()))
            .await
            .unwrap();
        let other = Uuid::new_v4();

        for (hash, user_id, kind) in [
            ("h1", user.id, TokenKind::Refresh),
            ("h2", user.id, TokenKind::ResetPassword),
            ("h3", other, TokenKind::Refresh),
        ] {
            tokens
                .save(TokenRecord::new(
                    user_id,
                    hash.to_string(),
                    kind,
                    Utc::now() + Duration::days(1),
                ))
                .await
                .unwrap();
        }

        assert!(repo.delete(user.id).await.unwrap());

        // Only the other user's record survives.
        assert_eq!(tokens.len().await, 1);
        assert_eq!(
            tokens.records_for_user(other, TokenKind::Refresh).await.len(),
            1
        );
    }
}
