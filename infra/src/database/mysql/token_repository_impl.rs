//! MySQL implementation of the TokenRepository trait.
//!
//! Persists refresh and reset-password token records through SQLx. Only
//! sha-256 digests ever reach this layer; the core hashes tokens before
//! calling into the repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use std::str::FromStr;
use uuid::Uuid;

use th_core::domain::entities::token::{TokenKind, TokenRecord};
use th_core::errors::DomainError;
use th_core::repositories::TokenRepository;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a TokenRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<TokenRecord, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_id: {}", e),
        })?;

        let kind: String = row.try_get("kind").map_err(|e| DomainError::Internal {
            message: format!("Failed to get kind: {}", e),
        })?;

        Ok(TokenRecord {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get token_hash: {}", e),
                })?,
            kind: TokenKind::from_str(&kind)
                .map_err(|e| DomainError::Internal { message: e })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            blacklisted: row
                .try_get("blacklisted")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get blacklisted: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save(&self, record: TokenRecord) -> Result<TokenRecord, DomainError> {
        // The digest is the unique lookup key; reject duplicates up front
        let check_query =
            "SELECT EXISTS(SELECT 1 FROM tokens WHERE token_hash = ?) as already_present";
        let exists_row = sqlx::query(check_query)
            .bind(&record.token_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check token existence: {}", e),
            })?;

        let exists: i8 = exists_row
            .try_get("already_present")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get existence result: {}", e),
            })?;

        if exists == 1 {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        let query = r#"
            INSERT INTO tokens (
                id, user_id, token_hash, kind, created_at, expires_at, blacklisted
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.token_hash)
            .bind(record.kind.as_str())
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.blacklisted)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to save token: {}", e),
            })?;

        Ok(record)
    }

    async fn find(
        &self,
        token_hash: &str,
        kind: TokenKind,
    ) -> Result<Option<TokenRecord>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, kind, created_at, expires_at, blacklisted
            FROM tokens
            WHERE token_hash = ? AND kind = ? AND blacklisted = FALSE
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .bind(kind.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find token: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn take(
        &self,
        token_hash: &str,
        kind: TokenKind,
        user_id: Uuid,
    ) -> Result<Option<TokenRecord>, DomainError> {
        // Lock the row and delete it in one transaction so two concurrent
        // presentations of the same token cannot both succeed.
        let mut tx = self.pool.begin().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to begin transaction: {}", e),
        })?;

        let select_query = r#"
            SELECT id, user_id, token_hash, kind, created_at, expires_at, blacklisted
            FROM tokens
            WHERE token_hash = ? AND kind = ? AND user_id = ? AND blacklisted = FALSE
            LIMIT 1
            FOR UPDATE
        "#;

        let row = sqlx::query(select_query)
            .bind(token_hash)
            .bind(kind.as_str())
            .bind(user_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to lock token row: {}", e),
            })?;

        let record = match row {
            Some(row) => Self::row_to_record(&row)?,
            None => {
                tx.rollback().await.map_err(|e| DomainError::Internal {
                    message: format!("Failed to roll back transaction: {}", e),
                })?;
                return Ok(None);
            }
        };

        sqlx::query("DELETE FROM tokens WHERE id = ?")
            .bind(record.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete token row: {}", e),
            })?;

        tx.commit().await.map_err(|e| DomainError::Internal {
            message: format!("Failed to commit transaction: {}", e),
        })?;

        Ok(Some(record))
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM tokens WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete token: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_for_user(
        &self,
        user_id: Uuid,
        kind: TokenKind,
    ) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM tokens WHERE user_id = ? AND kind = ?")
            .bind(user_id.to_string())
            .bind(kind.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete user tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM tokens WHERE expires_at < ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}
