//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind tag for persisted tokens.
///
/// Access tokens are stateless and never persisted, so they have no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Long-lived, single-use credential exchanged for a new token pair
    Refresh,
    /// Short-lived, single-use credential authorizing one password change
    ResetPassword,
}

impl TokenKind {
    /// Stable string form used for persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Refresh => "refresh",
            TokenKind::ResetPassword => "reset_password",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "refresh" => Ok(TokenKind::Refresh),
            "reset_password" => Ok(TokenKind::ResetPassword),
            _ => Err(format!("Unknown token kind: {}", s)),
        }
    }
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Unique token id. `iat`/`exp` have one-second granularity, so
    /// without this two tokens minted for the same user in the same
    /// second would be byte-identical.
    pub jti: Uuid,
}

impl Claims {
    /// Creates claims for a token expiring at the given instant
    pub fn new(user_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the subject claim
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Persisted token record.
///
/// Only the sha-256 digest of the signed token is stored; the raw token
/// exists solely in transit to the client (or, for reset tokens, in the
/// outbound email).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User this token belongs to
    pub user_id: Uuid,

    /// Sha-256 hex digest of the token value; unique lookup key
    pub token_hash: String,

    /// Purpose tag
    pub kind: TokenKind,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp at/after which the token is invalid
    pub expires_at: DateTime<Utc>,

    /// Marks a record unusable without deleting it
    pub blacklisted: bool,
}

impl TokenRecord {
    /// Creates a new token record
    pub fn new(
        user_id: Uuid,
        token_hash: String,
        kind: TokenKind,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            kind,
            created_at: Utc::now(),
            expires_at,
            blacklisted: false,
        }
    }

    /// Checks if the record has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// A record is usable if it is neither expired nor blacklisted
    pub fn is_usable(&self) -> bool {
        !self.is_expired() && !self.blacklisted
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

/// Public projection of an issued token: the signed value and its expiry.
///
/// Never exposes the storage id or the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The signed token value
    pub token: String,

    /// Absolute expiry instant
    pub expires_at: DateTime<Utc>,
}

/// Access/refresh token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Short-lived stateless access token
    pub access: IssuedToken,

    /// Long-lived stored refresh token
    pub refresh: IssuedToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_round_trip_subject() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, Utc::now() + Duration::minutes(30));

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_differ_per_issuance() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::minutes(30);

        let first = Claims::new(user_id, expires_at);
        let second = Claims::new(user_id, expires_at);

        // Same subject and instant, still distinct payloads.
        assert_ne!(first, second);
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_claims_expiration() {
        let claims = Claims::new(Uuid::new_v4(), Utc::now() - Duration::seconds(1));
        assert!(claims.is_expired());
    }

    #[test]
    fn test_token_kind_string_round_trip() {
        for kind in [TokenKind::Refresh, TokenKind::ResetPassword] {
            assert_eq!(kind.as_str().parse::<TokenKind>().unwrap(), kind);
        }
        assert!("resetPassword".parse::<TokenKind>().is_err());
    }

    #[test]
    fn test_token_record_creation() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::days(30);
        let record = TokenRecord::new(
            user_id,
            "digest".to_string(),
            TokenKind::Refresh,
            expires_at,
        );

        assert_eq!(record.user_id, user_id);
        assert_eq!(record.kind, TokenKind::Refresh);
        assert!(!record.blacklisted);
        assert!(record.is_usable());
    }

    #[test]
    fn test_token_record_expiration() {
        let mut record = TokenRecord::new(
            Uuid::new_v4(),
            "digest".to_string(),
            TokenKind::Refresh,
            Utc::now() + Duration::days(1),
        );

        record.expires_at = Utc::now() - Duration::days(1);

        assert!(record.is_expired());
        assert!(!record.is_usable());
        assert_eq!(record.time_until_expiration(), Duration::zero());
    }

    #[test]
    fn test_blacklisted_record_is_unusable() {
        let mut record = TokenRecord::new(
            Uuid::new_v4(),
            "digest".to_string(),
            TokenKind::ResetPassword,
            Utc::now() + Duration::minutes(10),
        );

        record.blacklisted = true;

        assert!(!record.is_usable());
        assert!(!record.is_expired());
    }

    #[test]
    fn test_token_record_serialization() {
        let record = TokenRecord::new(
            Uuid::new_v4(),
            "digest".to_string(),
            TokenKind::ResetPassword,
            Utc::now() + Duration::minutes(10),
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: TokenRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_issued_token_never_carries_storage_fields() {
        let issued = IssuedToken {
            token: "signed-value".to_string(),
            expires_at: Utc::now(),
        };

        let json = serde_json::to_value(&issued).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("token_hash").is_none());
    }
}
