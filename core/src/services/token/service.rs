//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::{AuthTokens, Claims, IssuedToken, TokenKind, TokenRecord};
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Service for issuing, verifying, and rotating tokens.
///
/// Access tokens are stateless: signature and embedded expiry are their
/// only source of truth. Refresh and reset-password tokens are also
/// persisted (as sha-256 digests) and consumed on first successful use.
pub struct TokenService<R: TokenRepository> {
    repository: R,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    pub fn new(repository: R, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generates a stateless access token for a user.
    ///
    /// No persistence; each issuance carries a fresh `jti`, so repeated
    /// calls never produce the same token string.
    pub fn generate_access_token(&self, user_id: Uuid) -> DomainResult<IssuedToken> {
        let expires_at = Utc::now() + Duration::minutes(self.config.access_token_expiry_minutes);
        let token = self.encode_claims(user_id, expires_at)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Generates a refresh token and persists its digest.
    ///
    /// Returns only the public projection; the storage id never leaves
    /// the repository.
    pub async fn generate_refresh_token(&self, user_id: Uuid) -> DomainResult<IssuedToken> {
        let expires_at = Utc::now() + Duration::days(self.config.refresh_token_expiry_days);
        self.issue_stored_token(user_id, TokenKind::Refresh, expires_at)
            .await
    }

    /// Generates a new access + refresh token pair for a user.
    ///
    /// No transactional guarantee spans the pair: access token generation
    /// is stateless and does not touch the store.
    pub async fn generate_auth_tokens(&self, user_id: Uuid) -> DomainResult<AuthTokens> {
        let access = self.generate_access_token(user_id)?;
        let refresh = self.generate_refresh_token(user_id).await?;
        Ok(AuthTokens { access, refresh })
    }

    /// Verifies an access token and returns its claims.
    ///
    /// Stateless: no store lookup. Any failure is the uniform
    /// "Please authenticate".
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        match self.decode_claims(token) {
            Ok(claims) => Ok(claims),
            Err(reason) => {
                debug!(%reason, "access token rejected");
                Err(AuthError::Unauthorized.into())
            }
        }
    }

    /// Verifies a refresh token, consumes it, and returns the owning
    /// user id.
    ///
    /// Every distinguishable failure - bad signature, never issued,
    /// already consumed, blacklisted, expired, wrong subject - collapses
    /// into [`AuthError::Unauthorized`] so callers cannot probe which
    /// case occurred.
    pub async fn verify_refresh_token(&self, token: &str) -> DomainResult<Uuid> {
        match self.consume_stored_token(token, TokenKind::Refresh).await {
            Ok(record) => Ok(record.user_id),
            Err(reason) => {
                debug!(%reason, kind = %TokenKind::Refresh, "stored token rejected");
                Err(AuthError::Unauthorized.into())
            }
        }
    }

    /// Rotates a refresh token: verifies and consumes the presented one,
    /// then mints a fresh pair. Refresh tokens are never reusable.
    pub async fn refresh_auth_tokens(&self, token: &str) -> DomainResult<AuthTokens> {
        let user_id = self.verify_refresh_token(token).await?;
        self.generate_auth_tokens(user_id).await
    }

    /// Issues a reset-password token, superseding any outstanding one.
    ///
    /// At most one live reset token exists per user at a time. The raw
    /// token string is returned for out-of-band delivery and never
    /// appears in an HTTP body.
    pub async fn generate_reset_password_token(&self, user_id: Uuid) -> DomainResult<String> {
        self.repository
            .delete_all_for_user(user_id, TokenKind::ResetPassword)
            .await?;

        let expires_at =
            Utc::now() + Duration::minutes(self.config.reset_password_expiry_minutes);
        let issued = self
            .issue_stored_token(user_id, TokenKind::ResetPassword, expires_at)
            .await?;
        Ok(issued.token)
    }

    /// Verifies a reset-password token, consumes it, and returns the
    /// owning user id.
    ///
    /// Same collapsing behavior as refresh verification, but with the
    /// reset-flow wording: this path has no prior authentication context.
    pub async fn verify_reset_password_token(&self, token: &str) -> DomainResult<Uuid> {
        match self
            .consume_stored_token(token, TokenKind::ResetPassword)
            .await
        {
            Ok(record) => Ok(record.user_id),
            Err(reason) => {
                debug!(%reason, kind = %TokenKind::ResetPassword, "stored token rejected");
                Err(AuthError::InvalidOrExpiredResetToken.into())
            }
        }
    }

    /// Deletes every refresh token of a user ("logout all devices").
    pub async fn delete_all_refresh_tokens_of_user(&self, user_id: Uuid) -> DomainResult<usize> {
        self.repository
            .delete_all_for_user(user_id, TokenKind::Refresh)
            .await
    }

    /// Deletes every reset-password token of a user.
    pub async fn delete_all_reset_password_tokens_of_user(
        &self,
        user_id: Uuid,
    ) -> DomainResult<usize> {
        self.repository
            .delete_all_for_user(user_id, TokenKind::ResetPassword)
            .await
    }

    /// Signs and persists a token of the given kind, returning the
    /// public projection.
    async fn issue_stored_token(
        &self,
        user_id: Uuid,
        kind: TokenKind,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<IssuedToken> {
        let token = self.encode_claims(user_id, expires_at)?;
        let record = TokenRecord::new(user_id, Self::hash_token(&token), kind, expires_at);
        self.repository.save(record).await?;
        Ok(IssuedToken { token, expires_at })
    }

    /// The single verify-and-consume path for stored tokens.
    ///
    /// Decoding happens before any store access, so malformed input never
    /// mutates the store. The stored record's expiry is checked in
    /// addition to the signed payload's: a forged-but-correctly-expired
    /// payload must not bypass store-based revocation.
    async fn consume_stored_token(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<TokenRecord, TokenError> {
        let claims = self.decode_claims(token)?;
        let user_id = claims.user_id().map_err(|_| TokenError::Malformed)?;

        let record = self
            .repository
            .take(&Self::hash_token(token), kind, user_id)
            .await
            .map_err(|_| TokenError::NotFound)?
            .ok_or(TokenError::NotFound)?;

        // The record is already consumed at this point; an expired token
        // is dead either way.
        if record.is_expired() {
            return Err(TokenError::Expired);
        }

        Ok(record)
    }

    /// Encodes claims into a signed JWT
    fn encode_claims(&self, user_id: Uuid, expires_at: DateTime<Utc>) -> DomainResult<String> {
        let claims = Claims::new(user_id, expires_at);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed.into())
    }

    /// Decodes a JWT, mapping library failures onto the closed internal
    /// error set.
    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }

    /// Sha-256 hex digest of a token, the at-rest representation
    pub(crate) fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
