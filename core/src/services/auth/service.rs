//! Main authentication service implementation

use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::AuthTokens;
use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::traits::{MailService, PasswordHasher};

/// Authentication service orchestrating the register / login / refresh /
/// password-reset use cases on top of the token service.
pub struct AuthService<U, T, M, P>
where
    U: UserRepository,
    T: TokenRepository,
    M: MailService + 'static,
    P: PasswordHasher,
{
    /// User repository for persistence
    user_repository: Arc<U>,
    /// Token service for credential lifecycle
    token_service: Arc<TokenService<T>>,
    /// Outbound mail collaborator
    mail_service: Arc<M>,
    /// Password hashing collaborator
    password_hasher: Arc<P>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, T, M, P> AuthService<U, T, M, P>
where
    U: UserRepository,
    T: TokenRepository,
    M: MailService + 'static,
    P: PasswordHasher,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        mail_service: Arc<M>,
        password_hasher: Arc<P>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            mail_service,
            password_hasher,
            config,
        }
    }

    /// Register a new user and issue their first token pair.
    ///
    /// Email uniqueness is checked up front; the password reaches the
    /// repository already hashed.
    pub async fn register(&self, new_user: NewUser) -> DomainResult<(User, AuthTokens)> {
        if self
            .user_repository
            .find_by_email(&new_user.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyUsed.into());
        }

        let password_hash = self.password_hasher.hash(&new_user.password).await?;
        let user = self
            .user_repository
            .create(User::new(new_user.name, new_user.email, password_hash))
            .await?;

        let tokens = self.token_service.generate_auth_tokens(user.id).await?;
        info!(user_id = %user.id, "user registered");

        Ok((user, tokens))
    }

    /// Log a user in with email and password.
    ///
    /// Unknown email, wrong password, and internal lookup failures are
    /// indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<(User, AuthTokens)> {
        let user = match self.user_repository.find_by_email(email).await {
            Ok(Some(user)) => user,
            Ok(None) | Err(_) => return Err(AuthError::IncorrectCredentials.into()),
        };

        match self
            .password_hasher
            .verify(password, &user.password_hash)
            .await
        {
            Ok(true) => {}
            Ok(false) | Err(_) => return Err(AuthError::IncorrectCredentials.into()),
        }

        let tokens = self.token_service.generate_auth_tokens(user.id).await?;
        Ok((user, tokens))
    }

    /// Exchange a refresh token for a fresh pair (rotation).
    ///
    /// A token whose owning user has since been deleted is rejected with
    /// the same uniform signal as any other bad token.
    pub async fn refresh_tokens(&self, refresh_token: &str) -> DomainResult<AuthTokens> {
        let user_id = self.token_service.verify_refresh_token(refresh_token).await?;

        match self.user_repository.find_by_id(user_id).await {
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => return Err(AuthError::Unauthorized.into()),
        }

        self.token_service.generate_auth_tokens(user_id).await
    }

    /// Invalidate every refresh token of a user ("logout all devices")
    pub async fn logout_all(&self, user_id: Uuid) -> DomainResult<usize> {
        let deleted = self
            .token_service
            .delete_all_refresh_tokens_of_user(user_id)
            .await?;
        info!(%user_id, deleted, "logged out of all devices");
        Ok(deleted)
    }

    /// Start the forgot-password flow: mint a reset token and dispatch
    /// the email in the background.
    ///
    /// The caller is not blocked on mail delivery and never observes a
    /// delivery failure; the dispatch task logs its own errors.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<()> {
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let raw_token = self
            .token_service
            .generate_reset_password_token(user.id)
            .await?;

        let mail_service = Arc::clone(&self.mail_service);
        let to = user.email.clone();
        let base_url = self.config.reset_password_base_url.clone();
        tokio::spawn(async move {
            if let Err(e) = mail_service
                .send_reset_password_email(&to, &raw_token, &base_url)
                .await
            {
                error!(error = %e, "failed to send reset-password email");
            }
        });

        Ok(())
    }

    /// Complete a password reset.
    ///
    /// On success every outstanding reset-password and refresh token of
    /// the user is deleted: a password change invalidates all sessions.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user_id = self
            .token_service
            .verify_reset_password_token(reset_token)
            .await?;

        let password_hash = match self.password_hasher.hash(new_password).await {
            Ok(hash) => hash,
            Err(_) => return Err(AuthError::InvalidOrExpiredResetToken.into()),
        };
        match self
            .user_repository
            .update_password(user_id, &password_hash)
            .await
        {
            Ok(true) => {}
            Ok(false) | Err(_) => return Err(AuthError::InvalidOrExpiredResetToken.into()),
        }

        self.token_service
            .delete_all_reset_password_tokens_of_user(user_id)
            .await?;
        self.token_service
            .delete_all_refresh_tokens_of_user(user_id)
            .await?;
        warn!(%user_id, "password reset completed; all sessions invalidated");

        Ok(())
    }

    /// Look up a user, mapping a miss onto the boundary error
    pub async fn get_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: String::from("user"),
            })
    }
}
