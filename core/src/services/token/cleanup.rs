//! Periodic sweep of expired token records.
//!
//! Expiry is always enforced lazily at verification time; the sweeper
//! only keeps the store from accumulating dead rows and never
//! participates in verification decisions.

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

/// Configuration for the token cleanup sweeper
#[derive(Debug, Clone)]
pub struct TokenCleanupConfig {
    /// How often to run a sweep
    pub interval: Duration,
    /// Whether the sweeper is enabled
    pub enabled: bool,
}

impl Default for TokenCleanupConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
            enabled: true,
        }
    }
}

/// Outcome of one cleanup cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired records deleted
    pub expired_tokens_deleted: usize,
}

/// Service deleting expired token records on an interval
pub struct TokenCleanupService<R: TokenRepository + 'static> {
    repository: Arc<R>,
    config: TokenCleanupConfig,
}

impl<R: TokenRepository + 'static> TokenCleanupService<R> {
    pub fn new(repository: Arc<R>, config: TokenCleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let expired_tokens_deleted = self.repository.delete_expired().await?;
        info!(expired_tokens_deleted, "token cleanup cycle completed");

        Ok(CleanupResult {
            expired_tokens_deleted,
        })
    }

    /// Spawn the sweeper loop on the current runtime.
    ///
    /// Cycle failures are logged and the loop keeps running.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.config.interval);
            // The immediate first tick would sweep at startup; skip it.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = self.run_cleanup().await {
                    error!(error = %e, "token cleanup cycle failed");
                }
            }
        })
    }
}
