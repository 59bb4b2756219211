//! Mock Mail Service Implementation
//!
//! Logs reset-password emails instead of sending them. Used in
//! development and in tests that wire the full auth service together.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use th_core::errors::{DomainError, DomainResult};
use th_core::services::MailService;

use super::{mask_email, reset_password_body, RESET_PASSWORD_SUBJECT};

/// Mock mail service for development and testing
///
/// This implementation:
/// - Logs email details instead of sending
/// - Tracks message count for testing
/// - Can simulate provider failures
#[derive(Clone)]
pub struct MockMailService {
    /// Counter for tracking number of emails sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl MockMailService {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Create a mock service that fails every send
    pub fn failing() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: true,
        }
    }

    /// Get the total number of emails sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send_reset_password_email(
        &self,
        to: &str,
        raw_token: &str,
        base_url: &str,
    ) -> DomainResult<()> {
        if self.simulate_failure {
            warn!(
                "Mock mail service simulating failure for recipient: {}",
                mask_email(to)
            );
            return Err(DomainError::Internal {
                message: "Simulated mail delivery failure".to_string(),
            });
        }

        let body = reset_password_body(raw_token, base_url);
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        // The raw token is intentionally left out of the log line
        info!(
            target: "mail_service",
            provider = "mock",
            recipient = %mask_email(to),
            subject = RESET_PASSWORD_SUBJECT,
            body_length = body.len(),
            message_number = count,
            "Reset password email sent (mock)"
        );

        Ok(())
    }
}
