//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Configuration for the outbound mail provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// API key for the HTTP mail provider
    pub api_key: String,

    /// Sender address used for all outbound mail
    pub from_address: String,

    /// Base URL embedded in reset-password links
    pub reset_password_base_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            from_address: String::from("no-reply@taskhub.local"),
            reset_password_base_url: String::from("http://localhost:3000/v1/auth"),
        }
    }
}
