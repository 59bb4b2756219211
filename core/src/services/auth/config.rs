//! Configuration for the auth service

/// Configuration for the auth service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Base URL embedded in reset-password emails
    pub reset_password_base_url: String,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            reset_password_base_url: String::from("http://localhost:3000/v1/auth"),
        }
    }
}
