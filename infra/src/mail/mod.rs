//! Mail service implementations
//!
//! Supports:
//! - SendGrid HTTP API for production delivery
//! - Mock implementation for development and testing

pub mod mock_mail;
pub mod sendgrid;

pub use mock_mail::MockMailService;
pub use sendgrid::SendGridMailService;

/// Build the reset-password email body carrying the raw token.
///
/// The token travels only in this email; it never appears in an HTTP
/// response body or in logs.
pub(crate) fn reset_password_body(raw_token: &str, base_url: &str) -> String {
    format!(
        "Dear user,\n\
         To reset your password, send a POST request to {}/resetPassword?token={} \
         and include the new password in the body\n\
         If you didn't request any password resets, then ignore this email.",
        base_url, raw_token
    )
}

/// Subject line for reset-password emails
pub(crate) const RESET_PASSWORD_SUBJECT: &str = "Reset password";

/// Mask an email address for logging, keeping only the first character
/// of the local part and the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first = &local[..local.chars().next().map_or(0, char::len_utf8)];
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
