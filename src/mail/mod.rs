//! Outgoing mail.
//!
//! Delivery is behind the `Mailer` trait; the default implementation writes the
//! message to the log so development setups need no relay.

use async_trait::async_trait;

use crate::errors::AppError;

/// Sends a plain-text message to one recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

/// Mailer that logs messages instead of delivering them.
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        tracing::info!(to = %to, subject = %subject, "Outgoing mail");
        tracing::debug!("Mail body:\n{}", body);
        Ok(())
    }
}

/// Body of the password reset message.
pub fn reset_password_body(public_url: &str, email: &str, token: &str, ttl_minutes: i64) -> String {
    format!(
        "Hello,\n\nA password reset was requested for {email}.\n\n\
         Use this link to choose a new password:\n{base}/reset-password?email={query_email}&token={token}\n\n\
         The link expires in {ttl} minutes and works once. If you did not ask for this, ignore this message.\n",
        email = email,
        base = public_url.trim_end_matches('/'),
        query_email = urlencoding::encode(email),
        token = urlencoding::encode(token),
        ttl = ttl_minutes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_body_contains_link_not_password() {
        let body = reset_password_body("http://localhost:3000/", "a@x.com", "tok123", 30);
        assert!(body.contains("http://localhost:3000/reset-password?email=a%40x.com&token=tok123"));
        assert!(body.contains("requested for a@x.com"));
        assert!(body.contains("30 minutes"));
    }

    #[test]
    fn test_reset_link_encodes_query_values() {
        let body = reset_password_body("http://localhost:3000", "a+b&c@x.com", "tok 1", 30);
        assert!(body.contains("reset-password?email=a%2Bb%26c%40x.com&token=tok%201\n"));
    }

    #[tokio::test]
    async fn test_log_mailer_succeeds() {
        LogMailer.send("a@x.com", "subject", "body").await.unwrap();
    }
}
