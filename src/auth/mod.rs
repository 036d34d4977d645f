//! Credential handling: salted password hashes, password reset tokens and the
//! pre-shared key guarding the moderation routes.
//!
//! Key comparison is constant-time to mitigate timing attacks.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Duration, Utc};
use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// Header name for the moderation API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password with a per-password random salt.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Check a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Reject passwords that are too short to be worth hashing.
pub fn validate_new_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// A freshly issued reset token. Only `hash` is ever persisted.
#[derive(Debug)]
pub struct ResetToken {
    pub token: String,
    pub hash: String,
    pub expires_at: DateTime<Utc>,
}

/// Issue a random single-use reset token valid for `ttl_minutes`.
pub fn issue_reset_token(cost: u32, ttl_minutes: i64) -> Result<ResetToken, AppError> {
    let token = uuid::Uuid::new_v4().simple().to_string();
    let hash = bcrypt::hash(&token, cost)?;
    Ok(ResetToken {
        token,
        hash,
        expires_at: Utc::now() + Duration::minutes(ttl_minutes),
    })
}

/// Check a presented reset token against the stored hash and expiry.
pub fn verify_reset_token(
    token: &str,
    stored_hash: &str,
    expires_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<bool, AppError> {
    if now >= expires_at {
        return Ok(false);
    }
    Ok(bcrypt::verify(token, stored_hash)?)
}

/// PSK authentication layer function that takes the expected PSK as a parameter.
pub async fn psk_auth_layer(
    expected_psk: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    // Without a configured key the moderation surface stays closed
    let Some(expected) = expected_psk else {
        return AppError::Forbidden("Moderation is disabled".to_string()).into_response();
    };

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .or_else(|| {
            request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
                .map(|s| s.to_string())
        });

    match provided {
        Some(key) if constant_time_compare(&key, &expected) => next.run(request).await,
        Some(_) => AppError::Unauthorized("Invalid API key".to_string()).into_response(),
        None => AppError::Unauthorized("Missing API key".to_string()).into_response(),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("test-key-123", "test-key-123"));
        assert!(!constant_time_compare("test-key-123", "test-key-124"));
        assert!(!constant_time_compare("short", "much-longer-key"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("hunter22", 4).unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("same-password", 4).unwrap();
        let b = hash_password("same-password", 4).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(validate_new_password("abc").is_err());
        assert!(validate_new_password("abcdef").is_ok());
    }

    #[test]
    fn test_reset_token_expiry() {
        let issued = issue_reset_token(4, 30).unwrap();
        let now = Utc::now();
        assert!(verify_reset_token(&issued.token, &issued.hash, issued.expires_at, now).unwrap());
        assert!(!verify_reset_token("wrong", &issued.hash, issued.expires_at, now).unwrap());

        let later = issued.expires_at + Duration::seconds(1);
        assert!(!verify_reset_token(&issued.token, &issued.hash, issued.expires_at, later).unwrap());
    }
}
