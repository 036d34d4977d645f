//! Password flows shared by campers and camp groups.

use chrono::Utc;

use crate::auth;
use crate::db::{parse_timestamp, timestamp};
use crate::errors::AppError;
use crate::mail;
use crate::models::{ChangePasswordRequest, IdentityKind, LoginRequest, ResetPasswordRequest};
use crate::AppState;

use super::required_email;

const BAD_CREDENTIALS: &str = "Email or password is incorrect";

/// Verify a login and return the normalised email.
pub(crate) async fn verify_login(
    state: &AppState,
    kind: IdentityKind,
    request: &LoginRequest,
) -> Result<String, AppError> {
    let email = required_email(&request.email, "email")?;

    let credentials = state
        .repo
        .get_credentials(kind, &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    if !auth::verify_password(&request.password, &credentials.password_hash)? {
        tracing::info!(kind = kind.as_str(), "Rejected login");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    Ok(email)
}

/// Replace the password after checking the old one.
pub(crate) async fn change_password(
    state: &AppState,
    kind: IdentityKind,
    request: &ChangePasswordRequest,
) -> Result<(), AppError> {
    let email = required_email(&request.email, "email")?;
    auth::validate_new_password(&request.new_password)?;

    let credentials = state
        .repo
        .get_credentials(kind, &email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} not found", kind.label())))?;

    if !auth::verify_password(&request.old_password, &credentials.password_hash)? {
        return Err(AppError::Unauthorized("Old password is incorrect".to_string()));
    }

    let hash = auth::hash_password(&request.new_password, state.config.bcrypt_cost)?;
    state.repo.set_password_hash(kind, &email, &hash).await?;

    tracing::info!(kind = kind.as_str(), "Password changed");
    Ok(())
}

/// Issue a reset token and mail the reset link. No password ever leaves the server.
pub(crate) async fn forgot_password(
    state: &AppState,
    kind: IdentityKind,
    email: &str,
) -> Result<(), AppError> {
    let email = required_email(email, "email")?;

    if state.repo.get_credentials(kind, &email).await?.is_none() {
        return Err(AppError::NotFound(format!("{} not found", kind.label())));
    }

    let ttl = state.config.reset_token_ttl_minutes;
    let issued = auth::issue_reset_token(state.config.bcrypt_cost, ttl)?;
    state
        .repo
        .store_reset_token(kind, &email, &issued.hash, &timestamp(issued.expires_at))
        .await?;

    let body = mail::reset_password_body(&state.config.public_url, &email, &issued.token, ttl);
    state
        .mailer
        .send(&email, "Reset your password", &body)
        .await?;

    tracing::info!(kind = kind.as_str(), "Password reset token issued");
    Ok(())
}

/// Redeem a reset token. Tokens are single use and expire.
pub(crate) async fn reset_password(
    state: &AppState,
    kind: IdentityKind,
    request: &ResetPasswordRequest,
) -> Result<(), AppError> {
    let email = required_email(&request.email, "email")?;
    auth::validate_new_password(&request.new_password)?;

    let invalid = || AppError::Unauthorized("Reset token is invalid or expired".to_string());

    let credentials = state
        .repo
        .get_credentials(kind, &email)
        .await?
        .ok_or_else(invalid)?;

    let (Some(token_hash), Some(expires_at)) = (
        credentials.reset_token_hash,
        credentials
            .reset_token_expires_at
            .as_deref()
            .and_then(parse_timestamp),
    ) else {
        return Err(invalid());
    };

    if !auth::verify_reset_token(&request.token, &token_hash, expires_at, Utc::now())? {
        return Err(invalid());
    }

    let new_hash = auth::hash_password(&request.new_password, state.config.bcrypt_cost)?;
    if !state
        .repo
        .redeem_reset_token(kind, &email, &token_hash, &new_hash)
        .await?
    {
        return Err(invalid());
    }

    tracing::info!(kind = kind.as_str(), "Password reset completed");
    Ok(())
}
