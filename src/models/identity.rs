//! Shared identity types for both user kinds.

use serde::{Deserialize, Serialize};

/// The two kinds of account that can sign in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum IdentityKind {
    Camper,
    CampGroup,
}

impl IdentityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityKind::Camper => "camper",
            IdentityKind::CampGroup => "campGroup",
        }
    }

    /// Table holding the profile and credentials for this kind.
    pub fn table(&self) -> &'static str {
        match self {
            IdentityKind::Camper => "campers",
            IdentityKind::CampGroup => "camp_groups",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IdentityKind::Camper => "User",
            IdentityKind::CampGroup => "Camp group",
        }
    }
}

/// Request body for both login endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for both change-password endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: String,
    pub old_password: String,
    pub new_password: String,
}

/// Query for the forgot-password endpoints and other lookups by email.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Request body for redeeming a reset token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

/// Stored credential material, never serialized.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub password_hash: String,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires_at: Option<String>,
}
