//! Camper account endpoints.

use axum::extract::State;

use super::extract::{Json, Query};
use super::credentials;
use super::{created, present, required, required_email, success, ApiResult, Message};
use crate::auth;
use crate::errors::AppError;
use crate::models::{
    Camper, ChangePasswordRequest, EmailQuery, IdentityKind, LoginRequest,
    RegisterCamperRequest, ResetPasswordRequest, UpdateCamperRequest,
};
use crate::AppState;

/// POST /register - Register a camper.
pub async fn register_camper(
    State(state): State<AppState>,
    Json(request): Json<RegisterCamperRequest>,
) -> ApiResult<Camper> {
    let request = RegisterCamperRequest {
        full_name: required(&request.full_name, "fullName")?,
        email: required_email(&request.email, "email")?,
        telephone: required(&request.telephone, "telephone")?,
        governorate: required(&request.governorate, "governorate")?,
        password: request.password,
    };
    auth::validate_new_password(&request.password)?;

    let hash = auth::hash_password(&request.password, state.config.bcrypt_cost)?;
    let camper = state.repo.create_camper(&request, &hash).await?;

    tracing::info!("Camper registered");
    created(camper)
}

/// POST /login - Camper login.
pub async fn login_camper(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Camper> {
    let email = credentials::verify_login(&state, IdentityKind::Camper, &request).await?;
    let camper = state
        .repo
        .get_camper(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Email or password is incorrect".to_string()))?;

    success(camper)
}

/// GET /userinfo?email= - Camper profile.
pub async fn get_camper_info(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Camper> {
    let email = required_email(&query.email, "email")?;
    match state.repo.get_camper(&email).await? {
        Some(camper) => success(camper),
        None => Err(AppError::NotFound("User not found".to_string())),
    }
}

/// POST /updateProfile - Update a camper profile.
pub async fn update_camper_profile(
    State(state): State<AppState>,
    Json(request): Json<UpdateCamperRequest>,
) -> ApiResult<Camper> {
    let request = UpdateCamperRequest {
        email: required_email(&request.email, "email")?,
        full_name: present(request.full_name.as_deref(), "fullName")?,
        governorate: present(request.governorate.as_deref(), "governorate")?,
        telephone: present(request.telephone.as_deref(), "telephone")?,
    };

    let camper = state.repo.update_camper(&request).await?;
    success(camper)
}

/// POST /changePassword - Change a camper password.
pub async fn change_camper_password(
    State(state): State<AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> ApiResult<Message> {
    credentials::change_password(&state, IdentityKind::Camper, &request).await?;
    success(Message::new("Password changed successfully"))
}

/// GET /forgotPassword?email= - Mail a camper a reset link.
pub async fn forgot_camper_password(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Message> {
    credentials::forgot_password(&state, IdentityKind::Camper, &query.email).await?;
    success(Message::new("Password reset instructions sent"))
}

/// POST /resetPassword - Redeem a camper reset token.
pub async fn reset_camper_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> ApiResult<Message> {
    credentials::reset_password(&state, IdentityKind::Camper, &request).await?;
    success(Message::new("Password reset successfully"))
}
