//! Camp group account endpoints.

use axum::extract::{Multipart, State};

use super::extract::{Json, Query};
use super::credentials;
use super::forms::UploadForm;
use super::{created, present, required_email, success, ApiResult, Message};
use crate::auth;
use crate::errors::AppError;
use crate::models::{
    CampGroup, ChangePasswordRequest, EmailQuery, IdentityKind, LoginRequest, NewCampGroup,
    ResetPasswordRequest, UpdateCampGroupRequest,
};
use crate::storage::ImageFolder;
use crate::AppState;

/// POST /registerCampgrp - Register a camp group (multipart with `picture`).
pub async fn register_camp_group(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<CampGroup> {
    let mut form = UploadForm::collect(multipart).await?;

    let password = form.secret("password")?;
    auth::validate_new_password(&password)?;
    let name = form.text("name")?;
    let email = form.email("email")?;
    let telephone = form.text("telephone")?;
    let governorate = form.text("governorate")?;
    let chef_name = form.text("chefName")?;
    let creation_date = form.text("creationDate")?;
    let social_media_link = form.optional_text("socialMediaLink");
    let comments = form.optional_text("comments");
    let image = form.image("picture")?;

    let hash = auth::hash_password(&password, state.config.bcrypt_cost)?;
    let picture = state.images.save(ImageFolder::GroupPicture, &image).await?;

    let group = NewCampGroup {
        name,
        email,
        telephone,
        governorate,
        chef_name,
        picture,
        creation_date,
        social_media_link,
        comments,
    };

    match state.repo.create_camp_group(&group, &hash).await {
        Ok(group) => {
            tracing::info!("Camp group registered");
            created(group)
        }
        Err(e) => {
            state.images.discard(&group.picture).await;
            Err(e)
        }
    }
}

/// POST /loginCampgrp - Camp group login.
pub async fn login_camp_group(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<CampGroup> {
    let email = credentials::verify_login(&state, IdentityKind::CampGroup, &request).await?;
    let group = state
        .repo
        .get_camp_group(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Email or password is incorrect".to_string()))?;

    success(group)
}

/// GET /campgrpinfo?email= - Camp group profile.
pub async fn get_camp_group_info(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<CampGroup> {
    let email = required_email(&query.email, "email")?;
    match state.repo.get_camp_group(&email).await? {
        Some(group) => success(group),
        None => Err(AppError::NotFound("Camp group not found".to_string())),
    }
}

/// GET /allCampgrps - Public list of camp groups.
pub async fn list_camp_groups(State(state): State<AppState>) -> ApiResult<Vec<CampGroup>> {
    success(state.repo.list_camp_groups().await?)
}

/// POST /updateProfileCampgrp - Update a camp group profile.
pub async fn update_camp_group_profile(
    State(state): State<AppState>,
    Json(request): Json<UpdateCampGroupRequest>,
) -> ApiResult<CampGroup> {
    let request = UpdateCampGroupRequest {
        email: required_email(&request.email, "email")?,
        name: present(request.name.as_deref(), "name")?,
        telephone: present(request.telephone.as_deref(), "telephone")?,
        governorate: present(request.governorate.as_deref(), "governorate")?,
        chef_name: present(request.chef_name.as_deref(), "chefName")?,
        creation_date: present(request.creation_date.as_deref(), "creationDate")?,
        ..request
    };

    let group = state.repo.update_camp_group(&request).await?;
    success(group)
}

/// POST /changePasswordCampgrp - Change a camp group password.
pub async fn change_camp_group_password(
    State(state): State<AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> ApiResult<Message> {
    credentials::change_password(&state, IdentityKind::CampGroup, &request).await?;
    success(Message::new("Password changed successfully"))
}

/// GET /forgotPasswordCampgrp?email= - Mail a camp group a reset link.
pub async fn forgot_camp_group_password(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Message> {
    credentials::forgot_password(&state, IdentityKind::CampGroup, &query.email).await?;
    success(Message::new("Password reset instructions sent"))
}

/// POST /resetPasswordCampgrp - Redeem a camp group reset token.
pub async fn reset_camp_group_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> ApiResult<Message> {
    credentials::reset_password(&state, IdentityKind::CampGroup, &request).await?;
    success(Message::new("Password reset successfully"))
}
