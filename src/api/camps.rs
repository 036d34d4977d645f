//! Camp catalog endpoints.

use axum::extract::{Multipart, State};

use super::extract::{Json, Path, Query};
use super::forms::UploadForm;
use super::{created, required_email, success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    Camp, CampListQuery, CampStatus, CampSummary, EmailQuery, NewCamp, UpdateCampStatusRequest,
};
use crate::storage::ImageFolder;
use crate::AppState;

/// POST /addCamp - Create a camp (multipart with `campPictureCover`).
///
/// An optional `status` field may open the camp as `draft`; the default is `pending`.
pub async fn create_camp(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Camp> {
    let mut form = UploadForm::collect(multipart).await?;

    let campgrp_email = form.email("campgrpEmail")?;
    let title = form.text("title")?;
    let emplacement = form.text("emplacement")?;
    let date = form.text("date")?;
    let duration = form.text("duration")?;
    let group_size: i64 = form.number("groupSize")?;
    let ages = form.text("ages")?;
    let google_map_url = form.text("googleMapUrl")?;
    let location_materials = form.text("locationMaterials")?;
    let description = form.text("description")?;
    let highlights = form.text("highlights")?;
    let prix: f64 = form.number("prix")?;
    let inclusion = form.text("inclusion")?;
    let status = match form.optional_text("status") {
        Some(raw) => parse_status(&raw)?,
        None => CampStatus::Pending,
    };
    if !status.is_initial() {
        return Err(AppError::Validation(format!(
            "A new camp cannot start as {}",
            status.as_str()
        )));
    }
    let image = form.image("campPictureCover")?;

    if group_size <= 0 {
        return Err(AppError::Validation(
            "groupSize must be greater than zero".to_string(),
        ));
    }
    if !prix.is_finite() || prix < 0.0 {
        return Err(AppError::Validation("prix must not be negative".to_string()));
    }

    if state.repo.get_camp_group(&campgrp_email).await?.is_none() {
        return Err(AppError::NotFound("Camp group not found".to_string()));
    }

    let camp_picture_cover = state.images.save(ImageFolder::CampCover, &image).await?;

    let camp = NewCamp {
        title,
        emplacement,
        date,
        duration,
        group_size,
        ages,
        google_map_url,
        location_materials,
        description,
        highlights,
        campgrp_email,
        camp_picture_cover,
        prix,
        inclusion,
        status,
    };

    match state.repo.create_camp(&camp).await {
        Ok(camp) => created(camp),
        Err(e) => {
            state.images.discard(&camp.camp_picture_cover).await;
            Err(e)
        }
    }
}

/// GET /allCamps - List camps, newest first, optionally filtered by `status`.
pub async fn list_camps(
    State(state): State<AppState>,
    Query(query): Query<CampListQuery>,
) -> ApiResult<Vec<CampSummary>> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(parse_status(raw)?),
        None => None,
    };

    success(state.repo.list_camps(status).await?)
}

/// GET /campsByCampgrp?email= - List a group's camps, newest first.
pub async fn list_camps_by_group(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Vec<CampSummary>> {
    let email = required_email(&query.email, "email")?;
    success(state.repo.list_camps_by_group(&email).await?)
}

/// GET /camp/{id} - Full camp record.
pub async fn get_camp(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Camp> {
    match state.repo.get_camp(&id).await? {
        Some(camp) => success(camp),
        None => Err(AppError::NotFound(format!("Camp {} not found", id))),
    }
}

/// PATCH /camps/{id} - Change a camp's status.
pub async fn update_camp_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCampStatusRequest>,
) -> ApiResult<Camp> {
    let next = parse_status(&request.status)?;
    success(state.repo.update_camp_status(&id, next).await?)
}

fn parse_status(raw: &str) -> Result<CampStatus, AppError> {
    CampStatus::parse(raw)
        .ok_or_else(|| AppError::Validation(format!("Unknown camp status: {}", raw)))
}
