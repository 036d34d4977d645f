//! Camp comment endpoints.

use axum::extract::State;

use super::extract::{Json, Path};
use super::{created, required, required_email, success, ApiResult};
use crate::errors::AppError;
use crate::models::{score_in_range, AddCommentRequest, CampComment, CommentStats, MAX_SCORE};
use crate::AppState;

/// POST /api/camps/{id}/comments - Comment on a camp. Only registered campers may comment.
pub async fn add_comment(
    State(state): State<AppState>,
    Path(camp_id): Path<String>,
    Json(request): Json<AddCommentRequest>,
) -> ApiResult<CampComment> {
    let camper_email = required_email(&request.camper_email, "camperEmail")?;
    let comment = required(&request.comment, "comment")?;

    if !score_in_range(request.rating) {
        return Err(AppError::Validation(format!(
            "rating must be between 0 and {}",
            MAX_SCORE
        )));
    }

    let camper = state.repo.get_camper(&camper_email).await?.ok_or_else(|| {
        AppError::Forbidden("Only registered campers can comment".to_string())
    })?;

    if state.repo.get_camp(&camp_id).await?.is_none() {
        return Err(AppError::NotFound(format!("Camp {} not found", camp_id)));
    }

    let saved = state
        .repo
        .create_comment(&camp_id, &camper, request.rating, &comment)
        .await?;
    created(saved)
}

/// GET /api/camps/{id}/comments - Comments on a camp, newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(camp_id): Path<String>,
) -> ApiResult<Vec<CampComment>> {
    success(state.repo.list_comments_for_camp(&camp_id).await?)
}

/// GET /api/camps/{id}/comments/stats - Average rating and count.
pub async fn comment_stats(
    State(state): State<AppState>,
    Path(camp_id): Path<String>,
) -> ApiResult<CommentStats> {
    success(state.repo.comment_stats(&camp_id).await?)
}
