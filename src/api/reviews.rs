//! Camp group review endpoints.

use axum::extract::State;

use super::extract::{Json, Query};
use super::{required_email, success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    score_in_range, CamperReviewQuery, GroupReviewQuery, GrpReview, ReviewRequest, ReviewStats,
    MAX_SCORE,
};
use crate::AppState;

/// POST /api/reviews - Add or replace a camper's score for a group.
pub async fn upsert_review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> ApiResult<GrpReview> {
    let group_email = required_email(&request.camp_group_email, "campGroupEmail")?;
    let camper_email = required_email(&request.camper_email, "camperEmail")?;

    if !score_in_range(request.score) {
        return Err(AppError::Validation(format!(
            "score must be between 0 and {}",
            MAX_SCORE
        )));
    }

    if state.repo.get_camp_group(&group_email).await?.is_none() {
        return Err(AppError::NotFound("Camp group not found".to_string()));
    }
    if state.repo.get_camper(&camper_email).await?.is_none() {
        return Err(AppError::Forbidden(
            "Only registered campers can review groups".to_string(),
        ));
    }

    let review = state
        .repo
        .upsert_review(&group_email, &camper_email, request.score)
        .await?;
    success(review)
}

/// GET /api/reviews?campGroupEmail= - A group's reviews.
pub async fn list_group_reviews(
    State(state): State<AppState>,
    Query(query): Query<GroupReviewQuery>,
) -> ApiResult<Vec<GrpReview>> {
    let group_email = required_email(&query.camp_group_email, "campGroupEmail")?;
    success(state.repo.list_reviews_for_group(&group_email).await?)
}

/// GET /api/reviews/stats?campGroupEmail= - Average score and count.
pub async fn group_review_stats(
    State(state): State<AppState>,
    Query(query): Query<GroupReviewQuery>,
) -> ApiResult<ReviewStats> {
    let group_email = required_email(&query.camp_group_email, "campGroupEmail")?;
    success(state.repo.review_stats(&group_email).await?)
}

/// GET /api/reviews/check?campGroupEmail=&camperEmail= - A camper's existing review, if any.
pub async fn get_camper_review(
    State(state): State<AppState>,
    Query(query): Query<CamperReviewQuery>,
) -> ApiResult<Option<GrpReview>> {
    let group_email = required_email(&query.camp_group_email, "campGroupEmail")?;
    let camper_email = required_email(&query.camper_email, "camperEmail")?;
    success(state.repo.get_review(&group_email, &camper_email).await?)
}
