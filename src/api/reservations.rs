//! Reservation ledger endpoints.

use axum::extract::State;

use super::extract::{Json, Query};
use super::{created, required, required_email, success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    CampIdQuery, EmailQuery, GroupReservationStats, Reservation, ReservationCheck,
    ReservationCheckQuery, ReservationCount, ReserveRequest,
};
use crate::AppState;

/// POST /reserve - Book a camp.
pub async fn reserve(
    State(state): State<AppState>,
    Json(request): Json<ReserveRequest>,
) -> ApiResult<Reservation> {
    let request = ReserveRequest {
        camp_id: required(&request.camp_id, "campId")?,
        name: required(&request.name, "name")?,
        email: required_email(&request.email, "email")?,
        ..request
    };

    if !request.total_price.is_finite() || request.total_price < 0.0 {
        return Err(AppError::Validation(
            "totalPrice must not be negative".to_string(),
        ));
    }
    if let Some(extras) = &request.selected_extras {
        if !extras.is_object() {
            return Err(AppError::Validation(
                "selectedExtras must be an object".to_string(),
            ));
        }
    }

    let camp = state
        .repo
        .get_camp(&request.camp_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Camp {} not found", request.camp_id)))?;

    created(state.repo.create_reservation(&camp, &request).await?)
}

/// GET /check-reservation?campId=&email= - Whether the camper already booked the camp.
pub async fn check_reservation(
    State(state): State<AppState>,
    Query(query): Query<ReservationCheckQuery>,
) -> ApiResult<ReservationCheck> {
    let email = required_email(&query.email, "email")?;
    let reserved = state.repo.has_reservation(&query.camp_id, &email).await?;
    success(ReservationCheck { reserved })
}

/// GET /camp-reservations?campId= - Number of reservations for a camp.
pub async fn count_camp_reservations(
    State(state): State<AppState>,
    Query(query): Query<CampIdQuery>,
) -> ApiResult<ReservationCount> {
    let count = state.repo.count_reservations_for_camp(&query.camp_id).await?;
    success(ReservationCount {
        camp_id: query.camp_id,
        count,
    })
}

/// GET /api/reservations?email= - A camper's reservations.
pub async fn list_camper_reservations(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Vec<Reservation>> {
    let email = required_email(&query.email, "email")?;
    success(state.repo.list_reservations_for_camper(&email).await?)
}

/// GET /api/campgrp/reservations?email= - Reservations across a group's camps.
pub async fn list_group_reservations(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Vec<Reservation>> {
    let email = required_email(&query.email, "email")?;
    success(state.repo.list_reservations_for_group(&email).await?)
}

/// GET /api/campgrp/stats?email= - Reservation totals for a group.
pub async fn group_reservation_stats(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<GroupReservationStats> {
    let email = required_email(&query.email, "email")?;
    if state.repo.get_camp_group(&email).await?.is_none() {
        return Err(AppError::NotFound("Camp group not found".to_string()));
    }
    success(state.repo.group_reservation_stats(&email).await?)
}
