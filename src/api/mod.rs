//! REST API module.
//!
//! Contains all API routes and handlers following the web client contract.

mod blogs;
mod camp_groups;
mod campers;
mod camps;
mod comments;
mod credentials;
mod extract;
mod forms;
mod reservations;
mod reviews;

pub use blogs::*;
pub use camp_groups::*;
pub use campers::*;
pub use camps::*;
pub use comments::*;
pub use reservations::*;
pub use reviews::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    pub status: StatusCode,
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status,
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a 200 response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(StatusCode::OK, data))
}

/// Create a 201 response.
pub fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(StatusCode::CREATED, data))
}

/// Plain acknowledgement payload.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Trimmed value of a required text field.
pub(crate) fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Optional field that, when sent, must not be blank.
pub(crate) fn present(value: Option<&str>, field: &str) -> Result<Option<String>, AppError> {
    value.map(|v| required(v, field)).transpose()
}

/// Required email field, normalised.
pub(crate) fn required_email(value: &str, field: &str) -> Result<String, AppError> {
    let email = crate::models::normalize_email(&required(value, field)?);
    if !email.contains('@') {
        return Err(AppError::Validation(format!("{} is not a valid email", field)));
    }
    Ok(email)
}
