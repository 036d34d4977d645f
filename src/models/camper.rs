//! Camper model.

use serde::{Deserialize, Serialize};

/// An individual who books camps. Never carries password material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camper {
    pub full_name: String,
    pub email: String,
    pub telephone: String,
    pub governorate: String,
    pub created_at: String,
}

/// Request body for registering a camper.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCamperRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub governorate: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for updating a camper profile. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCamperRequest {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub governorate: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
}
