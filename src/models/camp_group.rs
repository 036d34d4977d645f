//! Camp group model.

use serde::{Deserialize, Serialize};

/// An organisation that publishes camps and blog posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampGroup {
    pub name: String,
    pub email: String,
    pub telephone: String,
    pub governorate: String,
    pub chef_name: String,
    pub picture: String,
    pub creation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_at: String,
}

/// Validated registration data, assembled from the multipart form.
#[derive(Debug, Clone)]
pub struct NewCampGroup {
    pub name: String,
    pub email: String,
    pub telephone: String,
    pub governorate: String,
    pub chef_name: String,
    pub picture: String,
    pub creation_date: String,
    pub social_media_link: Option<String>,
    pub comments: Option<String>,
}

/// Request body for updating a group profile. Absent fields are left unchanged.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampGroupRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
    #[serde(default)]
    pub governorate: Option<String>,
    #[serde(default)]
    pub chef_name: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub social_media_link: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
}
