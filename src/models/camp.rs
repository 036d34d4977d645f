//! Camp model and its status lifecycle.

use serde::{Deserialize, Serialize};

/// Lifecycle of a camp listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CampStatus {
    Draft,
    Pending,
    Approved,
    Cancelled,
}

impl CampStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampStatus::Draft => "draft",
            CampStatus::Pending => "pending",
            CampStatus::Approved => "approved",
            CampStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Some(CampStatus::Draft),
            "pending" => Some(CampStatus::Pending),
            "approved" => Some(CampStatus::Approved),
            "cancelled" | "canceled" => Some(CampStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether a new camp may be created in this status.
    pub fn is_initial(&self) -> bool {
        matches!(self, CampStatus::Draft | CampStatus::Pending)
    }

    /// Whether a camp may move from `self` to `next`. Re-applying the current status is allowed.
    pub fn can_transition_to(&self, next: CampStatus) -> bool {
        use CampStatus::*;
        *self == next
            || matches!(
                (self, next),
                (Draft, Pending)
                    | (Draft, Cancelled)
                    | (Pending, Approved)
                    | (Pending, Cancelled)
                    | (Approved, Cancelled)
            )
    }
}

/// A bookable trip listing owned by a camp group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camp {
    pub id: String,
    pub title: String,
    pub emplacement: String,
    pub date: String,
    pub duration: String,
    pub group_size: i64,
    pub ages: String,
    pub google_map_url: String,
    pub location_materials: String,
    pub description: String,
    pub highlights: String,
    pub campgrp_email: String,
    pub camp_picture_cover: String,
    pub prix: f64,
    pub inclusion: String,
    pub status: CampStatus,
    /// Average comment rating, computed on read
    pub review_score: f64,
    pub created_at: String,
}

/// Listing projection of a camp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampSummary {
    pub id: String,
    pub title: String,
    pub emplacement: String,
    pub date: String,
    pub duration: String,
    pub prix: f64,
    pub camp_picture_cover: String,
    pub campgrp_email: String,
    pub status: CampStatus,
    pub review_score: f64,
}

/// Validated camp data, assembled from the multipart form.
#[derive(Debug, Clone)]
pub struct NewCamp {
    pub title: String,
    pub emplacement: String,
    pub date: String,
    pub duration: String,
    pub group_size: i64,
    pub ages: String,
    pub google_map_url: String,
    pub location_materials: String,
    pub description: String,
    pub highlights: String,
    pub campgrp_email: String,
    pub camp_picture_cover: String,
    pub prix: f64,
    pub inclusion: String,
    pub status: CampStatus,
}

/// Request body for `PATCH /camps/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCampStatusRequest {
    pub status: String,
}

/// Optional filter for `GET /allCamps`.
#[derive(Debug, Clone, Deserialize)]
pub struct CampListQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(CampStatus::parse("Approved"), Some(CampStatus::Approved));
        assert_eq!(CampStatus::parse("canceled"), Some(CampStatus::Cancelled));
        assert_eq!(CampStatus::parse("open"), None);
    }

    #[test]
    fn test_cancelled_is_terminal() {
        for next in [CampStatus::Draft, CampStatus::Pending, CampStatus::Approved] {
            assert!(!CampStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_allowed_transitions() {
        assert!(CampStatus::Pending.can_transition_to(CampStatus::Approved));
        assert!(CampStatus::Approved.can_transition_to(CampStatus::Cancelled));
        assert!(CampStatus::Approved.can_transition_to(CampStatus::Approved));
        assert!(!CampStatus::Approved.can_transition_to(CampStatus::Pending));
        assert!(!CampStatus::Pending.can_transition_to(CampStatus::Draft));
    }

    #[test]
    fn test_initial_statuses() {
        assert!(CampStatus::Draft.is_initial());
        assert!(CampStatus::Pending.is_initial());
        assert!(!CampStatus::Approved.is_initial());
        assert!(!CampStatus::Cancelled.is_initial());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&CampStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
