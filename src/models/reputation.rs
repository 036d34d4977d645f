//! Group reviews and camp comments.

use serde::{Deserialize, Serialize};

/// Highest score or rating a camper can give.
pub const MAX_SCORE: i64 = 5;

/// A camper's score for a camp group. One per (group, camper) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpReview {
    pub camp_group_email: String,
    pub camper_email: String,
    pub score: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for `POST /api/reviews`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    #[serde(default, alias = "campGrpEmail")]
    pub camp_group_email: String,
    #[serde(default)]
    pub camper_email: String,
    pub score: i64,
}

/// Query selecting a group's reviews.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupReviewQuery {
    #[serde(alias = "campGrpEmail")]
    pub camp_group_email: String,
}

/// Query selecting one camper's review of a group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CamperReviewQuery {
    #[serde(alias = "campGrpEmail")]
    pub camp_group_email: String,
    pub camper_email: String,
}

/// Average and count of a group's reviews.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub average_score: f64,
    pub review_count: i64,
}

/// A rated text comment on a camp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampComment {
    pub id: String,
    pub camp_id: String,
    pub camper_email: String,
    pub camper_full_name: String,
    pub rating: i64,
    pub comment: String,
    pub date: String,
}

/// Request body for `POST /api/camps/{id}/comments`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    #[serde(default)]
    pub camper_email: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

/// Average rating and count of a camp's comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentStats {
    pub average_rating: f64,
    pub comment_count: i64,
}

/// Reject scores outside `0..=MAX_SCORE`.
pub fn score_in_range(score: i64) -> bool {
    (0..=MAX_SCORE).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert!(score_in_range(0));
        assert!(score_in_range(5));
        assert!(!score_in_range(6));
        assert!(!score_in_range(-1));
    }

    #[test]
    fn test_review_request_accepts_legacy_field_name() {
        let req: ReviewRequest = serde_json::from_value(serde_json::json!({
            "campGrpEmail": "grp@x.com",
            "camperEmail": "u@x.com",
            "score": 4
        }))
        .unwrap();
        assert_eq!(req.camp_group_email, "grp@x.com");
    }
}
