//! Blog post model and its moderation lifecycle.

use serde::{Deserialize, Serialize};

/// Number of posts served by `GET /latestblogs`.
pub const LATEST_BLOGS_LIMIT: i64 = 3;

/// Moderation state of a post. Only `Approved` posts are public.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Pending,
    Approved,
    Cancelled,
}

impl BlogStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogStatus::Pending => "pending",
            BlogStatus::Approved => "approved",
            BlogStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BlogStatus::Pending),
            "approved" => Some(BlogStatus::Approved),
            "cancelled" => Some(BlogStatus::Cancelled),
            _ => None,
        }
    }

    /// Cancelled is terminal; nothing moves back to pending.
    pub fn can_transition_to(&self, next: BlogStatus) -> bool {
        matches!(
            (self, next),
            (BlogStatus::Pending, BlogStatus::Approved)
                | (BlogStatus::Pending, BlogStatus::Cancelled)
                | (BlogStatus::Approved, BlogStatus::Cancelled)
        )
    }
}

/// A blog post written by a camp group.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    pub article_text: String,
    pub cover_image: String,
    pub tags: Vec<String>,
    pub campgrp_email: String,
    pub date: String,
    pub likes_count: i64,
    pub status: BlogStatus,
}

/// Validated post data, assembled from the multipart form.
#[derive(Debug, Clone)]
pub struct NewBlogPost {
    pub title: String,
    pub description: String,
    pub kind: Option<String>,
    pub creator_name: Option<String>,
    pub article_text: String,
    pub cover_image: String,
    pub tags: Vec<String>,
    pub campgrp_email: String,
}

/// Split a comma separated tag field, dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_transitions() {
        assert!(BlogStatus::Pending.can_transition_to(BlogStatus::Approved));
        assert!(BlogStatus::Pending.can_transition_to(BlogStatus::Cancelled));
        assert!(!BlogStatus::Cancelled.can_transition_to(BlogStatus::Pending));
        assert!(!BlogStatus::Cancelled.can_transition_to(BlogStatus::Approved));
        assert!(!BlogStatus::Approved.can_transition_to(BlogStatus::Pending));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("hiking, beach,, ,desert"), vec!["hiking", "beach", "desert"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let post = BlogPost {
            id: "1".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            kind: Some("story".to_string()),
            creator_name: None,
            article_text: "a".to_string(),
            cover_image: "/uploads/blogimg/x.png".to_string(),
            tags: vec![],
            campgrp_email: "g@x.com".to_string(),
            date: "2024-01-01T00:00:00.000000Z".to_string(),
            likes_count: 0,
            status: BlogStatus::Pending,
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["type"], "story");
        assert_eq!(value["status"], "pending");
        assert!(value.get("creatorName").is_none());
    }
}
