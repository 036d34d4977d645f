//! Blog endpoints: submission, public reads and moderation.

use axum::extract::{Multipart, State};
use serde::Serialize;

use super::extract::{Path, Query};
use super::forms::UploadForm;
use super::{created, required_email, success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    parse_tags, BlogPost, BlogStatus, EmailQuery, NewBlogPost, LATEST_BLOGS_LIMIT,
};
use crate::storage::ImageFolder;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogLikes {
    pub likes_count: i64,
}

/// POST /api/blogs - Submit a post for moderation (multipart with `coverImage`).
pub async fn submit_blog(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<BlogPost> {
    let mut form = UploadForm::collect(multipart).await?;

    let campgrp_email = form.email("campgrpEmail")?;
    let title = form.text("title")?;
    let description = form.text("description")?;
    let article_text = form.text("articleText")?;
    let kind = form.optional_text("type");
    let creator_name = form.optional_text("creatorName");
    let tags = form
        .optional_text("tags")
        .map(|raw| parse_tags(&raw))
        .unwrap_or_default();
    let image = form.image("coverImage")?;

    if state.repo.get_camp_group(&campgrp_email).await?.is_none() {
        return Err(AppError::NotFound("Camp group not found".to_string()));
    }

    let cover_image = state.images.save(ImageFolder::BlogCover, &image).await?;

    let post = NewBlogPost {
        title,
        description,
        kind,
        creator_name,
        article_text,
        cover_image,
        tags,
        campgrp_email,
    };

    match state.repo.create_blog(&post).await {
        Ok(blog) => {
            tracing::info!("Blog {} submitted for review", blog.id);
            created(blog)
        }
        Err(e) => {
            state.images.discard(&post.cover_image).await;
            Err(e)
        }
    }
}

/// GET /blogs - All approved posts, newest first.
pub async fn list_blogs(State(state): State<AppState>) -> ApiResult<Vec<BlogPost>> {
    success(
        state
            .repo
            .list_blogs_by_status(BlogStatus::Approved, None)
            .await?,
    )
}

/// GET /latestblogs - The newest approved posts.
pub async fn latest_blogs(State(state): State<AppState>) -> ApiResult<Vec<BlogPost>> {
    success(
        state
            .repo
            .list_blogs_by_status(BlogStatus::Approved, Some(LATEST_BLOGS_LIMIT))
            .await?,
    )
}

/// GET /api/blogs/{id} - A single approved post.
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BlogPost> {
    let blog = state
        .repo
        .get_blog(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blog {} not found", id)))?;

    if blog.status != BlogStatus::Approved {
        return Err(AppError::Forbidden("Blog is not published".to_string()));
    }
    success(blog)
}

/// GET /api/blogs/campgrp?email= - A group's own posts in every status.
pub async fn list_group_blogs(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Vec<BlogPost>> {
    let email = required_email(&query.email, "email")?;
    success(state.repo.list_blogs_for_group(&email).await?)
}

/// PUT /api/blogs/{id}/cancel - Withdraw a post.
pub async fn cancel_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BlogPost> {
    success(state.repo.update_blog_status(&id, BlogStatus::Cancelled).await?)
}

/// POST /api/blogs/{id}/like - Like an approved post.
pub async fn like_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BlogLikes> {
    let likes_count = state.repo.like_blog(&id).await?;
    success(BlogLikes { likes_count })
}

// ==================== MODERATION ====================

/// PUT /api/admin/blogs/{id}/approve - Publish a pending post.
pub async fn approve_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<BlogPost> {
    let blog = state.repo.update_blog_status(&id, BlogStatus::Approved).await?;
    tracing::info!("Blog {} approved", blog.id);
    success(blog)
}

/// GET /api/admin/blogs/pending - Posts awaiting moderation, newest first.
pub async fn list_pending_blogs(State(state): State<AppState>) -> ApiResult<Vec<BlogPost>> {
    success(
        state
            .repo
            .list_blogs_by_status(BlogStatus::Pending, None)
            .await?,
    )
}
