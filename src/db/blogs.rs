//! Blog post operations.

use sqlx::Row;

use super::repository::{now_timestamp, parse_json_array, Repository};
use crate::errors::AppError;
use crate::models::{BlogPost, BlogStatus, NewBlogPost};

const BLOG_COLUMNS: &str = "id, title, description, kind, creator_name, article_text, cover_image, \
     tags, campgrp_email, date, likes_count, status";

impl Repository {
    /// Store a submitted post awaiting moderation.
    pub async fn create_blog(&self, post: &NewBlogPost) -> Result<BlogPost, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_timestamp();
        let status = BlogStatus::Pending;
        let tags_json = serde_json::to_string(&post.tags)?;

        sqlx::query(
            r#"INSERT INTO blogs (
                id, title, description, kind, creator_name, article_text, cover_image, tags,
                campgrp_email, date, likes_count, status
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?)"#,
        )
        .bind(&id)
        .bind(&post.title)
        .bind(&post.description)
        .bind(&post.kind)
        .bind(&post.creator_name)
        .bind(&post.article_text)
        .bind(&post.cover_image)
        .bind(&tags_json)
        .bind(&post.campgrp_email)
        .bind(&now)
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        tracing::info!(blog_id = %id, group = %post.campgrp_email, "Blog post submitted");

        Ok(BlogPost {
            id,
            title: post.title.clone(),
            description: post.description.clone(),
            kind: post.kind.clone(),
            creator_name: post.creator_name.clone(),
            article_text: post.article_text.clone(),
            cover_image: post.cover_image.clone(),
            tags: post.tags.clone(),
            campgrp_email: post.campgrp_email.clone(),
            date: now,
            likes_count: 0,
            status,
        })
    }

    /// Get a post by ID regardless of status.
    pub async fn get_blog(&self, id: &str) -> Result<Option<BlogPost>, AppError> {
        let sql = format!("SELECT {} FROM blogs WHERE id = ?", BLOG_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(blog_from_row))
    }

    /// Posts in `status`, newest first, optionally capped.
    pub async fn list_blogs_by_status(
        &self,
        status: BlogStatus,
        limit: Option<i64>,
    ) -> Result<Vec<BlogPost>, AppError> {
        // SQLite treats a negative LIMIT as unbounded
        let sql = format!(
            "SELECT {} FROM blogs WHERE status = ? ORDER BY date DESC, rowid DESC LIMIT ?",
            BLOG_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(status.as_str())
            .bind(limit.unwrap_or(-1))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(blog_from_row).collect())
    }

    /// Every post written by a group, newest first.
    pub async fn list_blogs_for_group(&self, group_email: &str) -> Result<Vec<BlogPost>, AppError> {
        let sql = format!(
            "SELECT {} FROM blogs WHERE campgrp_email = ? ORDER BY date DESC, rowid DESC",
            BLOG_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(group_email)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(blog_from_row).collect())
    }

    /// Move a post to `next` if the moderation lifecycle allows it.
    pub async fn update_blog_status(&self, id: &str, next: BlogStatus) -> Result<BlogPost, AppError> {
        let existing = self
            .get_blog(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Blog {} not found", id)))?;

        if !existing.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition {
                from: existing.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        let result = sqlx::query("UPDATE blogs SET status = ? WHERE id = ? AND status = ?")
            .bind(next.as_str())
            .bind(id)
            .bind(existing.status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Blog status changed concurrently".to_string(),
            ));
        }

        tracing::info!(
            blog_id = %id,
            from = existing.status.as_str(),
            to = next.as_str(),
            "Blog status updated"
        );

        Ok(BlogPost {
            status: next,
            ..existing
        })
    }

    /// Add one like to an approved post and return the new count.
    pub async fn like_blog(&self, id: &str) -> Result<i64, AppError> {
        let row = sqlx::query(
            "UPDATE blogs SET likes_count = likes_count + 1 WHERE id = ? AND status = ? RETURNING likes_count",
        )
        .bind(id)
        .bind(BlogStatus::Approved.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(row.get("likes_count")),
            None => match self.get_blog(id).await? {
                Some(_) => Err(AppError::Forbidden("Blog post is not published".to_string())),
                None => Err(AppError::NotFound(format!("Blog {} not found", id))),
            },
        }
    }
}

fn blog_from_row(row: &sqlx::sqlite::SqliteRow) -> BlogPost {
    let tags: String = row.get("tags");
    let status: String = row.get("status");
    BlogPost {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        kind: row.get("kind"),
        creator_name: row.get("creator_name"),
        article_text: row.get("article_text"),
        cover_image: row.get("cover_image"),
        tags: parse_json_array(&tags),
        campgrp_email: row.get("campgrp_email"),
        date: row.get("date"),
        likes_count: row.get("likes_count"),
        status: BlogStatus::parse(&status).unwrap_or(BlogStatus::Pending),
    }
}
