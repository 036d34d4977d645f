//! Group reviews and camp comments.
//!
//! Averages are computed on every read; no running totals are stored.

use sqlx::Row;

use super::repository::{now_timestamp, Repository};
use crate::errors::AppError;
use crate::models::{Camper, CampComment, CommentStats, GrpReview, ReviewStats};

impl Repository {
    // ==================== GROUP REVIEWS ====================

    /// Insert or replace the score a camper gave a group. The latest score wins.
    pub async fn upsert_review(
        &self,
        group_email: &str,
        camper_email: &str,
        score: i64,
    ) -> Result<GrpReview, AppError> {
        let now = now_timestamp();

        let row = sqlx::query(
            r#"INSERT INTO grp_reviews (camp_group_email, camper_email, score, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (camp_group_email, camper_email)
            DO UPDATE SET score = excluded.score, updated_at = excluded.updated_at
            RETURNING camp_group_email, camper_email, score, created_at, updated_at"#,
        )
        .bind(group_email)
        .bind(camper_email)
        .bind(score)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;

        Ok(review_from_row(&row))
    }

    /// All reviews of a group, most recently updated first.
    pub async fn list_reviews_for_group(
        &self,
        group_email: &str,
    ) -> Result<Vec<GrpReview>, AppError> {
        let rows = sqlx::query(
            "SELECT camp_group_email, camper_email, score, created_at, updated_at \
             FROM grp_reviews WHERE camp_group_email = ? ORDER BY updated_at DESC",
        )
        .bind(group_email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(review_from_row).collect())
    }

    /// One camper's review of a group, if any.
    pub async fn get_review(
        &self,
        group_email: &str,
        camper_email: &str,
    ) -> Result<Option<GrpReview>, AppError> {
        let row = sqlx::query(
            "SELECT camp_group_email, camper_email, score, created_at, updated_at \
             FROM grp_reviews WHERE camp_group_email = ? AND camper_email = ?",
        )
        .bind(group_email)
        .bind(camper_email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(review_from_row))
    }

    /// Average score and count for a group; the average is 0 with no reviews.
    pub async fn review_stats(&self, group_email: &str) -> Result<ReviewStats, AppError> {
        let row = sqlx::query(
            "SELECT COALESCE(AVG(score), 0.0) AS average_score, COUNT(*) AS review_count \
             FROM grp_reviews WHERE camp_group_email = ?",
        )
        .bind(group_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(ReviewStats {
            average_score: row.get("average_score"),
            review_count: row.get("review_count"),
        })
    }

    // ==================== CAMP COMMENTS ====================

    /// Store a comment by a registered camper.
    pub async fn create_comment(
        &self,
        camp_id: &str,
        camper: &Camper,
        rating: i64,
        comment: &str,
    ) -> Result<CampComment, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_timestamp();

        sqlx::query(
            r#"INSERT INTO camp_comments (id, camp_id, camper_email, camper_full_name, rating, comment, date)
            VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(camp_id)
        .bind(&camper.email)
        .bind(&camper.full_name)
        .bind(rating)
        .bind(comment)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(CampComment {
            id,
            camp_id: camp_id.to_string(),
            camper_email: camper.email.clone(),
            camper_full_name: camper.full_name.clone(),
            rating,
            comment: comment.to_string(),
            date: now,
        })
    }

    /// Comments on a camp, newest first.
    pub async fn list_comments_for_camp(&self, camp_id: &str) -> Result<Vec<CampComment>, AppError> {
        let rows = sqlx::query(
            "SELECT id, camp_id, camper_email, camper_full_name, rating, comment, date \
             FROM camp_comments WHERE camp_id = ? ORDER BY date DESC, rowid DESC",
        )
        .bind(camp_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(comment_from_row).collect())
    }

    /// Average rating and count for a camp; the average is 0 with no comments.
    pub async fn comment_stats(&self, camp_id: &str) -> Result<CommentStats, AppError> {
        let row = sqlx::query(
            "SELECT COALESCE(AVG(rating), 0.0) AS average_rating, COUNT(*) AS comment_count \
             FROM camp_comments WHERE camp_id = ?",
        )
        .bind(camp_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(CommentStats {
            average_rating: row.get("average_rating"),
            comment_count: row.get("comment_count"),
        })
    }
}

fn review_from_row(row: &sqlx::sqlite::SqliteRow) -> GrpReview {
    GrpReview {
        camp_group_email: row.get("camp_group_email"),
        camper_email: row.get("camper_email"),
        score: row.get("score"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn comment_from_row(row: &sqlx::sqlite::SqliteRow) -> CampComment {
    CampComment {
        id: row.get("id"),
        camp_id: row.get("camp_id"),
        camper_email: row.get("camper_email"),
        camper_full_name: row.get("camper_full_name"),
        rating: row.get("rating"),
        comment: row.get("comment"),
        date: row.get("date"),
    }
}
