//! Camp catalog operations.

use sqlx::Row;

use super::repository::{now_timestamp, Repository};
use crate::errors::AppError;
use crate::models::{Camp, CampStatus, CampSummary, NewCamp};

// Review score is the average comment rating, never stored.
const CAMP_SELECT: &str = r#"SELECT c.id, c.title, c.emplacement, c.date, c.duration, c.group_size,
        c.ages, c.google_map_url, c.location_materials, c.description, c.highlights,
        c.campgrp_email, c.camp_picture_cover, c.prix, c.inclusion, c.status, c.created_at,
        COALESCE((SELECT AVG(cc.rating) FROM camp_comments cc WHERE cc.camp_id = c.id), 0.0)
            AS review_score
    FROM camps c"#;

impl Repository {
    /// Persist a new camp in its initial state (`draft` or `pending`).
    pub async fn create_camp(&self, camp: &NewCamp) -> Result<Camp, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_timestamp();
        let status = camp.status;

        sqlx::query(
            r#"INSERT INTO camps (
                id, title, emplacement, date, duration, group_size, ages, google_map_url,
                location_materials, description, highlights, campgrp_email, camp_picture_cover,
                prix, inclusion, status, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(&camp.title)
        .bind(&camp.emplacement)
        .bind(&camp.date)
        .bind(&camp.duration)
        .bind(camp.group_size)
        .bind(&camp.ages)
        .bind(&camp.google_map_url)
        .bind(&camp.location_materials)
        .bind(&camp.description)
        .bind(&camp.highlights)
        .bind(&camp.campgrp_email)
        .bind(&camp.camp_picture_cover)
        .bind(camp.prix)
        .bind(&camp.inclusion)
        .bind(status.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        tracing::info!(camp_id = %id, group = %camp.campgrp_email, "Camp created");

        Ok(Camp {
            id,
            title: camp.title.clone(),
            emplacement: camp.emplacement.clone(),
            date: camp.date.clone(),
            duration: camp.duration.clone(),
            group_size: camp.group_size,
            ages: camp.ages.clone(),
            google_map_url: camp.google_map_url.clone(),
            location_materials: camp.location_materials.clone(),
            description: camp.description.clone(),
            highlights: camp.highlights.clone(),
            campgrp_email: camp.campgrp_email.clone(),
            camp_picture_cover: camp.camp_picture_cover.clone(),
            prix: camp.prix,
            inclusion: camp.inclusion.clone(),
            status,
            review_score: 0.0,
            created_at: now,
        })
    }

    /// Get a camp by ID.
    pub async fn get_camp(&self, id: &str) -> Result<Option<Camp>, AppError> {
        let sql = format!("{} WHERE c.id = ?", CAMP_SELECT);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(camp_from_row))
    }

    /// List camps newest first, optionally restricted to one status.
    pub async fn list_camps(&self, status: Option<CampStatus>) -> Result<Vec<CampSummary>, AppError> {
        let rows = match status {
            Some(status) => {
                let sql = format!(
                    "{} WHERE c.status = ? ORDER BY c.created_at DESC, c.rowid DESC",
                    CAMP_SELECT
                );
                sqlx::query(&sql)
                    .bind(status.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("{} ORDER BY c.created_at DESC, c.rowid DESC", CAMP_SELECT);
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };

        Ok(rows.iter().map(|r| camp_from_row(r).into()).collect())
    }

    /// List a group's camps newest first.
    pub async fn list_camps_by_group(&self, email: &str) -> Result<Vec<CampSummary>, AppError> {
        let sql = format!(
            "{} WHERE c.campgrp_email = ? ORDER BY c.created_at DESC, c.rowid DESC",
            CAMP_SELECT
        );
        let rows = sqlx::query(&sql)
            .bind(email)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|r| camp_from_row(r).into()).collect())
    }

    /// Move a camp to `next` if the lifecycle allows it.
    ///
    /// The update is conditional on the status that was validated, so a concurrent
    /// change is reported as a conflict rather than overwritten.
    pub async fn update_camp_status(&self, id: &str, next: CampStatus) -> Result<Camp, AppError> {
        let existing = self
            .get_camp(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Camp {} not found", id)))?;

        if !existing.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition {
                from: existing.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        let result = sqlx::query("UPDATE camps SET status = ? WHERE id = ? AND status = ?")
            .bind(next.as_str())
            .bind(id)
            .bind(existing.status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Camp status changed concurrently".to_string(),
            ));
        }

        tracing::info!(
            camp_id = %id,
            from = existing.status.as_str(),
            to = next.as_str(),
            "Camp status updated"
        );

        Ok(Camp {
            status: next,
            ..existing
        })
    }
}

impl From<Camp> for CampSummary {
    fn from(camp: Camp) -> Self {
        CampSummary {
            id: camp.id,
            title: camp.title,
            emplacement: camp.emplacement,
            date: camp.date,
            duration: camp.duration,
            prix: camp.prix,
            camp_picture_cover: camp.camp_picture_cover,
            campgrp_email: camp.campgrp_email,
            status: camp.status,
            review_score: camp.review_score,
        }
    }
}

fn camp_from_row(row: &sqlx::sqlite::SqliteRow) -> Camp {
    let status: String = row.get("status");
    Camp {
        id: row.get("id"),
        title: row.get("title"),
        emplacement: row.get("emplacement"),
        date: row.get("date"),
        duration: row.get("duration"),
        group_size: row.get("group_size"),
        ages: row.get("ages"),
        google_map_url: row.get("google_map_url"),
        location_materials: row.get("location_materials"),
        description: row.get("description"),
        highlights: row.get("highlights"),
        campgrp_email: row.get("campgrp_email"),
        camp_picture_cover: row.get("camp_picture_cover"),
        prix: row.get("prix"),
        inclusion: row.get("inclusion"),
        status: CampStatus::parse(&status).unwrap_or(CampStatus::Pending),
        review_score: row.get("review_score"),
        created_at: row.get("created_at"),
    }
}
