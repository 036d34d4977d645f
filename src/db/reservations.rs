//! Reservation ledger operations.

use chrono::{Duration, Utc};
use sqlx::Row;

use super::repository::{now_timestamp, timestamp, Repository};
use crate::errors::AppError;
use crate::models::{Camp, GroupReservationStats, Reservation, ReserveRequest};

/// Window counted as "recent" in group statistics.
pub const RECENT_RESERVATION_DAYS: i64 = 30;

const RESERVATION_COLUMNS: &str = "r.reservation_id, r.camp_id, r.camp_name, r.date, r.name, \
     r.email, r.reservation_date, r.total_price, r.selected_extras, r.comments";

impl Repository {
    /// Book `camp` for the requesting camper.
    ///
    /// `UNIQUE(camp_id, email)` rejects a second booking by the same camper, even when
    /// two requests race. Capacity (`group_size`) is not enforced.
    pub async fn create_reservation(
        &self,
        camp: &Camp,
        request: &ReserveRequest,
    ) -> Result<Reservation, AppError> {
        let reservation_id = format!(
            "RES-{}",
            uuid::Uuid::new_v4().simple().to_string()[..12].to_uppercase()
        );
        let now = now_timestamp();
        let date = request.date.clone().unwrap_or_else(|| camp.date.clone());
        let extras = request
            .selected_extras
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));
        let extras_json = serde_json::to_string(&extras)?;

        sqlx::query(
            r#"INSERT INTO reservations (
                reservation_id, camp_id, camp_name, date, name, email, reservation_date,
                total_price, selected_extras, comments
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&reservation_id)
        .bind(&camp.id)
        .bind(&camp.title)
        .bind(&date)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&now)
        .bind(request.total_price)
        .bind(&extras_json)
        .bind(&request.comments)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::unique_violation(e, "You have already reserved this camp")
        })?;

        tracing::info!(
            reservation_id = %reservation_id,
            camp_id = %camp.id,
            "Reservation created"
        );

        Ok(Reservation {
            reservation_id,
            camp_id: camp.id.clone(),
            camp_name: camp.title.clone(),
            date,
            name: request.name.clone(),
            email: request.email.clone(),
            reservation_date: now,
            total_price: request.total_price,
            selected_extras: extras,
            comments: request.comments.clone(),
        })
    }

    /// Whether `email` already holds a reservation for `camp_id`.
    pub async fn has_reservation(&self, camp_id: &str, email: &str) -> Result<bool, AppError> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM reservations WHERE camp_id = ? AND email = ?) AS found",
        )
        .bind(camp_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        let found: i64 = row.get("found");
        Ok(found != 0)
    }

    /// Number of reservations for a camp.
    pub async fn count_reservations_for_camp(&self, camp_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM reservations WHERE camp_id = ?")
            .bind(camp_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("total"))
    }

    /// A camper's reservations, newest first.
    pub async fn list_reservations_for_camper(
        &self,
        email: &str,
    ) -> Result<Vec<Reservation>, AppError> {
        let sql = format!(
            "SELECT {} FROM reservations r WHERE r.email = ? ORDER BY r.reservation_date DESC, r.rowid DESC",
            RESERVATION_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(email)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(reservation_from_row).collect())
    }

    /// Reservations across every camp owned by a group, newest first.
    pub async fn list_reservations_for_group(
        &self,
        group_email: &str,
    ) -> Result<Vec<Reservation>, AppError> {
        let sql = format!(
            "SELECT {} FROM reservations r JOIN camps c ON c.id = r.camp_id \
             WHERE c.campgrp_email = ? ORDER BY r.reservation_date DESC, r.rowid DESC",
            RESERVATION_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(group_email)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(reservation_from_row).collect())
    }

    /// Totals over the ledger joined against the group's camps.
    pub async fn group_reservation_stats(
        &self,
        group_email: &str,
    ) -> Result<GroupReservationStats, AppError> {
        let cutoff = timestamp(Utc::now() - Duration::days(RECENT_RESERVATION_DAYS));

        let row = sqlx::query(
            r#"SELECT
                (SELECT COUNT(*) FROM camps WHERE campgrp_email = ?1) AS camp_count,
                COUNT(r.reservation_id) AS total_reservations,
                COALESCE(SUM(CASE WHEN r.reservation_date >= ?2 THEN 1 ELSE 0 END), 0)
                    AS recent_reservations,
                COALESCE(SUM(r.total_price), 0.0) AS total_revenue
            FROM reservations r
            JOIN camps c ON c.id = r.camp_id
            WHERE c.campgrp_email = ?1"#,
        )
        .bind(group_email)
        .bind(&cutoff)
        .fetch_one(&self.pool)
        .await?;

        Ok(GroupReservationStats {
            camp_count: row.get("camp_count"),
            total_reservations: row.get("total_reservations"),
            recent_reservations: row.get("recent_reservations"),
            total_revenue: row.get("total_revenue"),
        })
    }
}

fn reservation_from_row(row: &sqlx::sqlite::SqliteRow) -> Reservation {
    let extras: String = row.get("selected_extras");
    Reservation {
        reservation_id: row.get("reservation_id"),
        camp_id: row.get("camp_id"),
        camp_name: row.get("camp_name"),
        date: row.get("date"),
        name: row.get("name"),
        email: row.get("email"),
        reservation_date: row.get("reservation_date"),
        total_price: row.get("total_price"),
        selected_extras: serde_json::from_str(&extras).unwrap_or_else(|_| serde_json::json!({})),
        comments: row.get("comments"),
    }
}
