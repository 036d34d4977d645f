//! Camper and camp group accounts.

use sqlx::Row;

use super::repository::{now_timestamp, Repository};
use crate::errors::AppError;
use crate::models::{
    Camper, CampGroup, IdentityKind, NewCampGroup, RegisterCamperRequest, StoredCredentials,
    UpdateCampGroupRequest, UpdateCamperRequest,
};

const EMAIL_TAKEN: &str = "Email already exists";

const CAMPER_COLUMNS: &str = "email, full_name, telephone, governorate, created_at";

const CAMP_GROUP_COLUMNS: &str = "email, name, telephone, governorate, chef_name, picture, \
     creation_date, social_media_link, comments, created_at";

impl Repository {
    // ==================== SHARED ====================

    /// Load the password hash and reset token state for an account.
    pub async fn get_credentials(
        &self,
        kind: IdentityKind,
        email: &str,
    ) -> Result<Option<StoredCredentials>, AppError> {
        let sql = format!(
            "SELECT password_hash, reset_token_hash, reset_token_expires_at FROM {} WHERE email = ?",
            kind.table()
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| StoredCredentials {
            password_hash: r.get("password_hash"),
            reset_token_hash: r.get("reset_token_hash"),
            reset_token_expires_at: r.get("reset_token_expires_at"),
        }))
    }

    /// Replace the password hash and invalidate any outstanding reset token.
    pub async fn set_password_hash(
        &self,
        kind: IdentityKind,
        email: &str,
        password_hash: &str,
    ) -> Result<(), AppError> {
        let sql = format!(
            "UPDATE {} SET password_hash = ?, reset_token_hash = NULL, reset_token_expires_at = NULL WHERE email = ?",
            kind.table()
        );
        let result = sqlx::query(&sql)
            .bind(password_hash)
            .bind(email)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} not found", kind.label())));
        }
        Ok(())
    }

    /// Store a reset token hash, replacing any earlier one.
    pub async fn store_reset_token(
        &self,
        kind: IdentityKind,
        email: &str,
        token_hash: &str,
        expires_at: &str,
    ) -> Result<(), AppError> {
        let sql = format!(
            "UPDATE {} SET reset_token_hash = ?, reset_token_expires_at = ? WHERE email = ?",
            kind.table()
        );
        let result = sqlx::query(&sql)
            .bind(token_hash)
            .bind(expires_at)
            .bind(email)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} not found", kind.label())));
        }
        Ok(())
    }

    /// Set a new password only if the reset token hash is still the one that was verified.
    ///
    /// Returns `false` when the token was consumed or replaced in the meantime.
    pub async fn redeem_reset_token(
        &self,
        kind: IdentityKind,
        email: &str,
        verified_token_hash: &str,
        new_password_hash: &str,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET password_hash = ?, reset_token_hash = NULL, reset_token_expires_at = NULL \
             WHERE email = ? AND reset_token_hash = ?",
            kind.table()
        );
        let result = sqlx::query(&sql)
            .bind(new_password_hash)
            .bind(email)
            .bind(verified_token_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    // ==================== CAMPERS ====================

    /// Register a camper. The email must be unused by both account kinds.
    pub async fn create_camper(
        &self,
        request: &RegisterCamperRequest,
        password_hash: &str,
    ) -> Result<Camper, AppError> {
        let now = now_timestamp();
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO identities (email, kind, created_at) VALUES (?, ?, ?)")
            .bind(&request.email)
            .bind(IdentityKind::Camper.as_str())
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::unique_violation(e, EMAIL_TAKEN))?;

        sqlx::query(
            "INSERT INTO campers (email, full_name, telephone, governorate, password_hash, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&request.email)
        .bind(&request.full_name)
        .bind(&request.telephone)
        .bind(&request.governorate)
        .bind(password_hash)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::unique_violation(e, EMAIL_TAKEN))?;

        tx.commit().await?;

        Ok(Camper {
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            telephone: request.telephone.clone(),
            governorate: request.governorate.clone(),
            created_at: now,
        })
    }

    /// Get a camper profile by email.
    pub async fn get_camper(&self, email: &str) -> Result<Option<Camper>, AppError> {
        let sql = format!("SELECT {} FROM campers WHERE email = ?", CAMPER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(camper_from_row))
    }

    /// Update camper profile fields that are present in the request.
    pub async fn update_camper(&self, request: &UpdateCamperRequest) -> Result<Camper, AppError> {
        let existing = self
            .get_camper(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let full_name = request.full_name.clone().unwrap_or(existing.full_name);
        let governorate = request.governorate.clone().unwrap_or(existing.governorate);
        let telephone = request.telephone.clone().unwrap_or(existing.telephone);

        sqlx::query(
            "UPDATE campers SET full_name = ?, governorate = ?, telephone = ? WHERE email = ?",
        )
        .bind(&full_name)
        .bind(&governorate)
        .bind(&telephone)
        .bind(&request.email)
        .execute(&self.pool)
        .await?;

        Ok(Camper {
            full_name,
            email: existing.email,
            telephone,
            governorate,
            created_at: existing.created_at,
        })
    }

    // ==================== CAMP GROUPS ====================

    /// Register a camp group. The email must be unused by both account kinds.
    pub async fn create_camp_group(
        &self,
        group: &NewCampGroup,
        password_hash: &str,
    ) -> Result<CampGroup, AppError> {
        let now = now_timestamp();
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO identities (email, kind, created_at) VALUES (?, ?, ?)")
            .bind(&group.email)
            .bind(IdentityKind::CampGroup.as_str())
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::unique_violation(e, EMAIL_TAKEN))?;

        sqlx::query(
            r#"INSERT INTO camp_groups (
                email, name, telephone, governorate, chef_name, picture, creation_date,
                social_media_link, comments, password_hash, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&group.email)
        .bind(&group.name)
        .bind(&group.telephone)
        .bind(&group.governorate)
        .bind(&group.chef_name)
        .bind(&group.picture)
        .bind(&group.creation_date)
        .bind(&group.social_media_link)
        .bind(&group.comments)
        .bind(password_hash)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::unique_violation(e, EMAIL_TAKEN))?;

        tx.commit().await?;

        Ok(CampGroup {
            name: group.name.clone(),
            email: group.email.clone(),
            telephone: group.telephone.clone(),
            governorate: group.governorate.clone(),
            chef_name: group.chef_name.clone(),
            picture: group.picture.clone(),
            creation_date: group.creation_date.clone(),
            social_media_link: group.social_media_link.clone(),
            comments: group.comments.clone(),
            created_at: now,
        })
    }

    /// Get a camp group profile by email.
    pub async fn get_camp_group(&self, email: &str) -> Result<Option<CampGroup>, AppError> {
        let sql = format!(
            "SELECT {} FROM camp_groups WHERE email = ?",
            CAMP_GROUP_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(camp_group_from_row))
    }

    /// List all camp groups, newest first.
    pub async fn list_camp_groups(&self) -> Result<Vec<CampGroup>, AppError> {
        let sql = format!(
            "SELECT {} FROM camp_groups ORDER BY created_at DESC, rowid DESC",
            CAMP_GROUP_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(camp_group_from_row).collect())
    }

    /// Update camp group profile fields that are present in the request.
    pub async fn update_camp_group(
        &self,
        request: &UpdateCampGroupRequest,
    ) -> Result<CampGroup, AppError> {
        let existing = self
            .get_camp_group(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("Camp group not found".to_string()))?;

        let name = request.name.clone().unwrap_or(existing.name);
        let telephone = request.telephone.clone().unwrap_or(existing.telephone);
        let governorate = request.governorate.clone().unwrap_or(existing.governorate);
        let chef_name = request.chef_name.clone().unwrap_or(existing.chef_name);
        let creation_date = request
            .creation_date
            .clone()
            .unwrap_or(existing.creation_date);
        let social_media_link = request
            .social_media_link
            .clone()
            .or(existing.social_media_link);
        let comments = request.comments.clone().or(existing.comments);

        sqlx::query(
            r#"UPDATE camp_groups SET
                name = ?, telephone = ?, governorate = ?, chef_name = ?, creation_date = ?,
                social_media_link = ?, comments = ?
            WHERE email = ?"#,
        )
        .bind(&name)
        .bind(&telephone)
        .bind(&governorate)
        .bind(&chef_name)
        .bind(&creation_date)
        .bind(&social_media_link)
        .bind(&comments)
        .bind(&request.email)
        .execute(&self.pool)
        .await?;

        Ok(CampGroup {
            name,
            email: existing.email,
            telephone,
            governorate,
            chef_name,
            picture: existing.picture,
            creation_date,
            social_media_link,
            comments,
            created_at: existing.created_at,
        })
    }
}

fn camper_from_row(row: &sqlx::sqlite::SqliteRow) -> Camper {
    Camper {
        full_name: row.get("full_name"),
        email: row.get("email"),
        telephone: row.get("telephone"),
        governorate: row.get("governorate"),
        created_at: row.get("created_at"),
    }
}

fn camp_group_from_row(row: &sqlx::sqlite::SqliteRow) -> CampGroup {
    CampGroup {
        name: row.get("name"),
        email: row.get("email"),
        telephone: row.get("telephone"),
        governorate: row.get("governorate"),
        chef_name: row.get("chef_name"),
        picture: row.get("picture"),
        creation_date: row.get("creation_date"),
        social_media_link: row.get("social_media_link"),
        comments: row.get("comments"),
        created_at: row.get("created_at"),
    }
}
