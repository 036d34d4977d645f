//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all application data. Uniqueness rules
//! (emails, reservations per camp and camper, reviews per group and camper)
//! live in the schema so concurrent requests cannot slip past them.

mod blogs;
mod camps;
mod identity;
mod repository;
mod reputation;
mod reservations;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // One row per email across both account kinds
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS identities (
            email TEXT PRIMARY KEY,
            kind TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS campers (
            email TEXT PRIMARY KEY REFERENCES identities(email),
            full_name TEXT NOT NULL,
            telephone TEXT NOT NULL,
            governorate TEXT NOT NULL,
            password_hash TEXT NOT NULL,
            reset_token_hash TEXT,
            reset_token_expires_at TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS camp_groups (
            email TEXT PRIMARY KEY REFERENCES identities(email),
            name TEXT NOT NULL,
            telephone TEXT NOT NULL,
            governorate TEXT NOT NULL,
            chef_name TEXT NOT NULL,
            picture TEXT NOT NULL,
            creation_date TEXT NOT NULL,
            social_media_link TEXT,
            comments TEXT,
            password_hash TEXT NOT NULL,
            reset_token_hash TEXT,
            reset_token_expires_at TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS camps (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            emplacement TEXT NOT NULL,
            date TEXT NOT NULL,
            duration TEXT NOT NULL,
            group_size INTEGER NOT NULL,
            ages TEXT NOT NULL,
            google_map_url TEXT NOT NULL,
            location_materials TEXT NOT NULL,
            description TEXT NOT NULL,
            highlights TEXT NOT NULL,
            campgrp_email TEXT NOT NULL REFERENCES camp_groups(email),
            camp_picture_cover TEXT NOT NULL,
            prix REAL NOT NULL,
            inclusion TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            reservation_id TEXT PRIMARY KEY,
            camp_id TEXT NOT NULL REFERENCES camps(id),
            camp_name TEXT NOT NULL,
            date TEXT NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            reservation_date TEXT NOT NULL,
            total_price REAL NOT NULL,
            selected_extras TEXT NOT NULL,
            comments TEXT,
            UNIQUE (camp_id, email)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS grp_reviews (
            camp_group_email TEXT NOT NULL,
            camper_email TEXT NOT NULL,
            score INTEGER NOT NULL CHECK (score BETWEEN 0 AND 5),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (camp_group_email, camper_email)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS camp_comments (
            id TEXT PRIMARY KEY,
            camp_id TEXT NOT NULL REFERENCES camps(id),
            camper_email TEXT NOT NULL REFERENCES campers(email),
            camper_full_name TEXT NOT NULL,
            rating INTEGER NOT NULL CHECK (rating BETWEEN 0 AND 5),
            comment TEXT NOT NULL,
            date TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blogs (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            kind TEXT,
            creator_name TEXT,
            article_text TEXT NOT NULL,
            cover_image TEXT NOT NULL,
            tags TEXT NOT NULL DEFAULT '[]',
            campgrp_email TEXT NOT NULL,
            date TEXT NOT NULL,
            likes_count INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'pending'
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_camps_campgrp_email ON camps(campgrp_email);
        CREATE INDEX IF NOT EXISTS idx_camps_created_at ON camps(created_at);
        CREATE INDEX IF NOT EXISTS idx_reservations_email ON reservations(email);
        CREATE INDEX IF NOT EXISTS idx_camp_comments_camp_id ON camp_comments(camp_id);
        CREATE INDEX IF NOT EXISTS idx_blogs_status_date ON blogs(status, date);
        CREATE INDEX IF NOT EXISTS idx_blogs_campgrp_email ON blogs(campgrp_email);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
