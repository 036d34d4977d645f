//! Configuration module for the camp marketplace backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key guarding the moderation routes (moderation is disabled when unset)
    pub admin_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Public base URL used when building links sent by email
    pub public_url: String,
    /// bcrypt work factor for password and reset token hashes
    pub bcrypt_cost: u32,
    /// Lifetime of a password reset token
    pub reset_token_ttl_minutes: i64,
    /// Maximum accepted request body size for multipart uploads
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_psk = env::var("CAMP_ADMIN_PSK").ok();

        let db_path = env::var("CAMP_DB_PATH")
            .unwrap_or_else(|_| "./data/campmarket.sqlite".to_string())
            .into();

        let upload_dir = env::var("CAMP_UPLOAD_DIR")
            .unwrap_or_else(|_| "./uploads".to_string())
            .into();

        let bind_addr = env::var("CAMP_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string())
            .parse()
            .expect("Invalid CAMP_BIND_ADDR format");

        let log_level = env::var("CAMP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let public_url =
            env::var("CAMP_PUBLIC_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let bcrypt_cost = env::var("CAMP_BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(bcrypt::DEFAULT_COST);

        let reset_token_ttl_minutes = env::var("CAMP_RESET_TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let max_upload_bytes = env::var("CAMP_MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10 * 1024 * 1024);

        Self {
            admin_psk,
            db_path,
            upload_dir,
            bind_addr,
            log_level,
            public_url,
            bcrypt_cost,
            reset_token_ttl_minutes,
            max_upload_bytes,
        }
    }
}
