//! Camp Marketplace Backend
//!
//! REST backend for a camping marketplace: camper and camp group accounts, camp
//! listings, reservations, reviews, comments and moderated blog posts. SQLite
//! holds the data and uploaded images are served from the local filesystem.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod mail;
mod models;
mod storage;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use mail::{LogMailer, Mailer};
use storage::{ImageStore, PUBLIC_PREFIX};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
    pub images: Arc<ImageStore>,
    pub mailer: Arc<dyn Mailer>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Camp Marketplace Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Upload directory: {:?}", config.upload_dir);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.admin_psk.is_none() {
        tracing::warn!("No admin PSK configured (CAMP_ADMIN_PSK). Blog moderation is disabled!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let state = AppState {
        repo: repo.clone(),
        images: Arc::new(ImageStore::new(config.upload_dir.clone())),
        mailer: Arc::new(LogMailer),
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repo.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let psk = state.config.admin_psk.clone();
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);
    let uploads = ServeDir::new(state.images.root());

    let public_routes = Router::new()
        // Campers
        .route("/register", post(api::register_camper))
        .route("/login", post(api::login_camper))
        .route("/userinfo", get(api::get_camper_info))
        .route("/updateProfile", post(api::update_camper_profile))
        .route("/changePassword", post(api::change_camper_password))
        .route("/forgotPassword", get(api::forgot_camper_password))
        .route("/resetPassword", post(api::reset_camper_password))
        // Camp groups
        .route("/registerCampgrp", post(api::register_camp_group))
        .route("/loginCampgrp", post(api::login_camp_group))
        .route("/campgrpinfo", get(api::get_camp_group_info))
        .route("/allCampgrps", get(api::list_camp_groups))
        .route("/updateProfileCampgrp", post(api::update_camp_group_profile))
        .route("/changePasswordCampgrp", post(api::change_camp_group_password))
        .route("/forgotPasswordCampgrp", get(api::forgot_camp_group_password))
        .route("/resetPasswordCampgrp", post(api::reset_camp_group_password))
        // Camps
        .route("/addCamp", post(api::create_camp))
        .route("/allCamps", get(api::list_camps))
        .route("/campsByCampgrp", get(api::list_camps_by_group))
        .route("/camp/{id}", get(api::get_camp))
        .route("/camps/{id}", patch(api::update_camp_status))
        // Reservations
        .route("/reserve", post(api::reserve))
        .route("/check-reservation", get(api::check_reservation))
        .route("/camp-reservations", get(api::count_camp_reservations))
        .route("/api/reservations", get(api::list_camper_reservations))
        .route("/api/campgrp/reservations", get(api::list_group_reservations))
        .route("/api/campgrp/stats", get(api::group_reservation_stats))
        // Group reviews
        .route("/api/reviews", get(api::list_group_reviews).post(api::upsert_review))
        .route("/api/reviews/stats", get(api::group_review_stats))
        .route("/api/reviews/check", get(api::get_camper_review))
        // Camp comments
        .route(
            "/api/camps/{id}/comments",
            get(api::list_comments).post(api::add_comment),
        )
        .route("/api/camps/{id}/comments/stats", get(api::comment_stats))
        // Blogs
        .route("/api/blogs", post(api::submit_blog))
        .route("/api/blogs/campgrp", get(api::list_group_blogs))
        .route("/api/blogs/{id}", get(api::get_blog))
        .route("/api/blogs/{id}/cancel", put(api::cancel_blog))
        .route("/api/blogs/{id}/like", post(api::like_blog))
        .route("/blogs", get(api::list_blogs))
        .route("/latestblogs", get(api::latest_blogs));

    // Moderation routes, guarded by the admin PSK
    let admin_routes = Router::new()
        .route("/blogs/pending", get(api::list_pending_blogs))
        .route("/blogs/{id}/approve", put(api::approve_blog))
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .nest("/api/admin", admin_routes)
        .merge(health_routes)
        .nest_service(PUBLIC_PREFIX, uploads)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(body_limit),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
