//! Router configuration.
//!
//! # Route Structure
//!
//! - `POST /`         - Create a short link
//! - `GET  /health`   - Health check
//! - `GET  /{code}`   - Short link redirect
//!
//! Trailing slashes are normalized away, so `GET /{code}/` resolves like
//! `GET /{code}`.

use crate::api::handlers::{create_handler, health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/", post(create_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
