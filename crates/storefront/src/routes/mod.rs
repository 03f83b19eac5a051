//! HTTP route handlers for the page host.
//!
//! # Route Structure
//!
//! ```text
//! GET  /            - Page shell
//! GET  /health      - Health check
//! GET  /static/*    - Stylesheet and images
//! GET  /pkg/*       - wasm bundle
//! GET  /assets/*    - 3D models
//! *                 - 404
//! ```
//!
//! The static directories are mounted in [`crate::app`].

pub mod home;

use axum::{Router, http::Uri, routing::get};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}

/// Fallback for every unmatched path.
#[instrument]
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Create the page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
}
