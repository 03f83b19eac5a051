//! Vibe Bagshop Storefront library.
//!
//! The page host: renders the page shell and serves the stylesheet, the wasm
//! bundle and the 3D assets. Everything interactive runs in the browser.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;

use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header::CACHE_CONTROL},
    middleware::from_fn,
};
use tower::Layer;
use tower_http::{
    catch_panic::CatchPanicLayer,
    services::ServeDir,
    set_header::{SetResponseHeader, SetResponseHeaderLayer},
    trace::TraceLayer,
};

use crate::middleware::{csp_nonce_middleware, request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Caching for files under the static mounts.
const STATIC_CACHE: &str = "public, max-age=3600";

/// A static directory with its cache policy.
fn static_files(dir: &Path) -> SetResponseHeader<ServeDir, HeaderValue> {
    SetResponseHeaderLayer::if_not_present(CACHE_CONTROL, HeaderValue::from_static(STATIC_CACHE))
        .layer(ServeDir::new(dir))
}

/// Build the page host router.
pub fn app(state: AppState) -> Router {
    let config = state.config();

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", static_files(&config.static_dir))
        .nest_service("/pkg", static_files(&config.pkg_dir))
        .nest_service("/assets", static_files(&config.assets_dir))
        .fallback(routes::not_found)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(csp_nonce_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
