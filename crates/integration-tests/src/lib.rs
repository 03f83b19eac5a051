//! Integration tests for Vibe Bagshop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vibe-bagshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_routes` - The page host router, driven in-process with
//!   `tower::ServiceExt::oneshot`
//! - `page_shell` - The rendered page against the feature manifest the wasm
//!   bundle binds to
//! - `cart_persistence` - Cart and catalog round-trips through a store
//!
//! Helpers shared by the test files live here.

use std::collections::HashMap;
use std::path::PathBuf;

use axum::Router;
use vibe_bagshop_core::{CartPanel, CartSurface, Product};
use vibe_bagshop_storefront::config::StorefrontConfig;
use vibe_bagshop_storefront::state::AppState;

/// The storefront crate's own static directory.
#[must_use]
pub fn storefront_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static")
}

/// A page host router over the repo's static files and default settings.
///
/// `overrides` are applied on top of the defaults as environment variables.
///
/// # Panics
///
/// Panics if the overrides do not form a valid configuration.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_app(overrides: &[(&str, &str)]) -> Router {
    let mut vars: HashMap<String, String> = HashMap::from([(
        "BAGSHOP_STATIC_DIR".to_string(),
        storefront_static_dir().display().to_string(),
    )]);
    vars.extend(
        overrides
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
    );
    let config = StorefrontConfig::from_vars(&vars).expect("test configuration is valid");
    vibe_bagshop_storefront::app(AppState::new(config))
}

/// A cart surface that records what it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub counts: Vec<u32>,
    pub panels: Vec<CartPanel>,
    pub added: Vec<String>,
}

impl CartSurface for RecordingSurface {
    fn show_count(&mut self, count: u32) {
        self.counts.push(count);
    }

    fn render(&mut self, panel: &CartPanel) {
        self.panels.push(panel.clone());
    }

    fn confirm_added(&mut self, product: &Product) {
        self.added.push(product.name.clone());
    }
}
