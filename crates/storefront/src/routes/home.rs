//! Home page route handler.
//!
//! The page is a static shell. Products, cart and search are filled in by the
//! wasm bundle, which binds to the element IDs this template carries.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;
use vibe_bagshop_core::Color;

use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;

/// three.js release the page imports.
pub const THREE_VERSION: &str = "0.160.0";

/// Module generated by `wasm-bindgen --target web`.
pub const WASM_ENTRY: &str = "/pkg/vibe_bagshop_web.js";

/// One color button under the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwatchView {
    pub hex: String,
    /// The first swatch starts selected.
    pub active: bool,
}

impl SwatchView {
    fn list(colors: &[Color]) -> Vec<Self> {
        colors
            .iter()
            .enumerate()
            .map(|(i, color)| Self {
                hex: color.as_str().to_string(),
                active: i == 0,
            })
            .collect()
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub nonce: String,
    pub import_map: String,
    pub wasm_entry: &'static str,
    pub model_path: String,
    pub swatches: Vec<SwatchView>,
}

/// Import map resolving `three` and its addons to the CDN.
#[must_use]
pub fn import_map() -> String {
    let base = format!("https://cdn.jsdelivr.net/npm/three@{THREE_VERSION}");
    serde_json::json!({
        "imports": {
            "three": format!("{base}/build/three.module.js"),
            "three/addons/": format!("{base}/examples/jsm/"),
        }
    })
    .to_string()
}

/// Display the home page.
#[instrument(skip(state, nonce))]
pub async fn home(State(state): State<AppState>, nonce: CspNonce) -> impl IntoResponse {
    let config = state.config();
    HomeTemplate {
        nonce: nonce.0,
        import_map: state.import_map().to_string(),
        wasm_entry: WASM_ENTRY,
        model_path: config.model_path.clone(),
        swatches: SwatchView::list(&config.swatches),
    }
}
