//! The rendered page against the element IDs and classes the wasm bundle
//! binds to.

#![allow(clippy::unwrap_used)]

use axum::body::{Body, to_bytes};
use axum::http::Request;
use tower::ServiceExt;
use vibe_bagshop_core::Feature;
use vibe_bagshop_core::features::classes;
use vibe_bagshop_integration_tests::test_app;

async fn page(overrides: &[(&str, &str)]) -> String {
    let response = test_app(overrides)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_every_feature_element_is_present() {
    let html = page(&[]).await;
    for feature in Feature::ALL {
        for id in feature.element_ids() {
            assert!(
                html.contains(&format!(r#"id="{id}""#)),
                "{} needs #{id}",
                feature.name()
            );
        }
    }
}

#[tokio::test]
async fn test_each_id_appears_once() {
    let html = page(&[]).await;
    for feature in Feature::ALL {
        for id in feature.element_ids() {
            assert_eq!(html.matches(&format!(r#"id="{id}""#)).count(), 1, "#{id}");
        }
    }
}

#[tokio::test]
async fn test_dialogs_are_dialog_elements() {
    let html = page(&[]).await;
    for id in ["moreModal", "newMoreModal", "detailModal", "cartToast"] {
        assert!(html.contains(&format!(r#"<dialog id="{id}""#)), "#{id}");
    }
}

#[tokio::test]
async fn test_viewer_markup_follows_configuration() {
    let html = page(&[
        ("BAGSHOP_MODEL_PATH", "/assets/mini-tote.glb"),
        ("BAGSHOP_SWATCHES", "#0f766e,#F5F5F4"),
    ])
    .await;
    assert!(html.contains(r#"data-model-src="/assets/mini-tote.glb""#));
    assert!(html.contains(&format!(r#"class="{}""#, classes::STAGE_HINT)));
    assert_eq!(html.matches("data-color=").count(), 2);
    assert!(html.contains(r##"class="swatch active" data-color="#0f766e""##));
    assert!(html.contains(r##"class="swatch" data-color="#f5f5f4""##));
}

#[tokio::test]
async fn test_bootstrap_loads_three_then_wasm() {
    let html = page(&[]).await;
    let three = html.find("import * as THREE from \"three\"").unwrap();
    let wasm = html.find("/pkg/vibe_bagshop_web.js").unwrap();
    assert!(three < wasm);
    assert!(html.contains("window.THREE = { ...THREE, OrbitControls, GLTFLoader };"));
    assert!(html.contains("https://cdn.jsdelivr.net/npm/three@0.160.0/build/three.module.js"));
}
