//! Vibe Bagshop Web - browser glue for the storefront page.
//!
//! Compiled to wasm32 and loaded by the page shell the storefront serves. On
//! start it binds every page feature whose elements are present:
//!
//! - [`stage`] - three.js viewer, swatches and auto-rotation
//! - [`cards`] - MD pick, sliders, "show more" modals, detail modal
//! - [`search_bar`] - live card filter
//! - [`cart_panel`] - cart sidebar, badge, notice and add-to-cart
//!
//! State, persistence and filtering rules live in `vibe-bagshop-core`; this
//! crate only reads and writes the DOM.
//!
//! On other targets the crate is empty.

#![cfg(target_arch = "wasm32")]
// wasm-bindgen expands to unsafe FFI shims.
#![allow(unsafe_code)]

pub mod cards;
pub mod cart_panel;
pub mod dom;
pub mod search_bar;
pub mod stage;
pub mod three;
pub mod timer;

use std::rc::Rc;

use vibe_bagshop_core::catalog::CatalogSlot;
use vibe_bagshop_core::store::LocalStorage;
use vibe_bagshop_core::{Catalog, Feature, KeyValueStore, MemoryStore};
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::cards::DetailModal;
use crate::cart_panel::{SharedCart, Toast};

/// Everything features are mounted from.
struct Page {
    doc: Document,
    catalog: Catalog,
    store: Option<Box<dyn KeyValueStore>>,
    detail: Option<Rc<DetailModal>>,
    toast: Option<Toast>,
    cart: Option<SharedCart>,
}

impl Page {
    fn mount(&mut self, feature: Feature) -> Result<(), JsValue> {
        let detail = self.detail.as_ref();
        match feature {
            Feature::Viewer => stage::mount(&self.doc),
            Feature::MdPick => cards::render_md_pick(&self.doc, &self.catalog.md_pick),
            Feature::PopularSlider => cards::mount_slider(
                &self.doc,
                &cards::POPULAR,
                self.catalog.slider(CatalogSlot::Popular),
                detail,
            ),
            Feature::PopularMore => cards::mount_more(
                &self.doc,
                &cards::POPULAR,
                self.catalog.list(CatalogSlot::Popular),
                detail,
            ),
            Feature::NewSlider => cards::mount_slider(
                &self.doc,
                &cards::NEW_ARRIVALS,
                self.catalog.slider(CatalogSlot::New),
                detail,
            ),
            Feature::NewMore => cards::mount_more(
                &self.doc,
                &cards::NEW_ARRIVALS,
                self.catalog.list(CatalogSlot::New),
                detail,
            ),
            Feature::Detail => detail.map_or(Ok(()), |modal| modal.bind_close()),
            Feature::Search => search_bar::mount(&self.doc),
            Feature::Cart => {
                let Some(store) = self.store.take() else {
                    return Ok(());
                };
                let cart = cart_panel::mount(&self.doc, store, self.toast.take(), detail.is_some())?;
                self.cart = Some(cart);
                Ok(())
            }
            // Bound before the cart so the cart can show it.
            Feature::CartToast => Ok(()),
        }
    }
}

/// Open browser storage, or keep the session's changes in memory.
fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(error = %e, "local storage unavailable, changes will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Debug)
        .map_err(|e| JsValue::from_str(&format!("failed to init logger: {e}")))?;

    let doc = dom::document()?;
    let store = open_store();
    let catalog = Catalog::load(&store);

    let detail = if dom::feature_available(&doc, Feature::Detail) {
        match DetailModal::find(&doc) {
            Ok(modal) => Some(Rc::new(modal)),
            Err(e) => {
                tracing::warn!(?e, "detail modal unavailable");
                None
            }
        }
    } else {
        None
    };
    let toast = if dom::feature_available(&doc, Feature::CartToast) {
        Toast::mount(&doc)
            .inspect_err(|e| tracing::warn!(?e, "cart notice unavailable"))
            .ok()
    } else {
        None
    };

    let mut page = Page {
        doc,
        catalog,
        store: Some(store),
        detail,
        toast,
        cart: None,
    };

    for feature in Feature::ALL {
        // Detail and notice availability was checked while building the page.
        let checked = matches!(feature, Feature::Detail | Feature::CartToast);
        if !checked && !dom::feature_available(&page.doc, feature) {
            continue;
        }
        if let Err(e) = page.mount(feature) {
            tracing::warn!(feature = feature.name(), ?e, "feature failed to mount");
        }
    }

    if let Err(e) = cards::bind_smooth_scroll(&page.doc) {
        tracing::warn!(?e, "smooth scrolling unavailable");
    }

    tracing::info!(cart = page.cart.is_some(), "storefront page ready");
    Ok(())
}
