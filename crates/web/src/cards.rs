//! Product cards, sliders, "show more" modals, the MD pick and the detail
//! modal.

use std::rc::Rc;

use vibe_bagshop_core::features::{classes, ids};
use vibe_bagshop_core::views::PLACEHOLDER_GLYPH;
use vibe_bagshop_core::{CardView, DetailView, Product, Thumbnail};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlDialogElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions,
};

use crate::dom;

/// Horizontal distance one slider button press scrolls.
const SLIDE_STEP_PX: f64 = 344.0;

/// Marks the quick-add button inside a card.
pub const QUICK_ADD_ATTR: &str = "data-quick-add";

/// Label of the quick-add button.
const QUICK_ADD_LABEL: &str = "Add to cart";

/// Element IDs of one slider and its "show more" modal.
#[derive(Debug, Clone, Copy)]
pub struct SliderIds {
    pub track: &'static str,
    pub viewport: &'static str,
    pub prev: &'static str,
    pub next: &'static str,
    pub more_btn: &'static str,
    pub more_modal: &'static str,
    pub more_close: &'static str,
    pub more_grid: &'static str,
}

pub const POPULAR: SliderIds = SliderIds {
    track: ids::POPULAR_TRACK,
    viewport: ids::POPULAR_VIEWPORT,
    prev: ids::POPULAR_PREV,
    next: ids::POPULAR_NEXT,
    more_btn: ids::POPULAR_MORE_BTN,
    more_modal: ids::POPULAR_MORE_MODAL,
    more_close: ids::POPULAR_MORE_CLOSE,
    more_grid: ids::POPULAR_MORE_GRID,
};

pub const NEW_ARRIVALS: SliderIds = SliderIds {
    track: ids::NEW_TRACK,
    viewport: ids::NEW_VIEWPORT,
    prev: ids::NEW_PREV,
    next: ids::NEW_NEXT,
    more_btn: ids::NEW_MORE_BTN,
    more_modal: ids::NEW_MORE_MODAL,
    more_close: ids::NEW_MORE_CLOSE,
    more_grid: ids::NEW_MORE_GRID,
};

// =============================================================================
// Detail modal
// =============================================================================

/// The product detail dialog.
#[derive(Debug)]
pub struct DetailModal {
    doc: Document,
    dialog: HtmlDialogElement,
    name: Element,
    price: Element,
    desc: Element,
    image: Element,
}

impl DetailModal {
    /// Find the dialog and its fields.
    pub fn find(doc: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            doc: doc.clone(),
            dialog: dom::by_id(doc, ids::DETAIL_MODAL)
                .ok_or_else(|| JsValue::from_str("#detailModal is not a dialog"))?,
            name: dom::require(doc, ids::DETAIL_NAME)?,
            price: dom::require(doc, ids::DETAIL_PRICE)?,
            desc: dom::require(doc, ids::DETAIL_DESC)?,
            image: dom::require(doc, ids::DETAIL_IMG)?,
        })
    }

    /// Close on the close button and on a backdrop click.
    pub fn bind_close(&self) -> Result<(), JsValue> {
        let close = dom::require(&self.doc, ids::DETAIL_CLOSE)?;
        bind_dialog_close(&self.dialog, &close)
    }

    /// Fill the dialog with `product` and open it.
    pub fn show(&self, product: &Product) {
        let view = DetailView::from(product);
        self.name.set_text_content(Some(&view.name));
        self.price.set_text_content(Some(view.price.as_str()));
        self.desc.set_text_content(Some(&view.desc));
        self.image.set_text_content(None);
        match thumbnail(&self.doc, &view.image) {
            Ok(el) => dom::log_err("detail image", self.image.append_child(&el).map(drop)),
            Err(e) => tracing::warn!(?e, "could not build detail image"),
        }
        dom::log_err("detail modal", self.dialog.show_modal());
        tracing::debug!(id = %product.id, "detail modal opened");
    }
}

/// Close `dialog` from `close` and from clicks on its backdrop.
pub fn bind_dialog_close(dialog: &HtmlDialogElement, close: &Element) -> Result<(), JsValue> {
    let target = dialog.clone();
    dom::listen(close, "click", move |_| target.close())?;

    let target = dialog.clone();
    dom::listen(dialog, "click", move |event| {
        if dom::is_self_target(&event, &target) {
            target.close();
        }
    })
}

// =============================================================================
// Cards
// =============================================================================

/// Image element for a thumbnail, or the placeholder glyph.
pub fn thumbnail(doc: &Document, thumb: &Thumbnail) -> Result<Element, JsValue> {
    match thumb {
        Thumbnail::Image { src, alt } => {
            let img = doc.create_element("img")?;
            img.set_attribute("src", src)?;
            img.set_attribute("alt", alt)?;
            img.set_attribute("loading", "lazy")?;
            Ok(img)
        }
        Thumbnail::Placeholder => {
            let glyph = doc.create_element("div")?;
            glyph.set_class_name(classes::PLACEHOLDER);
            glyph.set_text_content(Some(PLACEHOLDER_GLYPH));
            Ok(glyph)
        }
    }
}

/// Build one product card. Clicking it opens `detail`.
pub fn card(
    doc: &Document,
    product: &Product,
    detail: Option<&Rc<DetailModal>>,
) -> Result<Element, JsValue> {
    let view = CardView::from(product);

    let card = doc.create_element("article")?;
    card.set_class_name(classes::PRODUCT_CARD);
    card.set_attribute("data-id", &view.id.to_string())?;

    let image = doc.create_element("div")?;
    image.set_class_name(classes::PRODUCT_CARD_IMG);
    image.append_child(&thumbnail(doc, &view.thumbnail)?)?;

    let body = doc.create_element("div")?;
    body.set_class_name(classes::PRODUCT_CARD_BODY);
    let name = doc.create_element("h3")?;
    name.set_class_name(classes::PRODUCT_CARD_NAME);
    name.set_text_content(Some(&view.name));
    let price = doc.create_element("p")?;
    price.set_class_name(classes::PRODUCT_CARD_PRICE);
    price.set_text_content(Some(view.price.as_str()));
    let quick_add = doc.create_element("button")?;
    quick_add.set_attribute("type", "button")?;
    quick_add.set_class_name(&format!("btn {}", classes::QUICK_ADD));
    quick_add.set_attribute(QUICK_ADD_ATTR, "")?;
    quick_add.set_text_content(Some(QUICK_ADD_LABEL));
    body.append_child(&name)?;
    body.append_child(&price)?;
    body.append_child(&quick_add)?;

    card.append_child(&image)?;
    card.append_child(&body)?;

    if let Some(detail) = detail {
        let detail = Rc::clone(detail);
        let product = product.clone();
        dom::listen(&card, "click", move |event| {
            // Quick add is handled by the cart.
            if clicked_quick_add(&event) {
                return;
            }
            detail.show(&product);
        })?;
    }
    Ok(card)
}

fn clicked_quick_add(event: &web_sys::Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(&format!("[{QUICK_ADD_ATTR}]")).ok().flatten())
        .is_some()
}

fn append_cards(
    doc: &Document,
    container: &Element,
    products: &[Product],
    detail: Option<&Rc<DetailModal>>,
) -> Result<(), JsValue> {
    for product in products {
        container.append_child(&card(doc, product, detail)?)?;
    }
    Ok(())
}

// =============================================================================
// Sections
// =============================================================================

/// Fill the MD pick name and price.
pub fn render_md_pick(doc: &Document, product: &Product) -> Result<(), JsValue> {
    dom::require(doc, ids::MD_NAME)?.set_text_content(Some(&product.name));
    dom::require(doc, ids::MD_PRICE)?.set_text_content(Some(product.price.as_str()));
    Ok(())
}

/// Render the slider cards and bind its prev/next buttons.
pub fn mount_slider(
    doc: &Document,
    slider: &SliderIds,
    products: &[Product],
    detail: Option<&Rc<DetailModal>>,
) -> Result<(), JsValue> {
    append_cards(doc, &dom::require(doc, slider.track)?, products, detail)?;

    let viewport = dom::require(doc, slider.viewport)?;
    for (button, step) in [(slider.prev, -SLIDE_STEP_PX), (slider.next, SLIDE_STEP_PX)] {
        let viewport = viewport.clone();
        dom::listen(&dom::require(doc, button)?, "click", move |_| {
            let options = ScrollToOptions::new();
            options.set_left(step);
            options.set_behavior(ScrollBehavior::Smooth);
            viewport.scroll_by_with_scroll_to_options(&options);
        })?;
    }
    Ok(())
}

/// Fill the "show more" grid with every product and bind the modal.
pub fn mount_more(
    doc: &Document,
    slider: &SliderIds,
    products: &[Product],
    detail: Option<&Rc<DetailModal>>,
) -> Result<(), JsValue> {
    append_cards(doc, &dom::require(doc, slider.more_grid)?, products, detail)?;

    let modal: HtmlDialogElement = dom::by_id(doc, slider.more_modal)
        .ok_or_else(|| JsValue::from_str("show-more modal is not a dialog"))?;
    let open = modal.clone();
    dom::listen(&dom::require(doc, slider.more_btn)?, "click", move |_| {
        dom::log_err("show-more modal", open.show_modal());
    })?;
    bind_dialog_close(&modal, &dom::require(doc, slider.more_close)?)
}

/// Smooth-scroll in-page anchors. A bare `#` is left alone.
pub fn bind_smooth_scroll(doc: &Document) -> Result<(), JsValue> {
    let anchors = doc.query_selector_all("a[href^=\"#\"]")?;
    for anchor in (0..anchors.length()).filter_map(|i| anchors.item(i)) {
        let Ok(anchor) = anchor.dyn_into::<Element>() else {
            continue;
        };
        let doc = doc.clone();
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |event| {
            let Some(href) = link.get_attribute("href").filter(|h| h != "#") else {
                return;
            };
            event.prevent_default();
            if let Ok(Some(target)) = doc.query_selector(&href) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}
