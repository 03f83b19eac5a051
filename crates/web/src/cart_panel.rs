//! Cart sidebar, badge, "added" notice and the add-to-cart entry points.

use std::cell::RefCell;
use std::rc::Rc;

use vibe_bagshop_core::features::{classes, ids};
use vibe_bagshop_core::{
    CartEngine, CartPanel, CartRow, CartSurface, DisplaySnapshot, KeyValueStore, Product,
    ProductId,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlDialogElement, HtmlImageElement};

use crate::cards::{self, QUICK_ADD_ATTR};
use crate::dom;

/// The page's cart engine.
pub type SharedCart = Rc<RefCell<CartEngine<Box<dyn KeyValueStore>, DomCartSurface>>>;

/// The "added to cart" dialog.
#[derive(Debug, Clone)]
pub struct Toast {
    dialog: HtmlDialogElement,
}

impl Toast {
    /// Find the dialog and bind its close button and backdrop.
    pub fn mount(doc: &Document) -> Result<Self, JsValue> {
        let dialog: HtmlDialogElement = dom::by_id(doc, ids::CART_TOAST)
            .ok_or_else(|| JsValue::from_str("#cartToast is not a dialog"))?;
        cards::bind_dialog_close(&dialog, &dom::require(doc, ids::CART_TOAST_CLOSE)?)?;
        Ok(Self { dialog })
    }

    fn show(&self) {
        if !self.dialog.open() {
            dom::log_err("cart toast", self.dialog.show_modal());
        }
    }
}

// =============================================================================
// Surface
// =============================================================================

/// Renders the cart into the sidebar and badge.
#[derive(Debug)]
pub struct DomCartSurface {
    doc: Document,
    badge: Element,
    items: Element,
    empty: Element,
    total: Element,
    toast: Option<Toast>,
}

impl DomCartSurface {
    fn find(doc: &Document, toast: Option<Toast>) -> Result<Self, JsValue> {
        Ok(Self {
            doc: doc.clone(),
            badge: dom::require(doc, ids::CART_BADGE)?,
            items: dom::require(doc, ids::CART_ITEMS)?,
            empty: dom::require(doc, ids::CART_EMPTY)?,
            total: dom::require(doc, ids::CART_TOTAL)?,
            toast,
        })
    }

    fn row(&self, row: &CartRow) -> Result<Element, JsValue> {
        let doc = &self.doc;
        let id = row.id.to_string();

        let item = element(doc, "div", "cart-item")?;
        let image = element(doc, "div", "cart-item__img")?;
        image.append_child(&cards::thumbnail(doc, &row.thumbnail)?)?;

        let info = element(doc, "div", "cart-item__info")?;
        let name = element(doc, "h4", "cart-item__name")?;
        name.set_text_content(Some(&row.name));
        let price = element(doc, "p", "cart-item__price")?;
        price.set_text_content(Some(row.price.as_str()));

        let controls = element(doc, "div", "cart-item__controls")?;
        let qty = element(doc, "div", "cart-item__qty")?;
        let count = doc.create_element("span")?;
        count.set_text_content(Some(&row.qty.to_string()));
        qty.append_child(&action_button(doc, Action::Decrease, &id, "−")?)?;
        qty.append_child(&count)?;
        qty.append_child(&action_button(doc, Action::Increase, &id, "+")?)?;
        let remove = action_button(doc, Action::Remove, &id, "Remove")?;
        remove.set_class_name("cart-item__remove");

        controls.append_child(&qty)?;
        controls.append_child(&remove)?;
        info.append_child(&name)?;
        info.append_child(&price)?;
        info.append_child(&controls)?;
        item.append_child(&image)?;
        item.append_child(&info)?;
        Ok(item)
    }

    fn render_rows(&self, rows: &[CartRow]) -> Result<(), JsValue> {
        self.items.set_text_content(None);
        for row in rows {
            self.items.append_child(&self.row(row)?)?;
        }
        Ok(())
    }
}

impl CartSurface for DomCartSurface {
    fn show_count(&mut self, count: u32) {
        if count > 0 {
            self.badge.set_text_content(Some(&count.to_string()));
            dom::set_display(&self.badge, "block");
        } else {
            dom::set_display(&self.badge, "none");
        }
    }

    fn render(&mut self, panel: &CartPanel) {
        self.total.set_text_content(Some(panel.total().as_str()));
        match panel {
            CartPanel::Empty { .. } => {
                self.items.set_text_content(None);
                dom::set_display(&self.items, "none");
                dom::set_display(&self.empty, "block");
            }
            CartPanel::Lines { rows, .. } => {
                dom::set_display(&self.items, "flex");
                dom::set_display(&self.empty, "none");
                dom::log_err("cart rows", self.render_rows(rows));
            }
        }
    }

    fn confirm_added(&mut self, product: &Product) {
        tracing::info!(name = %product.name, "added to cart");
        if let Some(toast) = &self.toast {
            toast.show();
        }
    }
}

fn element(doc: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    el.set_class_name(class);
    Ok(el)
}

// =============================================================================
// Row actions
// =============================================================================

/// A button inside a cart row, dispatched by the delegated listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Decrease,
    Increase,
    Remove,
}

impl Action {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Decrease => "decrease",
            Self::Increase => "increase",
            Self::Remove => "remove",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        [Self::Decrease, Self::Increase, Self::Remove]
            .into_iter()
            .find(|a| a.as_str() == s)
    }
}

fn action_button(doc: &Document, action: Action, id: &str, label: &str) -> Result<Element, JsValue> {
    let button = doc.create_element("button")?;
    button.set_attribute("type", "button")?;
    button.set_attribute("data-action", action.as_str())?;
    button.set_attribute("data-id", id)?;
    button.set_text_content(Some(label));
    Ok(button)
}

/// The action and line id of the clicked row button, if any.
fn clicked_action(event: &web_sys::Event) -> Option<(Action, ProductId)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest("[data-action]").ok()??;
    let action = Action::parse(&button.get_attribute("data-action")?)?;
    let id = button.get_attribute("data-id")?.parse().ok()?;
    Some((action, id))
}

// =============================================================================
// Mounting
// =============================================================================

/// Load the cart and bind the sidebar, row buttons and add-to-cart entry
/// points. The detail modal's add button is bound when `detail` is true.
pub fn mount(
    doc: &Document,
    store: Box<dyn KeyValueStore>,
    toast: Option<Toast>,
    detail: bool,
) -> Result<SharedCart, JsValue> {
    let surface = DomCartSurface::find(doc, toast)?;
    let cart: SharedCart = Rc::new(RefCell::new(CartEngine::load(store, surface)));

    bind_sidebar(doc, &cart)?;

    let rows = Rc::clone(&cart);
    dom::listen(&dom::require(doc, ids::CART_ITEMS)?, "click", move |event| {
        let Some((action, id)) = clicked_action(&event) else {
            return;
        };
        let mut cart = rows.borrow_mut();
        match action {
            Action::Decrease => cart.adjust_quantity(id, -1),
            Action::Increase => cart.adjust_quantity(id, 1),
            Action::Remove => cart.remove(id),
        }
    })?;

    if detail {
        bind_detail_add(doc, &cart)?;
    }
    bind_quick_add(doc, &cart)?;
    Ok(cart)
}

fn bind_sidebar(doc: &Document, cart: &SharedCart) -> Result<(), JsValue> {
    let sidebar = dom::require(doc, ids::CART_SIDEBAR)?;
    let overlay = dom::require(doc, ids::CART_OVERLAY)?;

    let set_open = {
        let sidebar = sidebar.clone();
        let overlay = overlay.clone();
        move |open: bool| {
            dom::toggle_class(&sidebar, classes::OPEN, open);
            dom::toggle_class(&overlay, classes::OPEN, open);
        }
    };

    let open = set_open.clone();
    let panel = Rc::clone(cart);
    dom::listen(&dom::require(doc, ids::CART_BTN)?, "click", move |_| {
        open(true);
        panel.borrow_mut().render();
    })?;

    let close = set_open.clone();
    dom::listen(&dom::require(doc, ids::CART_CLOSE)?, "click", move |_| close(false))?;
    dom::listen(&overlay, "click", move |_| set_open(false))
}

fn now_id() -> ProductId {
    ProductId::from_timestamp_millis(js_sys::Date::now())
}

fn text_of(el: Option<Element>) -> Option<String> {
    el.and_then(|el| el.text_content())
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

fn image_src(el: Option<Element>) -> Option<String> {
    el.and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
        .map(|img| img.src())
}

fn bind_detail_add(doc: &Document, cart: &SharedCart) -> Result<(), JsValue> {
    let page = doc.clone();
    let cart = Rc::clone(cart);
    dom::listen(&dom::require(doc, ids::DETAIL_ADD)?, "click", move |_| {
        let field = |id: &str| text_of(page.get_element_by_id(id));
        let (Some(name), Some(price)) = (field(ids::DETAIL_NAME), field(ids::DETAIL_PRICE)) else {
            return;
        };
        let snapshot = DisplaySnapshot {
            name,
            price,
            desc: field(ids::DETAIL_DESC).unwrap_or_default(),
            image: image_src(
                page.query_selector(&format!("#{} img", ids::DETAIL_IMG))
                    .ok()
                    .flatten(),
            ),
        };
        cart.borrow_mut()
            .add(Product::from_display(now_id(), snapshot));
    })
}

fn bind_quick_add(doc: &Document, cart: &SharedCart) -> Result<(), JsValue> {
    let cart = Rc::clone(cart);
    let selector = format!(".{}[{QUICK_ADD_ATTR}]", classes::QUICK_ADD);
    dom::listen(doc, "click", move |event| {
        let Some(card) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&selector).ok().flatten())
            .and_then(|button| button.closest(&format!(".{}", classes::PRODUCT_CARD)).ok().flatten())
        else {
            return;
        };
        let part = |class: &str| card.query_selector(&format!(".{class}")).ok().flatten();
        let (Some(name), Some(price)) = (
            text_of(part(classes::PRODUCT_CARD_NAME)),
            text_of(part(classes::PRODUCT_CARD_PRICE)),
        ) else {
            return;
        };
        let snapshot = DisplaySnapshot {
            name,
            price,
            desc: String::new(),
            image: image_src(
                card.query_selector(&format!(".{} img", classes::PRODUCT_CARD_IMG))
                    .ok()
                    .flatten(),
            ),
        };
        cart.borrow_mut()
            .add(Product::from_display(now_id(), snapshot));
    })
}
