//! DOM lookup and event plumbing.

use vibe_bagshop_core::Feature;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, Window};

/// The page's window.
pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// The page's document.
pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Element by id, cast to `T`. `None` when absent or of another type.
pub fn by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Element by id as a plain [`Element`], or an error naming the id.
pub fn require(doc: &Document, id: &str) -> Result<Element, JsValue> {
    doc.get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{id} missing")))
}

/// Whether every element `feature` needs is on the page.
///
/// Logs the first missing id once at `info` and returns `false`.
pub fn feature_available(doc: &Document, feature: Feature) -> bool {
    let missing = feature
        .element_ids()
        .iter()
        .find(|id| doc.get_element_by_id(id).is_none());
    match missing {
        Some(id) => {
            tracing::info!(feature = feature.name(), missing = %id, "feature unavailable");
            false
        }
        None => true,
    }
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

/// Add or remove `class` on `el`.
pub fn toggle_class(el: &Element, class: &str, on: bool) {
    let result = if on {
        el.class_list().add_1(class)
    } else {
        el.class_list().remove_1(class)
    };
    if let Err(e) = result {
        tracing::debug!(?e, class, "class toggle failed");
    }
}

/// Show or hide an element through its inline `display` style.
pub fn set_display(el: &Element, display: &str) {
    if let Some(html) = el.dyn_ref::<web_sys::HtmlElement>()
        && let Err(e) = html.style().set_property("display", display)
    {
        tracing::debug!(?e, "display update failed");
    }
}

/// Whether a click landed on the element itself rather than a child.
///
/// Dialog backdrops report the dialog as the target.
pub fn is_self_target(event: &Event, el: &Element) -> bool {
    let node: &web_sys::Node = el;
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|t| t.is_same_node(Some(node)))
}

/// Log a failed DOM call that should not stop the page.
pub fn log_err(context: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        tracing::warn!(?e, context, "dom call failed");
    }
}
