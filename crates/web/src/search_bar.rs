//! Search bar and the live card filter.

use std::cell::RefCell;
use std::rc::Rc;

use vibe_bagshop_core::features::{classes, ids};
use vibe_bagshop_core::{FilterableCard, Segment, apply_filter};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, KeyboardEvent};

use crate::dom;
use crate::timer::Deferred;

/// Delay before the input takes focus, matching the bar's open transition.
const FOCUS_DELAY_MS: i32 = 300;

/// A product card currently in the document.
#[derive(Debug)]
struct DomCard {
    card: Element,
    name: Option<Element>,
}

impl DomCard {
    fn set_name_nodes(&self, segments: &[Segment]) -> Result<(), JsValue> {
        let Some(name) = &self.name else {
            return Ok(());
        };
        let doc = name
            .owner_document()
            .ok_or_else(|| JsValue::from_str("card is detached"))?;
        name.set_text_content(None);
        for segment in segments {
            if segment.marked {
                let mark = doc.create_element("mark")?;
                mark.set_text_content(Some(&segment.text));
                name.append_child(&mark)?;
            } else {
                name.append_child(&doc.create_text_node(&segment.text))?;
            }
        }
        Ok(())
    }
}

impl FilterableCard for DomCard {
    fn name(&self) -> Option<String> {
        self.name.as_ref()?.text_content()
    }

    fn set_visible(&self, visible: bool) {
        dom::set_display(&self.card, if visible { "" } else { "none" });
    }

    fn mark_name(&self, segments: &[Segment]) {
        dom::log_err("search highlight", self.set_name_nodes(segments));
    }

    fn restore_name(&self) {
        if let Some(name) = &self.name {
            let text = name.text_content().unwrap_or_default();
            name.set_text_content(Some(&text));
        }
    }
}

/// Every product card on the page right now.
fn current_cards(doc: &Document) -> Vec<DomCard> {
    let name_selector = format!(".{}", classes::PRODUCT_CARD_NAME);
    let Ok(found) = doc.query_selector_all(&format!(".{}", classes::PRODUCT_CARD)) else {
        return Vec::new();
    };
    (0..found.length())
        .filter_map(|i| found.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(|card| DomCard {
            name: card.query_selector(&name_selector).ok().flatten(),
            card,
        })
        .collect()
}

/// Bind the search toggle, input, close button and `Escape`.
pub fn mount(doc: &Document) -> Result<(), JsValue> {
    let bar = dom::require(doc, ids::SEARCH_BAR)?;
    let input: HtmlInputElement = dom::by_id(doc, ids::SEARCH_INPUT)
        .ok_or_else(|| JsValue::from_str("#searchInput is not an input"))?;
    let focus_timer: Rc<RefCell<Option<Deferred>>> = Rc::new(RefCell::new(None));

    let open = {
        let bar = bar.clone();
        let input = input.clone();
        let focus_timer = Rc::clone(&focus_timer);
        move |_: web_sys::Event| {
            dom::toggle_class(&bar, classes::OPEN, true);
            let input = input.clone();
            match Deferred::new(FOCUS_DELAY_MS, move || dom::log_err("search focus", input.focus())) {
                Ok(timer) => *focus_timer.borrow_mut() = Some(timer),
                Err(e) => tracing::debug!(?e, "could not schedule search focus"),
            }
        }
    };
    dom::listen(&dom::require(doc, ids::SEARCH_TOGGLE)?, "click", open)?;

    let close = {
        let doc = doc.clone();
        let input = input.clone();
        move || {
            focus_timer.borrow_mut().take();
            dom::toggle_class(&bar, classes::OPEN, false);
            input.set_value("");
            apply_filter(current_cards(&doc), "");
        }
    };

    let on_button = close.clone();
    dom::listen(&dom::require(doc, ids::SEARCH_CLOSE)?, "click", move |_| on_button())?;

    dom::listen(doc, "keydown", move |event| {
        if event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Escape")
        {
            close();
        }
    })?;

    let page = doc.clone();
    let field = input.clone();
    dom::listen(&input, "input", move |_| {
        apply_filter(current_cards(&page), &field.value());
    })
}
