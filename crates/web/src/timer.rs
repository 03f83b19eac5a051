//! Cancellable one-shot timers.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;

/// A `setTimeout` that is cleared when dropped.
///
/// Holding the latest `Deferred` in an `Option` and replacing it cancels the
/// previous one.
#[derive(Debug)]
pub struct Deferred {
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Deferred {
    /// Run `callback` once after `delay_ms`.
    pub fn new<F>(delay_ms: i32, callback: F) -> Result<Self, JsValue>
    where
        F: FnOnce() + 'static,
    {
        let callback = Closure::once(callback);
        let handle = dom::window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms,
        )?;
        Ok(Self {
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Deferred {
    fn drop(&mut self) {
        if let Ok(window) = dom::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}
