//! Resettable `setTimeout` handle.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::error::Result;

/// A single pending timeout that is cancelled whenever a new one is scheduled.
///
/// Holds the callback closure until the next schedule or cancel, so the
/// closure is never freed while the browser can still call it.
pub struct ResetTimer {
    delay_ms: i32,
    pending: Option<(i32, Closure<dyn FnMut()>)>,
}

impl ResetTimer {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Run `callback` after the delay, cancelling any earlier callback.
    pub fn schedule(&mut self, callback: impl FnOnce() + 'static) -> Result<()> {
        self.cancel();
        let closure: Closure<dyn FnMut()> = Closure::once(callback);
        let handle = dom::window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            self.delay_ms,
        )?;
        self.pending = Some((handle, closure));
        Ok(())
    }

    pub fn cancel(&mut self) {
        if let Some((handle, _closure)) = self.pending.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle);
            }
        }
    }
}

impl Drop for ResetTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
