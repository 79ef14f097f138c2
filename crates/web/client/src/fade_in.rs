//! Reveal `.fade-in-section` elements as they scroll into view.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;
use crate::error::Result;

pub const FADE_IN_SELECTOR: &str = ".fade-in-section";
pub const VISIBLE_CLASS: &str = "is-visible";

pub fn setup_fade_in_sections(document: &Document, threshold: f64) -> Result<()> {
    let sections = dom::query_all(document, FADE_IN_SELECTOR)?;
    if sections.is_empty() {
        return Ok(());
    }

    let window = dom::window()?;
    if !js_sys::Reflect::has(&window, &"IntersectionObserver".into()).unwrap_or(false) {
        tracing::debug!("IntersectionObserver unavailable, showing all sections");
        for section in &sections {
            section.class_list().add_1(VISIBLE_CLASS)?;
        }
        return Ok(());
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let _ = entry.target().class_list().add_1(VISIBLE_CLASS);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for section in &sections {
        observer.observe(section);
    }
    tracing::debug!(count = sections.len(), "observing fade-in sections");
    Ok(())
}
