//! Smooth in-page navigation that accounts for the fixed header.

use wasm_bindgen::JsCast;
use web_sys::{Document, FocusOptions, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::dom;
use crate::error::Result;

/// Where to scroll so `target_top` (viewport-relative) lands just below the header.
///
/// Clamped to `[0, scroll_height - viewport_height]`.
pub fn scroll_target(
    scroll_y: f64,
    target_top: f64,
    header_offset: f64,
    scroll_height: f64,
    viewport_height: f64,
) -> f64 {
    let desired = scroll_y + target_top - header_offset;
    let max_scroll = (scroll_height - viewport_height).max(0.0);
    desired.min(max_scroll).max(0.0)
}

/// Rounded-up height of `#header`, or 0 when there is none.
pub fn header_offset(document: &Document) -> f64 {
    document
        .get_element_by_id("header")
        .map(|header| header.get_bounding_client_rect().height().ceil())
        .unwrap_or(0.0)
}

/// Scroll to the element matching `selector`. Returns whether it exists.
pub fn scroll_to_section(document: &Document, selector: &str) -> Result<bool> {
    let Some(target) = document.query_selector(selector).ok().flatten() else {
        return Ok(false);
    };
    let window = dom::window()?;
    let scroll_height = document
        .document_element()
        .map(|root| root.scroll_height())
        .unwrap_or(0);
    let viewport_height = window.inner_height()?.as_f64().unwrap_or(0.0);

    let top = scroll_target(
        window.scroll_y()?,
        target.get_bounding_client_rect().top(),
        header_offset(document),
        f64::from(scroll_height),
        viewport_height,
    );

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);

    target.set_attribute("tabindex", "-1")?;
    if let Some(target) = target.dyn_ref::<HtmlElement>() {
        let focus = FocusOptions::new();
        focus.set_prevent_scroll(true);
        target.focus_with_options(&focus)?;
    }
    Ok(true)
}

/// Intercept `a[href^="#"]` clicks whose target exists.
pub fn setup_smooth_scrolling(document: &Document) -> Result<()> {
    for anchor in dom::query_all(document, "a[href^=\"#\"]")? {
        let doc = document.clone();
        let link = anchor.clone();
        dom::on(&anchor, "click", move |event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            if href == "#" || !matches!(doc.query_selector(&href), Ok(Some(_))) {
                return;
            }
            event.prevent_default();
            if let Err(e) = scroll_to_section(&doc, &href) {
                tracing::warn!(target_id = %href, "smooth scroll failed: {e}");
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_below_header() {
        // Already scrolled 100px, section 500px down the viewport, 80px header.
        assert_eq!(scroll_target(100.0, 500.0, 80.0, 3000.0, 800.0), 520.0);
    }

    #[test]
    fn test_clamps_to_top() {
        assert_eq!(scroll_target(0.0, 20.0, 80.0, 3000.0, 800.0), 0.0);
    }

    #[test]
    fn test_clamps_to_bottom() {
        assert_eq!(scroll_target(2000.0, 900.0, 80.0, 3000.0, 800.0), 2200.0);
    }

    #[test]
    fn test_short_page_never_scrolls() {
        assert_eq!(scroll_target(0.0, 300.0, 0.0, 600.0, 800.0), 0.0);
    }
}
