//! Small one-off page touches: footer year, print button, the
//! additional-fields disclosure and the email tooltip.

use std::cell::Cell;

use web_sys::{Document, Element, HtmlElement};

use crate::dom;
use crate::error::Result;
use crate::timer::ResetTimer;

pub fn set_current_year(document: &Document) {
    if let Some(el) = document.get_element_by_id("year") {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}

/// `#resume-print` opens the browser print dialog.
pub fn setup_resume_actions(document: &Document) -> Result<()> {
    let Some(button) = document.get_element_by_id("resume-print") else {
        return Ok(());
    };
    dom::on(&button, "click", |_| {
        if let Err(e) = dom::window().and_then(|w| Ok(w.print()?)) {
            tracing::warn!("print failed: {e}");
        }
    })
}

/// `aria-label` for the additional-fields toggle.
pub fn disclosure_label(expanded: bool) -> &'static str {
    if expanded {
        "Hide additional fields"
    } else {
        "Discover more"
    }
}

fn apply_disclosure(toggle: &Element, fields: &Element, expanded: bool) -> Result<()> {
    let (show, hide) = if expanded {
        ("opacity-100", "opacity-0")
    } else {
        ("opacity-0", "opacity-100")
    };
    fields.class_list().remove_1(hide)?;
    fields.class_list().add_1(show)?;
    toggle.set_attribute("aria-expanded", if expanded { "true" } else { "false" })?;
    toggle.set_attribute("aria-label", disclosure_label(expanded))?;
    if expanded {
        toggle.class_list().add_1("revealed")?;
    } else {
        toggle.class_list().remove_1("revealed")?;
    }
    Ok(())
}

/// `#toggle-additional-fields` shows and hides `#additional-fields`.
/// Starts collapsed.
pub fn setup_additional_fields_toggle(document: &Document) -> Result<()> {
    let (Some(toggle), Some(fields)) = (
        document.get_element_by_id("toggle-additional-fields"),
        document.get_element_by_id("additional-fields"),
    ) else {
        return Ok(());
    };
    let expanded = Cell::new(false);
    let target = toggle.clone();
    dom::on(&target, "click", move |event| {
        event.prevent_default();
        expanded.set(!expanded.get());
        if let Err(e) = apply_disclosure(&toggle, &fields, expanded.get()) {
            tracing::warn!("additional fields toggle failed: {e}");
        }
    })
}

fn set_tooltip_visible(tooltip: &HtmlElement, visible: bool) -> Result<()> {
    let style = tooltip.style();
    if visible {
        style.set_property("visibility", "visible")?;
        style.set_property("opacity", "1")?;
    } else {
        style.remove_property("visibility")?;
        style.remove_property("opacity")?;
    }
    Ok(())
}

/// Clicking `#email-icon` shows `#email-tooltip` for `reset_ms`.
pub fn setup_email_tooltip(document: &Document, reset_ms: i32) -> Result<()> {
    let (Some(icon), Some(tooltip)) = (
        document.get_element_by_id("email-icon"),
        dom::html_by_id(document, "email-tooltip"),
    ) else {
        return Ok(());
    };
    let mut timer = ResetTimer::new(reset_ms);
    dom::on(&icon, "click", move |event| {
        event.prevent_default();
        if let Err(e) = set_tooltip_visible(&tooltip, true) {
            tracing::warn!("failed to show email tooltip: {e}");
            return;
        }
        let tooltip = tooltip.clone();
        let scheduled = timer.schedule(move || {
            if let Err(e) = set_tooltip_visible(&tooltip, false) {
                tracing::warn!("failed to hide email tooltip: {e}");
            }
        });
        if let Err(e) = scheduled {
            tracing::warn!("failed to schedule tooltip hide: {e}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disclosure_label() {
        assert_eq!(disclosure_label(false), "Discover more");
        assert_eq!(disclosure_label(true), "Hide additional fields");
    }
}
