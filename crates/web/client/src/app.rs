//! Page bootstrap: wire every feature once the DOM is ready.

use web_sys::Document;

use crate::config::PageConfig;
use crate::error::Result;
use crate::{dom, extras, fade_in, form, highlight, layout, logging, menu, modal, scroll, theme};

/// Run one feature setup. A failing feature is logged and skipped so the
/// rest of the page still works.
fn run_setup(name: &str, setup: impl FnOnce() -> Result<()>) {
    match setup() {
        Ok(()) => tracing::trace!(feature = name, "ready"),
        Err(e) => tracing::warn!(feature = name, "setup failed: {e}"),
    }
}

/// Wire all features against `document`.
pub fn boot(document: &Document, config: &PageConfig) {
    run_setup("theme", || theme::setup_theme_toggle(document));
    extras::set_current_year(document);
    run_setup("mobile_menu", || menu::setup_mobile_menu(document));
    run_setup("fade_in", || {
        fade_in::setup_fade_in_sections(document, config.fade_in_threshold)
    });
    run_setup("contact_form", || form::setup_contact_form(document));
    run_setup("smooth_scroll", || scroll::setup_smooth_scrolling(document));
    run_setup("resume", || extras::setup_resume_actions(document));
    run_setup("cv_modal", || modal::setup_cv_modal(document, &config.cv_url));
    run_setup("nav_styles", || menu::setup_nav_styles(document));
    run_setup("field_buttons", || {
        highlight::setup_field_buttons(document, config.highlight_reset_ms)
    });
    run_setup("additional_fields", || {
        extras::setup_additional_fields_toggle(document)
    });
    run_setup("email_tooltip", || {
        extras::setup_email_tooltip(document, config.tooltip_reset_ms)
    });
    run_setup("equal_heights", || {
        layout::setup_height_equalization(document, config.divider_scale)
    });
    tracing::info!("portfolio page ready");
}

/// Load config, start logging and boot now or on `DOMContentLoaded`.
pub fn start() -> Result<()> {
    let (config, config_problem) = PageConfig::from_window();
    logging::init(&config.log_level);
    if let Some(problem) = config_problem {
        tracing::warn!("{problem}; using defaults");
    }

    let document = dom::document()?;
    if document.ready_state() == "loading" {
        let doc = document.clone();
        let mut config = Some(config);
        dom::on(&document, "DOMContentLoaded", move |_| {
            if let Some(config) = config.take() {
                boot(&doc, &config);
            }
        })?;
    } else {
        boot(&document, &config);
    }
    Ok(())
}
