//! Portfolio Web - page interactivity
//!
//! Theme switch, mobile menu, fade-in sections, contact form, smooth
//! scrolling, equal-height cards, skill highlighting and the CV modal for a
//! single static portfolio page.

use wasm_bindgen::prelude::*;

mod app;
pub mod config;
pub mod cv;
mod dom;
pub mod error;
pub mod extras;
pub mod fade_in;
pub mod form;
pub mod highlight;
pub mod layout;
pub mod logging;
pub mod menu;
pub mod modal;
pub mod scroll;
pub mod theme;
pub mod timer;
pub mod validation;

pub use app::boot;
pub use config::PageConfig;
pub use error::{PageError, Result};

#[wasm_bindgen(start)]
pub fn main() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    app::start().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render CV JSON to the modal markup, or the fixed failure markup.
#[wasm_bindgen]
pub fn render_cv(json: &str) -> String {
    match cv::CvDocument::from_json(json) {
        Ok(cv) => cv.render_html(),
        Err(e) => {
            tracing::warn!("invalid CV JSON: {e}");
            cv::CV_LOAD_ERROR_HTML.to_string()
        }
    }
}

/// Validate one contact field; returns the error message, or nothing if valid.
#[wasm_bindgen]
pub fn validate_contact_field(name: &str, value: &str) -> Option<String> {
    validation::validate_field(name, value)
        .err()
        .map(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_cv_falls_back_on_bad_json() {
        assert_eq!(render_cv("not json"), cv::CV_LOAD_ERROR_HTML);
        assert_eq!(render_cv("42"), cv::CV_LOAD_ERROR_HTML);
    }

    #[test]
    fn test_render_cv_languages() {
        let html = render_cv(r#"{"languages": ["Arabic"]}"#);
        assert!(html.contains(">Languages</h4>Arabic</div>"));
    }

    #[test]
    fn test_validate_contact_field() {
        assert_eq!(validate_contact_field("email", "jane@example.com"), None);
        assert_eq!(
            validate_contact_field("message", "hi").as_deref(),
            Some("Message must be at least 10 characters long")
        );
    }
}
