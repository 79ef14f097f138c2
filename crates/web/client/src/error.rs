//! Error types for the portfolio page client.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Errors raised while wiring or running page features.
#[derive(Error, Debug)]
pub enum PageError {
    /// No global `window` (not running in a browser).
    #[error("no window available")]
    NoWindow,

    /// The window has no document.
    #[error("no document available")]
    NoDocument,

    /// A required element is not on the page.
    #[error("element not found: {0}")]
    MissingElement(String),

    /// A JavaScript call threw or rejected.
    #[error("JavaScript error: {0}")]
    Js(String),

    /// The server answered with a non-OK status.
    #[error("HTTP request failed with status {0}")]
    Http(u16),

    /// JSON was malformed or had the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Form fields could not be url-encoded.
    #[error("form encoding error: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return PageError::Js(String::from(err.message()));
        }
        let message = value
            .as_string()
            .or_else(|| js_sys::JSON::stringify(&value).ok().map(String::from))
            .unwrap_or_else(|| "unknown error".to_string());
        PageError::Js(message)
    }
}

/// Result type for page operations.
pub type Result<T> = std::result::Result<T, PageError>;
