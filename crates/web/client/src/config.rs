//! Page configuration.
//!
//! The host page may define a global `PORTFOLIO_CONFIG` object to override
//! any of these values:
//!
//! ```html
//! <script>
//!   window.PORTFOLIO_CONFIG = { cvUrl: "cv.json", highlightResetMs: 1500 };
//! </script>
//! ```
//!
//! Missing keys keep their defaults.

use serde::Deserialize;

use crate::error::Result;

/// Name of the global object read by [`PageConfig::from_window`].
pub const CONFIG_GLOBAL: &str = "PORTFOLIO_CONFIG";

/// Tunables for the page features.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Relative path of the CV JSON file shown in the modal
    #[serde(default = "default_cv_url")]
    pub cv_url: String,

    /// Visible fraction at which a fade-in section is revealed
    #[serde(default = "default_fade_in_threshold")]
    pub fade_in_threshold: f64,

    /// How long skill highlights stay on after a field button click
    #[serde(default = "default_highlight_reset_ms")]
    pub highlight_reset_ms: i32,

    /// How long the email tooltip stays visible
    #[serde(default = "default_tooltip_reset_ms")]
    pub tooltip_reset_ms: i32,

    /// Skills divider height as a multiple of the skills grid height
    #[serde(default = "default_divider_scale")]
    pub divider_scale: f64,

    /// Console log level (`error`, `warn`, `info`, `debug`, `trace`)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            cv_url: default_cv_url(),
            fade_in_threshold: default_fade_in_threshold(),
            highlight_reset_ms: default_highlight_reset_ms(),
            tooltip_reset_ms: default_tooltip_reset_ms(),
            divider_scale: default_divider_scale(),
            log_level: default_log_level(),
        }
    }
}

impl PageConfig {
    /// Parse a JSON object, filling defaults for missing keys.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read `window.PORTFOLIO_CONFIG`, falling back to defaults.
    ///
    /// Runs before logging is initialized, so problems are reported back to
    /// the caller instead of logged here.
    pub fn from_window() -> (Self, Option<String>) {
        let Some(window) = web_sys::window() else {
            return (Self::default(), None);
        };
        let value = match js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into()) {
            Ok(v) if !v.is_undefined() && !v.is_null() => v,
            _ => return (Self::default(), None),
        };
        let json = match js_sys::JSON::stringify(&value) {
            Ok(s) => String::from(s),
            Err(_) => {
                return (
                    Self::default(),
                    Some(format!("{CONFIG_GLOBAL} is not serializable")),
                );
            }
        };
        match Self::from_json(&json) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(format!("invalid {CONFIG_GLOBAL}: {e}"))),
        }
    }
}

fn default_cv_url() -> String {
    "Muaz_Al_Jabali_CV.json".to_string()
}

fn default_fade_in_threshold() -> f64 {
    0.15
}

fn default_highlight_reset_ms() -> i32 {
    1000
}

fn default_tooltip_reset_ms() -> i32 {
    2000
}

fn default_divider_scale() -> f64 {
    1.35
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.cv_url, "Muaz_Al_Jabali_CV.json");
        assert_eq!(config.fade_in_threshold, 0.15);
        assert_eq!(config.highlight_reset_ms, 1000);
        assert_eq!(config.tooltip_reset_ms, 2000);
    }

    #[test]
    fn test_partial_override() {
        let config =
            PageConfig::from_json(r#"{"cvUrl": "cv/me.json", "highlightResetMs": 2500}"#).unwrap();
        assert_eq!(config.cv_url, "cv/me.json");
        assert_eq!(config.highlight_reset_ms, 2500);
        assert_eq!(config.divider_scale, 1.35);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(PageConfig::from_json(r#"{"fadeInThreshold": "high"}"#).is_err());
        assert!(PageConfig::from_json("[1, 2]").is_err());
    }
}
