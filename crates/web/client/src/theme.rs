//! Dark/light theme switch, persisted in local storage.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element, HtmlElement};

use crate::dom;
use crate::error::Result;

/// Local storage key holding `"dark"` or `"light"`.
pub const THEME_STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Only an explicit `"light"` selects the light theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    fn knob_transform(self) -> &'static str {
        match self {
            Theme::Dark => "translateX(20px)",
            Theme::Light => "translateX(0)",
        }
    }

    fn icon_class(self) -> &'static str {
        match self {
            Theme::Dark => "fa fa-moon text-xs text-dark-bg-primary",
            Theme::Light => "fa fa-sun text-xs text-white",
        }
    }
}

/// Where the theme preference lives between visits.
pub trait ThemeStore {
    fn load(&self) -> Option<String>;
    fn save(&self, theme: Theme) -> Result<()>;
}

/// `window.localStorage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl ThemeStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        let storage = dom::window().ok()?.local_storage().ok()??;
        storage.get_item(THEME_STORAGE_KEY).ok()?
    }

    fn save(&self, theme: Theme) -> Result<()> {
        if let Some(storage) = dom::window()?.local_storage()? {
            storage.set_item(THEME_STORAGE_KEY, theme.as_str())?;
        }
        Ok(())
    }
}

/// In-memory store, for hosts without storage access.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: RefCell::new(Some(value.to_string())),
        }
    }
}

impl ThemeStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn save(&self, theme: Theme) -> Result<()> {
        *self.value.borrow_mut() = Some(theme.as_str().to_string());
        Ok(())
    }
}

/// Current theme plus the store it persists to.
pub struct ThemeState<S: ThemeStore> {
    store: S,
    theme: Theme,
}

impl<S: ThemeStore> ThemeState<S> {
    pub fn load(store: S) -> Self {
        let theme = Theme::from_stored(store.load().as_deref());
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Flip the theme and persist the new value.
    pub fn toggle(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        self.store.save(self.theme)?;
        Ok(self.theme)
    }
}

struct ThemeElements {
    root: Element,
    knob: Option<HtmlElement>,
    icon: Option<Element>,
}

impl ThemeElements {
    fn apply(&self, theme: Theme) -> Result<()> {
        if theme.is_dark() {
            self.root.class_list().add_1("dark")?;
        } else {
            self.root.class_list().remove_1("dark")?;
        }
        if let Some(knob) = &self.knob {
            knob.style().set_property("transform", theme.knob_transform())?;
        }
        if let Some(icon) = &self.icon {
            icon.set_class_name(theme.icon_class());
        }
        Ok(())
    }
}

/// Apply the stored theme and wire `#themeToggle`.
///
/// The stored theme is applied even when the toggle is absent.
pub fn setup_theme_toggle(document: &Document) -> Result<()> {
    let Some(root) = document.document_element() else {
        return Ok(());
    };
    let elements = ThemeElements {
        root,
        knob: dom::html_by_id(document, "themeSwitchKnob"),
        icon: document.get_element_by_id("knobIcon"),
    };

    let state = ThemeState::load(LocalStorageStore);
    elements.apply(state.theme())?;
    tracing::debug!(theme = state.theme().as_str(), "theme applied");

    let Some(toggle) = document.get_element_by_id("themeToggle") else {
        return Ok(());
    };
    let state = Rc::new(RefCell::new(state));
    dom::on(&toggle, "click", move |_| {
        let mut state = state.borrow_mut();
        if let Err(e) = state.toggle() {
            tracing::warn!("failed to persist theme: {e}");
        }
        if let Err(e) = elements.apply(state.theme()) {
            tracing::warn!("failed to apply theme: {e}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::from_stored(None), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("sepia")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("")), Theme::Dark);
    }

    #[test]
    fn test_explicit_light() {
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
    }

    #[test]
    fn test_toggle_persists() {
        let mut state = ThemeState::load(MemoryStore::default());
        assert_eq!(state.theme(), Theme::Dark);
        assert_eq!(state.toggle().unwrap(), Theme::Light);
        assert_eq!(state.store().load().as_deref(), Some("light"));
    }

    #[test]
    fn test_toggle_twice_restores_persisted_value() {
        for stored in ["dark", "light"] {
            let mut state = ThemeState::load(MemoryStore::with_value(stored));
            let original = state.theme();
            state.toggle().unwrap();
            state.toggle().unwrap();
            assert_eq!(state.theme(), original);
            assert_eq!(state.store().load().as_deref(), Some(stored));
        }
    }

    #[test]
    fn test_visuals_differ_per_theme() {
        assert_eq!(Theme::Dark.knob_transform(), "translateX(20px)");
        assert_eq!(Theme::Light.knob_transform(), "translateX(0)");
        assert!(Theme::Dark.icon_class().contains("fa-moon"));
        assert!(Theme::Light.icon_class().contains("fa-sun"));
    }
}
