//! Mobile navigation menu and nav link styling.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Node};

use crate::dom;
use crate::error::Result;

const NAV_LINK_CLASSES: &[&str] = &[
    "text-sm",
    "font-semibold",
    "tracking-wider",
    "uppercase",
    "hover:text-kemet-gold",
    "focus-visible:outline-none",
    "focus-visible:ring-2",
    "focus-visible:ring-kemet-gold",
    "rounded-md",
    "transition-colors",
    "duration-300",
];

const MOBILE_NAV_LINK_CLASSES: &[&str] = &[
    "block",
    "py-3",
    "px-6",
    "text-sm",
    "hover:bg-kemet-gold/20",
    "focus:bg-kemet-gold/20",
    "focus-visible:outline-none",
    "transition-colors",
    "duration-200",
];

#[derive(Clone)]
struct MobileMenu {
    button: Element,
    menu: Element,
}

impl MobileMenu {
    fn is_open(&self) -> bool {
        !self.menu.class_list().contains("hidden")
    }

    fn toggle(&self) -> Result<()> {
        let expanded = self.button.get_attribute("aria-expanded").as_deref() == Some("true");
        self.menu.class_list().toggle("hidden")?;
        self.button
            .set_attribute("aria-expanded", if expanded { "false" } else { "true" })?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.menu.class_list().add_1("hidden")?;
        self.button.set_attribute("aria-expanded", "false")?;
        Ok(())
    }

    fn contains(&self, node: Option<&Node>) -> bool {
        self.menu.contains(node) || self.button.contains(node)
    }
}

fn log_failure(result: Result<()>) {
    if let Err(e) = result {
        tracing::warn!("mobile menu update failed: {e}");
    }
}

/// Wire `#mobileMenuButton` / `#mobile-menu`.
pub fn setup_mobile_menu(document: &Document) -> Result<()> {
    let (Some(button), Some(menu)) = (
        document.get_element_by_id("mobileMenuButton"),
        document.get_element_by_id("mobile-menu"),
    ) else {
        return Ok(());
    };
    let mobile = MobileMenu { button, menu };

    {
        let mobile_menu = mobile.clone();
        dom::on(&mobile.button, "click", move |_| log_failure(mobile_menu.toggle()))?;
    }

    for link in dom::elements(mobile.menu.query_selector_all("a")?) {
        let mobile_menu = mobile.clone();
        dom::on(&link, "click", move |_| log_failure(mobile_menu.close()))?;
    }

    dom::on(document, "click", move |event| {
        let target = event.target();
        let node = target.as_ref().and_then(|t| t.dyn_ref::<Node>());
        if !mobile.contains(node) && mobile.is_open() {
            log_failure(mobile.close());
        }
    })
}

/// Apply the shared class sets to `.nav-link` and `.mobile-nav-link`.
pub fn setup_nav_styles(document: &Document) -> Result<()> {
    for link in dom::query_all(document, ".nav-link")? {
        dom::add_classes(&link, NAV_LINK_CLASSES)?;
    }
    for link in dom::query_all(document, ".mobile-nav-link")? {
        dom::add_classes(&link, MOBILE_NAV_LINK_CLASSES)?;
    }
    Ok(())
}
