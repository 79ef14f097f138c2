//! Small helpers over `web-sys` shared by every feature.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::{PageError, Result};

pub(crate) fn window() -> Result<Window> {
    web_sys::window().ok_or(PageError::NoWindow)
}

pub(crate) fn document() -> Result<Document> {
    window()?.document().ok_or(PageError::NoDocument)
}

pub(crate) fn js_optional_string(value: &JsValue) -> Option<String> {
    if value.is_null() || value.is_undefined() {
        None
    } else {
        value.as_string()
    }
}

/// Look up an element by id, as an `HtmlElement`.
pub(crate) fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Every element in a `NodeList`, skipping non-element nodes.
pub(crate) fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    Ok(elements(document.query_selector_all(selector)?))
}

pub(crate) fn as_html(elements: Vec<Element>) -> Vec<HtmlElement> {
    elements
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Attach a listener that lives as long as the page.
pub(crate) fn on(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

pub(crate) fn add_classes(element: &Element, classes: &[&str]) -> Result<()> {
    let list = element.class_list();
    for class in classes {
        list.add_1(class)?;
    }
    Ok(())
}

pub(crate) fn remove_classes(element: &Element, classes: &[&str]) -> Result<()> {
    let list = element.class_list();
    for class in classes {
        list.remove_1(class)?;
    }
    Ok(())
}

/// Current `value` of a form control, read without knowing its concrete type.
pub(crate) fn control_value(element: &Element) -> String {
    js_sys::Reflect::get(element, &"value".into())
        .ok()
        .and_then(|v| js_optional_string(&v))
        .unwrap_or_default()
}
