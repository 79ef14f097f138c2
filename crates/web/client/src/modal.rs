//! CV modal: fetch on open, close on button, backdrop click or Escape.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent, Node};

use crate::cv::{self, FetchCvSource};
use crate::dom;
use crate::error::Result;

fn hide(modal: &Element) {
    if let Err(e) = modal.class_list().add_1("hidden") {
        tracing::warn!("failed to hide CV modal: {e:?}");
    }
}

pub fn setup_cv_modal(document: &Document, cv_url: &str) -> Result<()> {
    let (Some(open_button), Some(modal), Some(content), Some(close_button)) = (
        document.get_element_by_id("view-ast-cv"),
        document.get_element_by_id("ast-cv-modal"),
        document.get_element_by_id("ast-cv-content"),
        document.get_element_by_id("close-ast-cv"),
    ) else {
        return Ok(());
    };

    {
        let modal = modal.clone();
        let url = cv_url.to_string();
        dom::on(&open_button, "click", move |_| {
            let modal = modal.clone();
            let content = content.clone();
            let url = url.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let html = cv::load_cv_html(&FetchCvSource, &url).await;
                content.set_inner_html(&html);
                if let Err(e) = modal.class_list().remove_1("hidden") {
                    tracing::warn!("failed to show CV modal: {e:?}");
                }
            });
        })?;
    }

    {
        let modal = modal.clone();
        dom::on(&close_button, "click", move |_| hide(&modal))?;
    }

    {
        let backdrop = modal.clone();
        dom::on(&modal, "click", move |event| {
            let target = event.target();
            let on_backdrop = target
                .as_ref()
                .and_then(|t| t.dyn_ref::<Node>())
                .is_some_and(|node| backdrop.is_same_node(Some(node)));
            if on_backdrop {
                hide(&backdrop);
            }
        })?;
    }

    dom::on(document, "keydown", move |event| {
        let escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|e| e.key() == "Escape");
        if escape {
            hide(&modal);
        }
    })
}
