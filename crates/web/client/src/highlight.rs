//! Field buttons that highlight matching skill cards for a moment.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{Document, Element};

use crate::dom;
use crate::error::Result;
use crate::scroll;
use crate::timer::ResetTimer;

pub const FIELD_BUTTON_SELECTOR: &str = ".field-button";
pub const SKILL_CARD_SELECTOR: &str = "[data-fields]";
pub const HIGHLIGHT_CLASS: &str = "skill-highlight";
pub const DIMMED_CLASS: &str = "skill-dimmed";

/// The disclosure toggle shares the button styling but is not a filter.
const ADDITIONAL_FIELDS_TOGGLE_ID: &str = "toggle-additional-fields";

/// Tags in a card's `data-fields`, separated by commas and/or whitespace.
pub fn card_tags(data_fields: &str) -> impl Iterator<Item = &str> {
    data_fields
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tag| !tag.is_empty())
}

pub fn card_matches(data_fields: &str, field: &str) -> bool {
    !field.is_empty() && card_tags(data_fields).any(|tag| tag == field)
}

fn set_pressed(button: &Element, pressed: bool) -> Result<()> {
    button.set_attribute("aria-pressed", if pressed { "true" } else { "false" })?;
    if pressed {
        button.class_list().add_1("active")?;
    } else {
        button.class_list().remove_1("active")?;
    }
    Ok(())
}

fn release_all(buttons: &[Element]) -> Result<()> {
    for button in buttons {
        set_pressed(button, false)?;
    }
    Ok(())
}

fn highlight_cards(cards: &[Element], field: &str) -> Result<()> {
    for card in cards {
        let tags = card.get_attribute("data-fields").unwrap_or_default();
        let list = card.class_list();
        if card_matches(&tags, field) {
            list.add_1(HIGHLIGHT_CLASS)?;
            list.remove_1(DIMMED_CLASS)?;
        } else {
            list.remove_1(HIGHLIGHT_CLASS)?;
            list.add_1(DIMMED_CLASS)?;
        }
    }
    Ok(())
}

fn clear_highlights(buttons: &[Element], cards: &[Element]) -> Result<()> {
    release_all(buttons)?;
    for card in cards {
        dom::remove_classes(card, &[HIGHLIGHT_CLASS, DIMMED_CLASS])?;
    }
    Ok(())
}

fn on_field_click(
    document: &Document,
    buttons: &Rc<Vec<Element>>,
    button: &Element,
    timer: &RefCell<ResetTimer>,
) -> Result<()> {
    release_all(buttons)?;
    set_pressed(button, true)?;

    let field = button.get_attribute("data-field").unwrap_or_default();
    scroll::scroll_to_section(document, "#skills")?;

    let cards = dom::query_all(document, SKILL_CARD_SELECTOR)?;
    highlight_cards(&cards, &field)?;
    tracing::debug!(field = %field, cards = cards.len(), "skills highlighted");

    let buttons = Rc::clone(buttons);
    timer.borrow_mut().schedule(move || {
        if let Err(e) = clear_highlights(&buttons, &cards) {
            tracing::warn!("failed to clear skill highlights: {e}");
        }
    })
}

pub fn setup_field_buttons(document: &Document, reset_ms: i32) -> Result<()> {
    let buttons = Rc::new(dom::query_all(document, FIELD_BUTTON_SELECTOR)?);
    if buttons.is_empty() {
        return Ok(());
    }
    let timer = Rc::new(RefCell::new(ResetTimer::new(reset_ms)));

    for button in buttons.iter() {
        if button.id() == ADDITIONAL_FIELDS_TOGGLE_ID {
            continue;
        }
        let doc = document.clone();
        let all = Rc::clone(&buttons);
        let this = button.clone();
        let timer = Rc::clone(&timer);
        dom::on(button, "click", move |_| {
            if let Err(e) = on_field_click(&doc, &all, &this, &timer) {
                tracing::warn!("field button failed: {e}");
            }
        })?;
    }
    Ok(())
}
