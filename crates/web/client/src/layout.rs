//! Equal-height cards and the skills divider.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::dom;
use crate::error::Result;

pub const PROJECT_CARD_SELECTOR: &str = ".project-card";
pub const SKILL_CARD_SELECTOR: &str = ".skills-grid > div";
const SKILLS_GRID_SELECTOR: &str = "#skills .bg-white .skills-grid";

/// Tallest of the given heights, 0 for none.
pub fn tallest(heights: impl IntoIterator<Item = i32>) -> i32 {
    heights.into_iter().max().unwrap_or(0).max(0)
}

/// Divider height in CSS pixels for a skills grid of `grid_height`.
pub fn divider_height(grid_height: i32, scale: f64) -> f64 {
    f64::from(grid_height) * scale
}

/// Reset every match to its natural height, then size them all to the tallest.
pub fn equalize_heights(document: &Document, selector: &str) -> Result<()> {
    let cards = dom::as_html(dom::query_all(document, selector)?);
    if cards.is_empty() {
        return Ok(());
    }
    for card in &cards {
        card.style().set_property("height", "auto")?;
    }
    let max = tallest(cards.iter().map(HtmlElement::offset_height));
    let height = format!("{max}px");
    for card in &cards {
        card.style().set_property("height", &height)?;
    }
    Ok(())
}

pub fn adjust_divider_height(document: &Document, scale: f64) -> Result<()> {
    let Some(divider) = dom::html_by_id(document, "skills-divider") else {
        return Ok(());
    };
    let grid = document
        .query_selector(SKILLS_GRID_SELECTOR)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(grid) = grid {
        let height = divider_height(grid.offset_height(), scale);
        divider.style().set_property("height", &format!("{height}px"))?;
    }
    Ok(())
}

fn equalize_all(document: &Document, divider_scale: f64) -> Result<()> {
    equalize_heights(document, PROJECT_CARD_SELECTOR)?;
    equalize_heights(document, SKILL_CARD_SELECTOR)?;
    adjust_divider_height(document, divider_scale)
}

/// Re-run equalization on `load` and `resize`.
pub fn setup_height_equalization(document: &Document, divider_scale: f64) -> Result<()> {
    let window = dom::window()?;

    // The module can finish loading after the window `load` event.
    if document.ready_state() == "complete" {
        equalize_all(document, divider_scale)?;
    }

    for event in ["load", "resize"] {
        let doc = document.clone();
        dom::on(&window, event, move |_| {
            if let Err(e) = equalize_all(&doc, divider_scale) {
                tracing::warn!("height equalization failed: {e}");
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tallest() {
        assert_eq!(tallest([120, 340, 200]), 340);
        assert_eq!(tallest(Vec::new()), 0);
        assert_eq!(tallest([0, 0]), 0);
    }

    #[test]
    fn test_divider_height() {
        assert_eq!(divider_height(400, 1.35), 540.0);
        assert_eq!(divider_height(0, 1.35), 0.0);
    }
}
