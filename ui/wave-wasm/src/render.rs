//! Renders the view state into the page.

use crate::dom::{self, Elements};
use wasm_bindgen::prelude::*;
use wp_portal::{ViewState, render_waves};
use wp_types::WaveCard;

const CARD_STYLE: &str = "background-color: OldLace; margin-top: 16px; padding: 8px";

pub fn render_view(els: &Elements, view: &ViewState) -> Result<(), JsValue> {
    dom::set_visible(&els.connect_btn, view.current_account.is_none());
    render_wave_list(els, &render_waves(&view.waves))
}

/// Rebuild the list. Text nodes only, messages are user supplied.
fn render_wave_list(els: &Elements, cards: &[WaveCard]) -> Result<(), JsValue> {
    let container = &els.wave_list;
    container.set_text_content(None);

    for card in cards {
        let el = dom::create_element("div")?;
        el.set_attribute("class", "wave-card")?;
        el.set_attribute("style", CARD_STYLE)?;
        for (label, value) in [
            ("Address", &card.address),
            ("Time", &card.time),
            ("Message", &card.message),
        ] {
            let row = dom::create_element("div")?;
            row.set_text_content(Some(&format!("{label}: {value}")));
            el.append_child(&row)?;
        }
        container.append_child(&el)?;
    }
    Ok(())
}
