//! Wave Portal WASM Frontend
//!
//! Connect an injected Ethereum wallet, wave at the WavePortal contract,
//! and watch every wave arrive live.

pub mod console;
pub mod dom;
pub mod events;
pub mod provider;
pub mod render;
pub mod state;

use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wp_portal::ViewStore;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();
    console::init();

    init().await
}

/// Main initialisation sequence.
async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let config = state::load_config();
    let store = ViewStore::new();

    // Re-render on every state change
    {
        let els = els.clone();
        store.subscribe(move |view| {
            if let Err(err) = render::render_view(&els, view) {
                warn!(?err, "render failed");
            }
        });
    }
    store.with(|view| render::render_view(&els, view))?;

    let portal = Rc::new(state::build_portal(config, store)?);
    events::bind_events(&els, &portal)?;

    // Live updates for as long as the page is shown
    state::mount(&portal);

    portal.check_if_wallet_is_connected().await;

    Ok(())
}
