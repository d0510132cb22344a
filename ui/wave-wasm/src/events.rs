//! Event binding.
//!
//! Async handlers are spawned via `wasm_bindgen_futures::spawn_local`.

use crate::dom::{self, Elements};
use crate::state::{self, AppPortal};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wp_portal::ConnectOutcome;

/// Helper: attach async click handler to an HtmlElement.
macro_rules! on_click_async {
    ($el:expr, $portal:expr, $handler:expr) => {{
        let portal = Rc::clone($portal);
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let portal = Rc::clone(&portal);
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&portal).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Helper: attach sync handler for a plain event.
macro_rules! on_event {
    ($target:expr, $name:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::Event)>);
        $target.add_event_listener_with_callback($name, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements, portal: &Rc<AppPortal>) -> Result<(), JsValue> {
    // ── Draft ──
    {
        let portal = Rc::clone(portal);
        let input = els.message_input.clone();
        on_event!(els.message_input, "input", move |_: web_sys::Event| {
            portal.store().set_draft(input.value());
        });
    }

    // ── Actions ──
    on_click_async!(els.wave_btn, portal, on_wave);
    on_click_async!(els.connect_btn, portal, on_connect);

    // ── Mount lifecycle ──
    let window = dom::window()?;
    on_event!(window, "pagehide", move |_: web_sys::Event| {
        state::unmount();
    });
    {
        let portal = Rc::clone(portal);
        on_event!(window, "pageshow", move |_: web_sys::Event| {
            state::mount(&portal);
        });
    }

    Ok(())
}

async fn on_wave(portal: &AppPortal) {
    portal.wave().await;
}

async fn on_connect(portal: &AppPortal) {
    if portal.connect_wallet().await == ConnectOutcome::WalletMissing {
        if let Ok(window) = dom::window() {
            let _ = window.alert_with_message("Get MetaMask!");
        }
    }
}
