//! DOM element bindings.
//!
//! All fields are resolved once at startup.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

// ── Helpers ──

pub fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().ok()?.query_selector(selector).ok()?
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()?.create_element(tag)
}

pub fn set_visible(el: &HtmlElement, visible: bool) {
    let _ = el
        .style()
        .set_property("display", if visible { "" } else { "none" });
}

// ── Elements struct ──

/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    pub message_input: HtmlInputElement,
    pub wave_btn: HtmlElement,
    pub connect_btn: HtmlElement,
    pub wave_list: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            message_input: get_input!("message"),
            wave_btn: get_html!("waveBtn"),
            connect_btn: get_html!("connectBtn"),
            wave_list: get_el!("waveList"),
        })
    }
}
