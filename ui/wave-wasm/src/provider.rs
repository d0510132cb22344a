//! The wallet-injected `window.ethereum` object as an [`RpcTransport`].

use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use serde::Serialize;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wp_contract::{ContractError, Result, RpcErrorObject, RpcTransport};

pub struct InjectedProvider {
    ethereum: JsValue,
}

impl InjectedProvider {
    /// `None` when no wallet extension injected itself into the page.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self { ethereum })
    }

    fn request_fn(&self) -> Result<Function> {
        Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or_else(|| {
                ContractError::Transport("ethereum.request is not a function".to_owned())
            })
    }
}

#[async_trait(?Send)]
impl RpcTransport for InjectedProvider {
    async fn request(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let params = params
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| ContractError::Decode(err.to_string()))?;

        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(provider_error)?;
        Reflect::set(&args, &JsValue::from_str("params"), &params).map_err(provider_error)?;

        let returned = self
            .request_fn()?
            .call1(&self.ethereum, &args)
            .map_err(provider_error)?;
        let value = JsFuture::from(Promise::resolve(&returned))
            .await
            .map_err(provider_error)?;

        serde_wasm_bindgen::from_value(value).map_err(|err| ContractError::Decode(err.to_string()))
    }

    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// EIP-1193 rejections carry `{ code, message }`; anything else is a
/// transport failure.
fn provider_error(err: JsValue) -> ContractError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64());
    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{err:?}"));

    match code {
        Some(code) => RpcErrorObject {
            code: code as i64,
            message,
        }
        .into(),
        None => ContractError::Transport(message),
    }
}
