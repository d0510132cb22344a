//! Application wiring and the mounted live feed.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).

use crate::dom;
use crate::provider::InjectedProvider;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{error, info, warn};
use wasm_bindgen::JsValue;
use wp_eth::{Address, Eip1193Wallet, PollSettings, WavePortalClient};
use wp_portal::{Portal, PortalConfig, SubscriptionGuard, ViewStore};

pub type AppPortal = Portal<Eip1193Wallet<InjectedProvider>, WavePortalClient<InjectedProvider>>;

const CONFIG_META: &str = "meta[name='wave-portal-config']";

thread_local! {
    static MOUNTED: RefCell<Option<SubscriptionGuard>> = const { RefCell::new(None) };
}

/// Defaults, overridden by `<meta name="wave-portal-config" content="{...}">`.
pub fn load_config() -> PortalConfig {
    let Some(meta) = dom::query(CONFIG_META) else {
        return PortalConfig::default();
    };
    let raw = meta.get_attribute("content").unwrap_or_default();
    PortalConfig::from_json(&raw).unwrap_or_else(|err| {
        warn!("{err:#}; using defaults");
        PortalConfig::default()
    })
}

fn poll_settings(config: &PortalConfig) -> PollSettings {
    PollSettings {
        receipt_poll_interval: config.receipt_poll_interval(),
        receipt_timeout: config.receipt_timeout(),
        event_poll_interval: config.event_poll_interval(),
    }
}

/// The wallet is captured here, once, and injected into the portal.
///
/// An unusable contract address is a startup error. It never degrades into
/// the no-wallet state.
pub fn build_portal(config: PortalConfig, store: Rc<ViewStore>) -> Result<AppPortal, JsValue> {
    let address = config.contract_address.parse::<Address>().map_err(|err| {
        error!(%err, address = %config.contract_address, "invalid contract address");
        JsValue::from_str(&format!("invalid contract address: {err}"))
    })?;

    let backend = InjectedProvider::detect().map(|provider| {
        info!(%address, "found injected wallet");
        let transport = Rc::new(provider);
        (
            Eip1193Wallet::new(Rc::clone(&transport)),
            WavePortalClient::new(transport, address, poll_settings(&config)),
        )
    });
    Ok(Portal::new(backend, store, config))
}

/// Attach the live feed unless it is already attached.
pub fn mount(portal: &AppPortal) {
    if MOUNTED.with(|m| m.borrow().is_some()) {
        return;
    }
    let Some(feed) = portal.mount() else {
        return;
    };
    let (guard, pump) = feed.into_parts();
    wasm_bindgen_futures::spawn_local(pump);
    MOUNTED.with(|m| *m.borrow_mut() = Some(guard));
}

/// Detach the live feed. Dropping the guard stops the pump.
pub fn unmount() {
    let guard = MOUNTED.with(|m| m.borrow_mut().take());
    drop(guard);
}
