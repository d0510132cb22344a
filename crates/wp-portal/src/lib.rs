//! Wave portal front-end core: view state, rendering, and the controllers
//! that drive a wallet and the WavePortal contract.
//!
//! Host-agnostic. The browser crate supplies the wallet, the contract
//! client, and an executor for the live feed.

pub mod config;
pub mod live;
pub mod portal;
pub mod render;
pub mod store;


pub use config::PortalConfig;
pub use live::{LiveFeed, SubscriptionGuard};
pub use portal::{ConnectOutcome, Portal};
pub use render::{render_wave, render_waves};
pub use store::{ViewState, ViewStore};
