//! Ethereum implementation of the WavePortal boundary: ABI bindings, an
//! EIP-1193 wallet, the contract client, and (feature `http`) a JSON-RPC
//! transport for native hosts.

pub mod abi;
mod client;
#[cfg(feature = "http")]
mod http;
mod logs;
mod rpc;
#[cfg(test)]
mod testing;
mod wallet;

pub use alloy_primitives::Address;
pub use client::{PollSettings, WavePortalClient};
#[cfg(feature = "http")]
pub use http::{HttpTransport, RPC_URL_ENV};
pub use wallet::Eip1193Wallet;

