//! Boundary between the portal and the outside world: the injected wallet,
//! the deployed WavePortal contract, and the JSON-RPC channel both sit behind.
//!
//! Everything here is `?Send`; the portal runs on a single cooperative
//! executor (the browser event loop, or a current-thread runtime natively).

use async_trait::async_trait;
use futures::stream::LocalBoxStream;
use serde::Deserialize;
use std::time::Duration;
use wp_types::{NewWaveEvent, PendingWave, WalletAddress, Wave, WaveReceipt};

/// EIP-1193 code for a request the user declined.
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("request rejected by the user: {0}")]
    Rejected(String),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("wallet has no authorized account")]
    NoAccount,
    #[error("transaction {0} reverted")]
    Reverted(String),
    #[error("transaction {hash} not mined within {waited:?}")]
    Timeout { hash: String, waited: Duration },
}

/// Error object as returned by an EIP-1193 provider or a JSON-RPC node.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl From<RpcErrorObject> for ContractError {
    fn from(err: RpcErrorObject) -> Self {
        if err.code == USER_REJECTED_CODE {
            ContractError::Rejected(err.message)
        } else {
            ContractError::Rpc {
                code: err.code,
                message: err.message,
            }
        }
    }
}

impl From<serde_json::Error> for ContractError {
    fn from(err: serde_json::Error) -> Self {
        ContractError::Decode(err.to_string())
    }
}

pub type Result<T, E = ContractError> = std::result::Result<T, E>;

/// A raw `request({ method, params })` channel plus the host's timer.
#[async_trait(?Send)]
pub trait RpcTransport {
    async fn request(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value>;
    async fn sleep(&self, duration: Duration);
}

#[async_trait(?Send)]
pub trait WalletAdapter {
    /// Accounts the user already authorized. Never prompts.
    async fn authorized_accounts(&self) -> Result<Vec<WalletAddress>>;
    /// Asks the wallet for authorization. May show a prompt.
    async fn request_accounts(&self) -> Result<Vec<WalletAddress>>;
}

#[async_trait(?Send)]
pub trait WaveContract {
    async fn get_all_waves(&self) -> Result<Vec<Wave>>;
    async fn get_total_waves(&self) -> Result<u64>;
    async fn wave(&self, message: &str, gas_limit: u64) -> Result<PendingWave>;
    /// Resolves once the transaction is mined.
    async fn confirm(&self, pending: &PendingWave) -> Result<WaveReceipt>;
    /// Every `NewWave` emitted after the stream is first polled.
    fn new_waves(&self) -> LocalBoxStream<'static, Result<NewWaveEvent>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_code_maps_to_rejected() {
        let err: ContractError = serde_json::from_str::<RpcErrorObject>(
            r#"{"code":4001,"message":"User rejected the request."}"#,
        )
        .unwrap()
        .into();
        assert_eq!(err, ContractError::Rejected("User rejected the request.".to_owned()));
    }

    #[test]
    fn other_codes_map_to_rpc() {
        let err: ContractError = RpcErrorObject {
            code: -32000,
            message: "execution reverted".to_owned(),
        }
        .into();
        assert!(matches!(err, ContractError::Rpc { code: -32000, .. }));
    }
}
