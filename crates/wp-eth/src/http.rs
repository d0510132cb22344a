use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;
use wp_contract::{ContractError, Result, RpcErrorObject, RpcTransport};

pub const RPC_URL_ENV: &str = "WAVE_PORTAL_RPC_URL";
const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// JSON-RPC over HTTP for hosts without an injected wallet, e.g. a local dev
/// node with unlocked accounts.
///
/// Reads `WAVE_PORTAL_RPC_URL` from environment at construction time
/// (default: `http://localhost:8545`).
pub struct HttpTransport {
    endpoint: String,
    http: reqwest::Client,
    next_id: AtomicU64,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HttpTransport {
    pub fn new(endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .or_else(|| std::env::var(RPC_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[async_trait(?Send)]
impl RpcTransport for HttpTransport {
    async fn request(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(id, method, endpoint = %self.endpoint, "rpc request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| ContractError::Transport(format!("{method}: {err}")))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ContractError::Transport(format!("{method} HTTP {status}: {text}")));
        }

        let reply: JsonRpcResponse = serde_json::from_str(&text)?;
        if let Some(err) = reply.error {
            return Err(err.into());
        }
        Ok(reply.result.unwrap_or(serde_json::Value::Null))
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
