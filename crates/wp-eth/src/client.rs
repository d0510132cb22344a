use crate::abi::{getAllWavesCall, getTotalWavesCall, waveCall};
use crate::logs::LogPoller;
use crate::rpc::{self, RpcReceipt};
use alloy_primitives::{Address, B256, Bytes};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use futures::stream::LocalBoxStream;
use serde_json::json;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};
use wp_contract::{ContractError, Result, RpcTransport, WaveContract};
use wp_types::{NewWaveEvent, PendingWave, TxHash, Wave, WaveReceipt};

/// Polling cadence for receipts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub receipt_poll_interval: Duration,
    pub receipt_timeout: Duration,
    pub event_poll_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            receipt_poll_interval: Duration::from_secs(4),
            receipt_timeout: Duration::from_secs(300),
            event_poll_interval: Duration::from_secs(4),
        }
    }
}

/// Typed proxy over one deployed WavePortal contract.
///
/// Reads go through `eth_call`; the write is handed to the wallet with
/// `eth_sendTransaction`, which signs it with the first authorized account.
pub struct WavePortalClient<T> {
    transport: Rc<T>,
    address: Address,
    settings: PollSettings,
}

impl<T: RpcTransport + 'static> WavePortalClient<T> {
    pub fn new(transport: Rc<T>, address: Address, settings: PollSettings) -> Self {
        Self {
            transport,
            address,
            settings,
        }
    }

    async fn call<C: SolCall>(&self, call: C) -> Result<C::Return> {
        let params = json!([
            { "to": self.address, "data": Bytes::from(call.abi_encode()) },
            "latest",
        ]);
        let raw = self.transport.request("eth_call", params).await?;
        let data: Bytes = serde_json::from_value(raw)?;
        C::abi_decode_returns(&data)
            .map_err(|err| ContractError::Decode(format!("{}: {err}", C::SIGNATURE)))
    }

    async fn sender(&self) -> Result<String> {
        let raw = self.transport.request("eth_accounts", json!([])).await?;
        let accounts: Vec<String> = serde_json::from_value(raw)?;
        accounts.into_iter().next().ok_or(ContractError::NoAccount)
    }
}

#[async_trait(?Send)]
impl<T: RpcTransport + 'static> WaveContract for WavePortalClient<T> {
    async fn get_all_waves(&self) -> Result<Vec<Wave>> {
        let waves = self.call(getAllWavesCall {}).await?;
        debug!(count = waves.len(), "fetched all waves");
        Ok(waves.into_iter().map(Wave::from).collect())
    }

    async fn get_total_waves(&self) -> Result<u64> {
        let total = self.call(getTotalWavesCall {}).await?;
        Ok(total.saturating_to())
    }

    async fn wave(&self, message: &str, gas_limit: u64) -> Result<PendingWave> {
        let from = self.sender().await?;
        let data = waveCall {
            message: message.to_owned(),
        }
        .abi_encode();
        let tx = json!([{
            "from": from,
            "to": self.address,
            "data": Bytes::from(data),
            "gas": rpc::quantity(gas_limit),
        }]);

        let raw = self.transport.request("eth_sendTransaction", tx).await?;
        let hash: B256 = serde_json::from_value(raw)?;
        Ok(PendingWave {
            hash: rpc::tx_hash(hash),
        })
    }

    async fn confirm(&self, pending: &PendingWave) -> Result<WaveReceipt> {
        let PollSettings {
            receipt_poll_interval: interval,
            receipt_timeout: timeout,
            ..
        } = self.settings;
        let interval = interval.max(Duration::from_millis(1));
        let attempts = u64::try_from(timeout.as_millis() / interval.as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        let TxHash(hash) = &pending.hash;

        for attempt in 1..=attempts {
            let raw = self
                .transport
                .request("eth_getTransactionReceipt", json!([hash]))
                .await?;
            if !raw.is_null() {
                let receipt: RpcReceipt = serde_json::from_value(raw)?;
                if receipt.reverted() {
                    return Err(ContractError::Reverted(hash.clone()));
                }
                let block_number = receipt
                    .block_number
                    .as_deref()
                    .map(rpc::parse_quantity)
                    .transpose()?;
                info!(%hash, ?block_number, "transaction mined");
                return Ok(WaveReceipt {
                    hash: pending.hash.clone(),
                    block_number,
                });
            }
            debug!(%hash, attempt, "receipt not available yet");
            if attempt < attempts {
                self.transport.sleep(interval).await;
            }
        }

        Err(ContractError::Timeout {
            hash: hash.clone(),
            waited: timeout,
        })
    }

    fn new_waves(&self) -> LocalBoxStream<'static, Result<NewWaveEvent>> {
        LogPoller::new(
            Rc::clone(&self.transport),
            self.address,
            self.settings.event_poll_interval,
        )
        .into_stream()
    }
}
