//! `NewWave` delivery by polling `eth_getLogs` over consecutive block ranges.

use crate::abi::{self, NewWave};
use crate::rpc::{self, RpcLog};
use alloy_primitives::Address;
use alloy_sol_types::SolEvent;
use futures::StreamExt;
use futures::stream::LocalBoxStream;
use serde_json::json;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, trace};
use wp_contract::{ContractError, Result, RpcTransport};
use wp_types::NewWaveEvent;

pub(crate) struct LogPoller<T> {
    transport: Rc<T>,
    contract: Address,
    interval: Duration,
    next_block: Option<u64>,
    started: bool,
    queue: VecDeque<Result<NewWaveEvent>>,
}

impl<T: RpcTransport + 'static> LogPoller<T> {
    pub fn new(transport: Rc<T>, contract: Address, interval: Duration) -> Self {
        Self {
            transport,
            contract,
            interval,
            next_block: None,
            started: false,
            queue: VecDeque::new(),
        }
    }

    pub fn into_stream(self) -> LocalBoxStream<'static, Result<NewWaveEvent>> {
        futures::stream::unfold(self, |mut poller| async move {
            let item = poller.next_event().await;
            Some((item, poller))
        })
        .boxed_local()
    }

    async fn next_event(&mut self) -> Result<NewWaveEvent> {
        loop {
            if let Some(item) = self.queue.pop_front() {
                return item;
            }

            if self.started {
                self.transport.sleep(self.interval).await;
            }
            self.started = true;

            let head = self.block_number().await?;
            let Some(from) = self.next_block else {
                // Only waves committed after the subscription started.
                self.next_block = Some(head + 1);
                continue;
            };
            if head < from {
                continue;
            }

            let logs = self.logs_between(from, head).await?;
            trace!(from, to = head, count = logs.len(), "polled NewWave logs");
            self.next_block = Some(head + 1);
            self.queue.extend(logs.into_iter().map(decode_log));
        }
    }

    async fn block_number(&self) -> Result<u64> {
        let raw = self.transport.request("eth_blockNumber", json!([])).await?;
        let head: String = serde_json::from_value(raw)?;
        rpc::parse_quantity(&head)
    }

    async fn logs_between(&self, from: u64, to: u64) -> Result<Vec<RpcLog>> {
        let filter = json!([{
            "address": self.contract,
            "topics": [NewWave::SIGNATURE_HASH],
            "fromBlock": rpc::quantity(from),
            "toBlock": rpc::quantity(to),
        }]);
        let raw = self.transport.request("eth_getLogs", filter).await?;
        Ok(serde_json::from_value(raw)?)
    }
}

fn decode_log(log: RpcLog) -> Result<NewWaveEvent> {
    let event = NewWave::decode_raw_log(log.topics.iter().copied(), &log.data)
        .map_err(|err| ContractError::Decode(format!("NewWave log: {err}")))?;
    let block_number = log.block_number.as_deref().map(rpc::parse_quantity).transpose()?;
    let log_index = log.log_index.as_deref().map(rpc::parse_quantity).transpose()?;
    debug!(from = %event.from, "NewWave");

    Ok(NewWaveEvent {
        from: abi::wallet_address(event.from),
        timestamp: event.timestamp.saturating_to(),
        message: event.message,
        block_number: block_number.unwrap_or_default(),
        log_index: log_index.unwrap_or_default(),
        tx_hash: log.transaction_hash.map(rpc::tx_hash),
    })
}
