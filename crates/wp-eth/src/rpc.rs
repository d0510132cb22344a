//! Shapes of the JSON-RPC responses the client reads.

use alloy_primitives::{B256, Bytes, hex};
use serde::Deserialize;
use wp_contract::{ContractError, Result};
use wp_types::TxHash;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RpcReceipt {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub block_number: Option<String>,
}

impl RpcReceipt {
    pub fn reverted(&self) -> bool {
        self.status.as_deref().map(parse_quantity).transpose().ok().flatten() == Some(0)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RpcLog {
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub log_index: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<B256>,
}

/// Parses a hex `QUANTITY` such as `"0x1b4"`.
pub(crate) fn parse_quantity(raw: &str) -> Result<u64> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| ContractError::Decode(format!("quantity without 0x prefix: {raw}")))?;
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16)
        .map_err(|err| ContractError::Decode(format!("bad quantity {raw}: {err}")))
}

pub(crate) fn quantity(value: u64) -> String {
    format!("{value:#x}")
}

pub(crate) fn tx_hash(hash: B256) -> TxHash {
    TxHash(hex::encode_prefixed(hash))
}
