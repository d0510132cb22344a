use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x8Ca16DC6F031CB4b52ECa06036824287f7994515";
pub const DEFAULT_GAS_LIMIT: u64 = 300_000;

/// Deployment and polling knobs. Every field has a default, so a partial
/// JSON object is a valid override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PortalConfig {
    pub contract_address: String,
    pub gas_limit: u64,
    pub receipt_poll_interval_ms: u64,
    pub receipt_timeout_ms: u64,
    pub event_poll_interval_ms: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_owned(),
            gas_limit: DEFAULT_GAS_LIMIT,
            receipt_poll_interval_ms: 4_000,
            receipt_timeout_ms: 300_000,
            event_poll_interval_ms: 4_000,
        }
    }
}

impl PortalConfig {
    /// Parses and validates an override. A config that fails here should be
    /// replaced by the defaults, never run without a contract.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("invalid portal config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let digits = self.contract_address.strip_prefix("0x").unwrap_or_default();
        ensure!(
            digits.len() == 40 && digits.chars().all(|c| c.is_ascii_hexdigit()),
            "invalid contract address {:?}",
            self.contract_address
        );
        ensure!(self.gas_limit > 0, "gas limit must be positive");
        Ok(())
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_millis(self.receipt_timeout_ms)
    }

    pub fn event_poll_interval(&self) -> Duration {
        Duration::from_millis(self.event_poll_interval_ms)
    }
}
