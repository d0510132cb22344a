use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WalletAddress(pub String);

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One message stored by the contract. Never mutated once observed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wave {
    pub address: WalletAddress,
    /// Seconds since the unix epoch, as stored on chain.
    pub timestamp: u64,
    pub message: String,
}

impl Wave {
    pub fn new(
        address: impl Into<WalletAddress>,
        timestamp: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            timestamp,
            message: message.into(),
        }
    }

    /// Block timestamp as a UTC instant. Out of range values clamp to the epoch.
    pub fn time(&self) -> DateTime<Utc> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// A decoded `NewWave` log together with where it sits on chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewWaveEvent {
    pub from: WalletAddress,
    pub timestamp: u64,
    pub message: String,
    pub block_number: u64,
    pub log_index: u64,
    pub tx_hash: Option<TxHash>,
}

impl From<NewWaveEvent> for Wave {
    fn from(event: NewWaveEvent) -> Self {
        Wave {
            address: event.from,
            timestamp: event.timestamp,
            message: event.message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingWave {
    pub hash: TxHash,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaveReceipt {
    pub hash: TxHash,
    pub block_number: Option<u64>,
}

/// Display-ready projection of a [`Wave`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaveCard {
    pub address: String,
    pub time: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_time_converts_epoch_seconds() {
        let wave = Wave::new("0xA", 1000, "hi");
        assert_eq!(wave.time().timestamp(), 1000);
    }

    #[test]
    fn wave_time_clamps_out_of_range() {
        let wave = Wave::new("0xA", u64::MAX, "hi");
        assert_eq!(wave.time(), DateTime::UNIX_EPOCH);
    }

    #[test]
    fn event_converts_into_wave() {
        let event = NewWaveEvent {
            from: "0xD".into(),
            timestamp: 3000,
            message: "hey".to_owned(),
            block_number: 12,
            log_index: 0,
            tx_hash: None,
        };
        assert_eq!(Wave::from(event), Wave::new("0xD", 3000, "hey"));
    }

    #[test]
    fn wallet_address_serializes_as_plain_string() {
        let json = serde_json::to_string(&WalletAddress::from("0xC")).unwrap();
        assert_eq!(json, "\"0xC\"");
    }
}
