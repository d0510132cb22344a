//! Bindings for the deployed WavePortal contract.

use alloy_primitives::Address;
use wp_types::{WalletAddress, Wave as ObservedWave};

alloy_sol_types::sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Wave {
        address waver;
        string message;
        uint256 timestamp;
    }

    #[derive(Debug, PartialEq, Eq)]
    event NewWave(address indexed from, uint256 timestamp, string message);

    function wave(string message) external;
    function getAllWaves() external view returns (Wave[] memory);
    function getTotalWaves() external view returns (uint256);
}

pub(crate) fn wallet_address(address: Address) -> WalletAddress {
    WalletAddress(address.to_checksum(None))
}

impl From<Wave> for ObservedWave {
    fn from(raw: Wave) -> Self {
        ObservedWave {
            address: wallet_address(raw.waver),
            timestamp: raw.timestamp.saturating_to(),
            message: raw.message,
        }
    }
}
