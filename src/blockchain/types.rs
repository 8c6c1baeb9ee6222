//! Chain-agnostic status and receipt types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported blockchain networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockchainNetwork {
    Polygon,
    PolygonMumbai,
    Solana,
    SolanaDevnet,
    Polkadot,
    PolkadotTestnet,
    Moonbeam,
    MoonbeamTestnet,
    Base,
    BaseTestnet,
}

impl BlockchainNetwork {
    /// Whether this network is a test network.
    pub fn is_testnet(&self) -> bool {
        matches!(
            self,
            Self::PolygonMumbai
                | Self::SolanaDevnet
                | Self::PolkadotTestnet
                | Self::MoonbeamTestnet
                | Self::BaseTestnet
        )
    }
}

impl fmt::Display for BlockchainNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Polygon => "polygon",
            Self::PolygonMumbai => "polygon_mumbai",
            Self::Solana => "solana",
            Self::SolanaDevnet => "solana_devnet",
            Self::Polkadot => "polkadot",
            Self::PolkadotTestnet => "polkadot_testnet",
            Self::Moonbeam => "moonbeam",
            Self::MoonbeamTestnet => "moonbeam_testnet",
            Self::Base => "base",
            Self::BaseTestnet => "base_testnet",
        };
        f.write_str(name)
    }
}

/// Observed status of a monitored transaction.
///
/// `Confirmed` and `Failed` are terminal: once either is observed for a hash,
/// no further polling occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Transaction is known but not yet included or finalized.
    Pending,
    /// Transaction succeeded on-chain.
    Confirmed,
    /// Transaction failed or was reverted on-chain.
    Failed,
    /// Hash is not tracked by the monitor.
    Unknown,
}

impl TransactionStatus {
    /// Whether this status ends monitoring for the transaction.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Snapshot of a transaction's on-chain state at a point in time.
///
/// Serialized with camelCase field names to stay compatible with JSON
/// receipts produced by wallet/RPC layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub network: BlockchainNetwork,
}
