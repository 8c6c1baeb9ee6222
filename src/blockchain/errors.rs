//! Error definitions for blockchain operations.

use thiserror::Error;

use crate::blockchain::types::BlockchainNetwork;

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Monitoring ran past its wall-clock budget.
    #[error("Transaction monitoring timed out after {0}ms")]
    Timeout(u64),

    /// Monitoring polled more times than allowed.
    #[error("Transaction monitoring exceeded maximum attempts ({0})")]
    AttemptsExceeded(u32),

    /// The injected status fetcher failed; the underlying cause is attached.
    #[error("Error monitoring transaction {transaction_hash}")]
    Monitoring {
        transaction_hash: String,
        #[source]
        source: Box<BlockchainError>,
    },

    /// The fetched receipt reported a failed transaction.
    #[error("Transaction failed on the blockchain")]
    TransactionFailed {
        transaction_hash: String,
        network: BlockchainNetwork,
    },

    /// `stop_monitoring` was called while this transaction was being polled.
    #[error("Monitoring stopped for transaction {0}")]
    MonitoringStopped(String),

    /// Monitoring was requested for an empty hash.
    #[error("Transaction hash must not be empty")]
    EmptyTransactionHash,

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Network-level failure reaching the chain.
    #[error("Network error: {0}")]
    Network(String),

    /// Smart contract call failed.
    #[error("Contract error: {0}")]
    Contract(String),

    /// Wallet could not be connected.
    #[error("Wallet connection failed: {0}")]
    WalletConnectionFailed(String),

    /// Operation requires a connected wallet.
    #[error("Wallet is not connected")]
    WalletNotConnected,

    /// Account balance cannot cover the transaction.
    #[error("Insufficient funds for transaction")]
    InsufficientFunds,

    /// User declined to sign or submit the transaction.
    #[error("User rejected the transaction")]
    UserRejected,

    /// Anything that does not fit the categories above.
    #[error("Unknown blockchain error: {0}")]
    Unknown(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
