//! Blockchain monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! injected status fetcher (async hash → receipt-or-none)
//!     → monitor.rs (per-hash polling loop, registry, cancellation)
//!     → types.rs (status / network / receipt data model)
//!     → errors.rs (typed failure surface)
//!     → format.rs (human-readable hash truncation)
//! ```
//!
//! # Constraints
//! - One fetch in flight per hash at any time
//! - Terminal statuses (`Confirmed`, `Failed`) end polling permanently
//! - Cancellation must release both the interval and the timeout for a hash

pub mod errors;
pub mod format;
pub mod monitor;
pub mod types;

pub use errors::{BlockchainError, BlockchainResult};
pub use monitor::{MonitorOptions, StatusCallback, TransactionMonitor};
pub use types::{BlockchainNetwork, TransactionReceipt, TransactionStatus};
