//! Blockchain transaction-status monitoring utilities.
//!
//! # Architecture Overview
//!
//! ```text
//! Caller supplies:                   chain-monitor owns:
//!
//!   status fetcher ───────────────▶  blockchain::monitor
//!   (async hash → receipt)             │  per-hash polling loop
//!                                      │  (interval + timeout + cancel)
//!   on_status_change callback ◀────────┤
//!                                      ▼
//!                                    registry (hash → last status/receipt)
//!
//! Cross-cutting:
//!   config/        schema, TOML loader, env overrides
//!   observability/ tracing initialization
//!   testing/       mock receipts + scripted fetchers
//! ```
//!
//! The actual RPC/wallet integration is an external collaborator: the monitor
//! only ever sees the injected fetcher, so it works unchanged against any
//! chain backend (or a scripted mock in tests).

// Core subsystem
pub mod blockchain;

// Cross-cutting concerns
pub mod config;
pub mod observability;
pub mod testing;

pub use blockchain::errors::{BlockchainError, BlockchainResult};
pub use blockchain::monitor::{MonitorOptions, TransactionMonitor};
pub use blockchain::types::{BlockchainNetwork, TransactionReceipt, TransactionStatus};
pub use config::MonitorConfig;
