//! Transaction-status polling.
//!
//! # Responsibilities
//! - Drive repeated invocations of an injected status fetcher per hash
//! - Track last observed status/receipt in a shared registry
//! - Enforce polling timeout and maximum attempt count
//! - Support explicit cancellation via `stop_monitoring`
//!
//! # State Transitions
//! ```text
//! pending → pending    (fetcher returned no receipt, or a pending one)
//! pending → confirmed  (terminal, resolves Ok)
//! pending → failed     (terminal, resolves Err)
//! ```
//!
//! The loop issues one fetch, awaits it, then waits for the next tick; there
//! is never more than one fetch in flight for a hash. Distinct hashes poll
//! independently, each owning its own interval/timeout pair.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::watch;
use tokio::time::{self, Instant};

use crate::blockchain::errors::{BlockchainError, BlockchainResult};
use crate::blockchain::types::{BlockchainNetwork, TransactionReceipt, TransactionStatus};
use crate::config::PollingConfig;

/// Default delay between successive status fetches.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_millis(5000);

/// Default wall-clock budget for a single monitored transaction.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(300_000);

/// Callback invoked once per resolved fetch that produced a receipt.
pub type StatusCallback = Arc<dyn Fn(TransactionStatus, &TransactionReceipt) + Send + Sync>;

/// Per-call monitoring options. Unset fields fall back to the monitor's
/// defaults, then to the crate constants.
#[derive(Clone, Default)]
pub struct MonitorOptions {
    pub polling_interval: Option<Duration>,
    pub timeout: Option<Duration>,
    /// `None` means unbounded.
    pub max_attempts: Option<u32>,
    pub on_status_change: Option<StatusCallback>,
}

impl MonitorOptions {
    pub fn polling_interval(mut self, interval: Duration) -> Self {
        self.polling_interval = Some(interval);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = Some(max);
        self
    }

    pub fn on_status_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(TransactionStatus, &TransactionReceipt) + Send + Sync + 'static,
    {
        self.on_status_change = Some(Arc::new(callback));
        self
    }
}

impl From<&PollingConfig> for MonitorOptions {
    fn from(config: &PollingConfig) -> Self {
        Self {
            polling_interval: Some(Duration::from_millis(config.polling_interval_ms)),
            timeout: Some(Duration::from_millis(config.timeout_ms)),
            max_attempts: config.max_attempts,
            on_status_change: None,
        }
    }
}

/// Registry entry for one tracked hash.
struct Tracked {
    last_status: TransactionStatus,
    last_receipt: Option<TransactionReceipt>,
    cancel: watch::Sender<bool>,
}

/// Monitors transactions by polling an injected status fetcher.
///
/// The monitor itself holds no chain connection: callers inject an async
/// `get_status` function per transaction, so the same instance can track
/// hashes across different networks and backends concurrently.
pub struct TransactionMonitor {
    defaults: MonitorOptions,
    tracked: DashMap<String, Tracked>,
}

impl Default for TransactionMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionMonitor {
    /// Create a monitor using the built-in defaults.
    pub fn new() -> Self {
        Self {
            defaults: MonitorOptions::default(),
            tracked: DashMap::new(),
        }
    }

    /// Create a monitor whose defaults come from the given options.
    pub fn with_options(defaults: MonitorOptions) -> Self {
        Self {
            defaults,
            tracked: DashMap::new(),
        }
    }

    /// Create a monitor whose defaults come from loaded configuration.
    pub fn with_config(config: &PollingConfig) -> Self {
        Self::with_options(MonitorOptions::from(config))
    }

    /// Poll `get_status` for `transaction_hash` until it reaches a terminal
    /// state, the timeout elapses, or the attempt budget is exhausted.
    ///
    /// `get_status` resolving `Ok(None)` means "no receipt yet, still
    /// pending" and is not an error. A fetch error is fatal and is surfaced
    /// as [`BlockchainError::Monitoring`] with the cause attached.
    ///
    /// Resolves with the terminal receipt on confirmation; rejects with
    /// [`BlockchainError::TransactionFailed`] when the chain reports failure.
    pub async fn monitor_transaction<F, Fut>(
        &self,
        transaction_hash: &str,
        network: BlockchainNetwork,
        get_status: F,
        options: MonitorOptions,
    ) -> BlockchainResult<TransactionReceipt>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = BlockchainResult<Option<TransactionReceipt>>>,
    {
        if transaction_hash.is_empty() {
            return Err(BlockchainError::EmptyTransactionHash);
        }

        let hash = transaction_hash.to_owned();
        let interval = options
            .polling_interval
            .or(self.defaults.polling_interval)
            .unwrap_or(DEFAULT_POLLING_INTERVAL);
        let budget = options
            .timeout
            .or(self.defaults.timeout)
            .unwrap_or(DEFAULT_TIMEOUT);
        let max_attempts = options.max_attempts.or(self.defaults.max_attempts);
        let on_status_change = options
            .on_status_change
            .or_else(|| self.defaults.on_status_change.clone());

        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let previous = self.tracked.insert(
            hash.clone(),
            Tracked {
                last_status: TransactionStatus::Pending,
                last_receipt: None,
                cancel: cancel_tx,
            },
        );
        if let Some(previous) = previous {
            // Restarting monitoring for a hash cancels the earlier run.
            let _ = previous.cancel.send(true);
        }

        tracing::debug!(
            transaction_hash = %hash,
            network = %network,
            interval_ms = interval.as_millis() as u64,
            timeout_ms = budget.as_millis() as u64,
            "Monitoring transaction"
        );

        let poll = async {
            // First fetch happens one full interval after start.
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            let mut attempts = 0u32;

            loop {
                ticker.tick().await;
                attempts += 1;

                let receipt = get_status(hash.clone()).await.map_err(|source| {
                    tracing::warn!(
                        transaction_hash = %hash,
                        error = %source,
                        "Status fetch failed"
                    );
                    BlockchainError::Monitoring {
                        transaction_hash: hash.clone(),
                        source: Box::new(source),
                    }
                })?;

                match receipt {
                    Some(receipt) => {
                        let status = receipt.status;
                        if let Some(mut entry) = self.tracked.get_mut(&hash) {
                            entry.last_status = status;
                            entry.last_receipt = Some(receipt.clone());
                        }
                        if let Some(callback) = &on_status_change {
                            callback(status, &receipt);
                        }

                        match status {
                            TransactionStatus::Confirmed => {
                                tracing::info!(
                                    transaction_hash = %hash,
                                    block_number = receipt.block_number,
                                    "Transaction confirmed"
                                );
                                return Ok(receipt);
                            }
                            TransactionStatus::Failed => {
                                tracing::info!(
                                    transaction_hash = %hash,
                                    "Transaction failed on-chain"
                                );
                                return Err(BlockchainError::TransactionFailed {
                                    transaction_hash: hash.clone(),
                                    network,
                                });
                            }
                            _ => {}
                        }
                    }
                    None => {
                        tracing::debug!(
                            transaction_hash = %hash,
                            attempt = attempts,
                            "No receipt yet, transaction pending"
                        );
                    }
                }

                if let Some(max) = max_attempts {
                    if attempts > max {
                        tracing::warn!(
                            transaction_hash = %hash,
                            max_attempts = max,
                            "Attempt budget exhausted"
                        );
                        return Err(BlockchainError::AttemptsExceeded(max));
                    }
                }
            }
        };

        let monitored = async {
            tokio::select! {
                res = poll => res,
                // Resolves on stop_monitoring; a dropped sender (entry
                // replaced by a newer run) also lands here.
                _ = cancel_rx.changed() => {
                    Err(BlockchainError::MonitoringStopped(hash.clone()))
                }
            }
        };

        let result = match time::timeout(budget, monitored).await {
            Ok(res) => res,
            Err(_) => {
                tracing::warn!(
                    transaction_hash = %hash,
                    timeout_ms = budget.as_millis() as u64,
                    "Transaction monitoring timed out"
                );
                Err(BlockchainError::Timeout(budget.as_millis() as u64))
            }
        };

        // The stopped path must not touch the registry: stop_monitoring has
        // already removed the entry, and a replaced run would otherwise
        // delete its successor's entry.
        if !matches!(result, Err(BlockchainError::MonitoringStopped(_))) {
            self.tracked.remove(&hash);
        }

        result
    }

    /// Last observed status for a hash, or `Unknown` if it is not tracked.
    pub fn get_status(&self, transaction_hash: &str) -> TransactionStatus {
        self.tracked
            .get(transaction_hash)
            .map(|entry| entry.last_status)
            .unwrap_or(TransactionStatus::Unknown)
    }

    /// Last observed receipt for a hash, if any.
    pub fn get_receipt(&self, transaction_hash: &str) -> Option<TransactionReceipt> {
        self.tracked
            .get(transaction_hash)
            .and_then(|entry| entry.last_receipt.clone())
    }

    /// Stop monitoring a hash and drop its tracking entry.
    ///
    /// Cancels the in-flight polling loop, which resolves with
    /// [`BlockchainError::MonitoringStopped`]. No-op for untracked hashes.
    pub fn stop_monitoring(&self, transaction_hash: &str) {
        if let Some((_, entry)) = self.tracked.remove(transaction_hash) {
            let _ = entry.cancel.send(true);
            tracing::debug!(transaction_hash, "Stopped monitoring transaction");
        }
    }

    /// Number of hashes currently tracked.
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }
}
