//! Test-data factories and scripted collaborators.
//!
//! Exported so downstream crates can drive the monitor in their own tests
//! without wiring a real chain backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::blockchain::errors::{BlockchainError, BlockchainResult};
use crate::blockchain::types::{BlockchainNetwork, TransactionReceipt, TransactionStatus};

/// Build a receipt with sensible defaults for tests.
pub fn mock_receipt(transaction_hash: &str, status: TransactionStatus) -> TransactionReceipt {
    TransactionReceipt {
        transaction_hash: transaction_hash.to_string(),
        status,
        block_number: Some(12345),
        from: Some("0xabc".to_string()),
        to: Some("0xdef".to_string()),
        network: BlockchainNetwork::Polygon,
    }
}

/// One step of a scripted fetcher response sequence.
#[derive(Debug, Clone)]
pub enum ScriptStep {
    /// No receipt yet (`Ok(None)`).
    Pending,
    /// A resolved receipt.
    Receipt(TransactionReceipt),
    /// A fetch-level failure, surfaced as an RPC error.
    Error(String),
}

/// A status fetcher driven by a fixed script.
///
/// Steps are consumed in order; once the script is exhausted the last step
/// repeats, so a one-step script behaves like a fetcher that always returns
/// the same answer. Every call is counted.
pub struct ScriptedFetcher {
    steps: Mutex<VecDeque<ScriptStep>>,
    last: Mutex<Option<ScriptStep>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn sequence(steps: impl IntoIterator<Item = ScriptStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// A fetcher whose transaction never gets a receipt.
    pub fn always_pending() -> Self {
        Self::sequence([ScriptStep::Pending])
    }

    /// `pending_polls` empty responses followed by a confirmed receipt.
    pub fn pending_then_confirmed(pending_polls: usize, transaction_hash: &str) -> Self {
        let mut steps = vec![ScriptStep::Pending; pending_polls];
        steps.push(ScriptStep::Receipt(mock_receipt(
            transaction_hash,
            TransactionStatus::Confirmed,
        )));
        Self::sequence(steps)
    }

    /// Number of times [`next`](Self::next) has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Produce the next scripted response.
    pub fn next(&self, _transaction_hash: &str) -> BlockchainResult<Option<TransactionReceipt>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let step = {
            let mut steps = self.steps.lock().unwrap();
            let mut last = self.last.lock().unwrap();
            match steps.pop_front() {
                Some(step) => {
                    *last = Some(step.clone());
                    step
                }
                None => last.clone().expect("ScriptedFetcher script is empty"),
            }
        };

        match step {
            ScriptStep::Pending => Ok(None),
            ScriptStep::Receipt(receipt) => Ok(Some(receipt)),
            ScriptStep::Error(message) => Err(BlockchainError::Rpc(message)),
        }
    }
}
