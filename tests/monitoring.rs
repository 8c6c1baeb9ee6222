//! Integration tests for the transaction monitor.
//!
//! Every test runs under tokio's paused clock, so polling intervals and
//! timeouts elapse instantly without real sleeping.

use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chain_monitor::testing::{mock_receipt, ScriptStep, ScriptedFetcher};
use chain_monitor::{
    BlockchainError, BlockchainNetwork, BlockchainResult, MonitorOptions, TransactionMonitor,
    TransactionReceipt, TransactionStatus,
};

const HASH: &str = "0x123";

/// Adapt a `ScriptedFetcher` to the closure shape `monitor_transaction` takes.
fn fetcher_fn(
    fetcher: &Arc<ScriptedFetcher>,
) -> impl Fn(String) -> std::future::Ready<BlockchainResult<Option<TransactionReceipt>>> {
    let fetcher = fetcher.clone();
    move |hash: String| std::future::ready(fetcher.next(&hash))
}

#[tokio::test(start_paused = true)]
async fn confirms_after_pending_polls() {
    let monitor = TransactionMonitor::new();
    let fetcher = Arc::new(ScriptedFetcher::pending_then_confirmed(1, HASH));

    let receipt = monitor
        .monitor_transaction(
            HASH,
            BlockchainNetwork::Polygon,
            fetcher_fn(&fetcher),
            MonitorOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(receipt.status, TransactionStatus::Confirmed);
    assert_eq!(receipt.transaction_hash, HASH);
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn pending_k_times_then_confirmed_fetches_k_plus_one() {
    let monitor = TransactionMonitor::new();
    let fetcher = Arc::new(ScriptedFetcher::pending_then_confirmed(4, HASH));

    let receipt = monitor
        .monitor_transaction(
            HASH,
            BlockchainNetwork::Polygon,
            fetcher_fn(&fetcher),
            MonitorOptions::default().polling_interval(Duration::from_millis(1000)),
        )
        .await
        .unwrap();

    assert_eq!(receipt.status, TransactionStatus::Confirmed);
    assert_eq!(fetcher.calls(), 5);

    // Terminal state reached: no further fetches happen for this hash.
    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(fetcher.calls(), 5);
}

#[tokio::test(start_paused = true)]
async fn rejects_when_transaction_fails_on_chain() {
    let monitor = TransactionMonitor::new();
    let fetcher = Arc::new(ScriptedFetcher::sequence([ScriptStep::Receipt(
        mock_receipt(HASH, TransactionStatus::Failed),
    )]));

    let err = monitor
        .monitor_transaction(
            HASH,
            BlockchainNetwork::Polygon,
            fetcher_fn(&fetcher),
            MonitorOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BlockchainError::TransactionFailed { .. }));
    assert_eq!(err.to_string(), "Transaction failed on the blockchain");
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn times_out_when_transaction_never_resolves() {
    let monitor = TransactionMonitor::new();
    let fetcher = Arc::new(ScriptedFetcher::always_pending());

    let start = tokio::time::Instant::now();
    let err = monitor
        .monitor_transaction(
            HASH,
            BlockchainNetwork::Polygon,
            fetcher_fn(&fetcher),
            MonitorOptions::default()
                .polling_interval(Duration::from_millis(3000))
                .timeout(Duration::from_millis(10_000)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BlockchainError::Timeout(10_000)));
    assert_eq!(
        err.to_string(),
        "Transaction monitoring timed out after 10000ms"
    );
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(10_000));
    assert!(elapsed < Duration::from_millis(11_000));
    // Polls at 3s, 6s, 9s before the 10s deadline.
    assert_eq!(fetcher.calls(), 3);
    assert_eq!(monitor.get_status(HASH), TransactionStatus::Unknown);
}

#[tokio::test(start_paused = true)]
async fn times_out_while_fetch_is_in_flight() {
    let monitor = TransactionMonitor::new();

    let err = monitor
        .monitor_transaction(
            HASH,
            BlockchainNetwork::Polygon,
            |_hash| std::future::pending::<BlockchainResult<Option<TransactionReceipt>>>(),
            MonitorOptions::default()
                .polling_interval(Duration::from_millis(1000))
                .timeout(Duration::from_millis(10_000)),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BlockchainError::Timeout(10_000)));
}

#[tokio::test(start_paused = true)]
async fn rejects_after_exceeding_max_attempts() {
    let monitor = TransactionMonitor::new();
    let fetcher = Arc::new(ScriptedFetcher::always_pending());

    let err = monitor
        .monitor_transaction(
            HASH,
            BlockchainNetwork::Polygon,
            fetcher_fn(&fetcher),
            MonitorOptions::default()
                .polling_interval(Duration::from_millis(1000))
                .max_attempts(2),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BlockchainError::AttemptsExceeded(2)));
    assert!(err
        .to_string()
        .contains("exceeded maximum attempts (2)"));
    // The budget is only known to be exhausted once a third poll resolves.
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn invokes_status_callback_per_resolved_fetch() {
    let monitor = TransactionMonitor::new();
    let fetcher = Arc::new(ScriptedFetcher::sequence([
        ScriptStep::Receipt(mock_receipt(HASH, TransactionStatus::Pending)),
        ScriptStep::Receipt(mock_receipt(HASH, TransactionStatus::Confirmed)),
    ]));

    let observed: Arc<Mutex<Vec<TransactionStatus>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = observed.clone();

    monitor
        .monitor_transaction(
            HASH,
            BlockchainNetwork::Polygon,
            fetcher_fn(&fetcher),
            MonitorOptions::default().on_status_change(move |status, receipt| {
                assert_eq!(receipt.transaction_hash, HASH);
                sink.lock().unwrap().push(status);
            }),
        )
        .await
        .unwrap();

    assert_eq!(
        *observed.lock().unwrap(),
        vec![TransactionStatus::Pending, TransactionStatus::Confirmed]
    );
}

#[tokio::test(start_paused = true)]
async fn fetch_error_is_immediately_fatal() {
    let monitor = TransactionMonitor::new();
    let fetcher = Arc::new(ScriptedFetcher::sequence([ScriptStep::Error(
        "connection refused".to_string(),
    )]));

    let err = monitor
        .monitor_transaction(
            HASH,
            BlockchainNetwork::Polygon,
            fetcher_fn(&fetcher),
            MonitorOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Error monitoring transaction"));
    let source = err.source().expect("underlying cause attached");
    assert_eq!(source.to_string(), "RPC error: connection refused");
    // No retry beyond the normal cadence: one fetch, then rejection.
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn monitors_multiple_hashes_independently() {
    let monitor = TransactionMonitor::new();
    let fetcher_a = Arc::new(ScriptedFetcher::pending_then_confirmed(2, "0x111"));
    let fetcher_b = Arc::new(ScriptedFetcher::pending_then_confirmed(0, "0x222"));

    let options = MonitorOptions::default().polling_interval(Duration::from_millis(1000));
    let (a, b) = tokio::join!(
        monitor.monitor_transaction(
            "0x111",
            BlockchainNetwork::Polygon,
            fetcher_fn(&fetcher_a),
            options.clone(),
        ),
        monitor.monitor_transaction(
            "0x222",
            BlockchainNetwork::Solana,
            fetcher_fn(&fetcher_b),
            options,
        ),
    );

    assert_eq!(a.unwrap().transaction_hash, "0x111");
    assert_eq!(b.unwrap().transaction_hash, "0x222");
    assert_eq!(fetcher_a.calls(), 3);
    assert_eq!(fetcher_b.calls(), 1);
    assert_eq!(monitor.tracked_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn registry_reflects_last_observed_state() {
    let monitor = Arc::new(TransactionMonitor::new());
    let fetcher = Arc::new(ScriptedFetcher::sequence([ScriptStep::Receipt(
        mock_receipt(HASH, TransactionStatus::Pending),
    )]));

    let task = {
        let monitor = monitor.clone();
        let get_status = fetcher_fn(&fetcher);
        tokio::spawn(async move {
            monitor
                .monitor_transaction(
                    HASH,
                    BlockchainNetwork::Polygon,
                    get_status,
                    MonitorOptions::default().polling_interval(Duration::from_millis(1000)),
                )
                .await
        })
    };

    // Entry exists as soon as monitoring starts, before the first poll.
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(monitor.get_status(HASH), TransactionStatus::Pending);
    assert!(monitor.get_receipt(HASH).is_none());

    // After the first poll the pending receipt is recorded.
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(monitor.get_status(HASH), TransactionStatus::Pending);
    let receipt = monitor.get_receipt(HASH).expect("receipt recorded");
    assert_eq!(receipt.status, TransactionStatus::Pending);

    monitor.stop_monitoring(HASH);
    let result = task.await.unwrap();
    assert!(matches!(result, Err(BlockchainError::MonitoringStopped(_))));
    assert_eq!(monitor.get_status(HASH), TransactionStatus::Unknown);
    assert!(monitor.get_receipt(HASH).is_none());
}

#[tokio::test(start_paused = true)]
async fn stop_monitoring_untracked_hash_is_a_noop() {
    let monitor = TransactionMonitor::new();
    monitor.stop_monitoring("0x999");
    assert_eq!(monitor.get_status("0x999"), TransactionStatus::Unknown);
    assert!(monitor.get_receipt("0x999").is_none());
}

#[tokio::test(start_paused = true)]
async fn remonitoring_a_hash_cancels_the_previous_run() {
    let monitor = Arc::new(TransactionMonitor::new());
    let stale = Arc::new(ScriptedFetcher::always_pending());

    let first = {
        let monitor = monitor.clone();
        let get_status = fetcher_fn(&stale);
        tokio::spawn(async move {
            monitor
                .monitor_transaction(
                    HASH,
                    BlockchainNetwork::Polygon,
                    get_status,
                    MonitorOptions::default().polling_interval(Duration::from_millis(1000)),
                )
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let fresh = Arc::new(ScriptedFetcher::pending_then_confirmed(0, HASH));
    let receipt = monitor
        .monitor_transaction(
            HASH,
            BlockchainNetwork::Polygon,
            fetcher_fn(&fresh),
            MonitorOptions::default().polling_interval(Duration::from_millis(1000)),
        )
        .await
        .unwrap();
    assert_eq!(receipt.status, TransactionStatus::Confirmed);

    let result = first.await.unwrap();
    assert!(matches!(result, Err(BlockchainError::MonitoringStopped(_))));
}
