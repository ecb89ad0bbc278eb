//! Integration Tests - Use Cases Against Mocked Ports
//!
//! Exercises gas quoting, the swap + report retry policy, the daily
//! check-in rule and the main loop through mockall doubles of the
//! `TeaFiApi` and `SwapExecutor` ports. Retry timing runs on a paused
//! tokio clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use mockall::mock;
use tokio::sync::broadcast;
use tokio::time::Instant;

use teafi_convert_bot::adapters::metrics::BotMetrics;
use teafi_convert_bot::domain::tokens::TokenRegistry;
use teafi_convert_bot::domain::transaction::{ReportPayload, TransactionRecord};
use teafi_convert_bot::ports::backend::{
    ApiError, CheckInStatus, GasQuote, GasQuoteQuery, PointsBalance, TeaFiApi,
};
use teafi_convert_bot::ports::swap_executor::{SwapError, SwapExecutor};
use teafi_convert_bot::usecases::{
    CheckInManager, CheckInOutcome, ConvertLoop, GasQuoteFetcher, LoopTiming, PointsChecker,
    ReportOutcome, RetryPolicy, TransactionReporter,
};

// ---- Mock Definitions ----

mock! {
    pub Api {}

    #[async_trait::async_trait]
    impl TeaFiApi for Api {
        async fn gas_quote(&self, query: &GasQuoteQuery) -> Result<GasQuote, ApiError>;
        async fn report_transaction(&self, payload: &ReportPayload)
            -> Result<serde_json::Value, ApiError>;
        async fn points(&self, address: &str) -> Result<PointsBalance, ApiError>;
        async fn check_in_status(&self, address: &str) -> Result<CheckInStatus, ApiError>;
        async fn check_in(&self, address: &str) -> Result<serde_json::Value, ApiError>;
    }
}

mock! {
    pub Swap {}

    #[async_trait::async_trait]
    impl SwapExecutor for Swap {
        async fn execute(&self) -> Result<TransactionRecord, SwapError>;
        fn wallet_address(&self) -> String;
    }
}

const WALLET: &str = "0x1111111111111111111111111111111111111111";
const TX_HASH: &str = "0x9f8e7d6c5b4a39281706f5e4d3c2b1a09f8e7d6c5b4a39281706f5e4d3c2b1a0";

fn record() -> TransactionRecord {
    TransactionRecord {
        tx_hash: TX_HASH.to_string(),
        address: WALLET.to_string(),
        amount: "100000000000000".to_string(),
    }
}

fn metrics() -> Arc<BotMetrics> {
    Arc::new(BotMetrics::new().unwrap())
}

fn registry() -> Arc<TokenRegistry> {
    Arc::new(TokenRegistry::polygon_mainnet())
}

fn swap_ok() -> MockSwap {
    let mut swap = MockSwap::new();
    swap.expect_execute().times(1).returning(|| Ok(record()));
    swap
}

fn reporter(api: MockApi, swap: MockSwap, metrics: Arc<BotMetrics>) -> TransactionReporter<MockApi, MockSwap> {
    TransactionReporter::new(
        Arc::new(api),
        Arc::new(swap),
        registry(),
        RetryPolicy::default(),
        metrics,
    )
}

/// Log sink for a thread-local subscriber.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Route this thread's events into a buffer until the guard drops.
/// Only valid on the current-thread runtime.
fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

fn transport_error() -> ApiError {
    ApiError::Transport("connection refused".to_string())
}

// ---- Gas quote ----

#[tokio::test]
async fn test_gas_quote_failure_returns_zero() {
    let mut api = MockApi::new();
    api.expect_gas_quote()
        .times(1)
        .returning(|_| Err(ApiError::Status { status: 502, body: "bad gateway".to_string() }));

    let fetcher = GasQuoteFetcher::new(Arc::new(api), registry());
    assert_eq!(fetcher.fetch().await, "0");
}

#[tokio::test]
async fn test_gas_quote_sends_convert_parameters() {
    let mut api = MockApi::new();
    api.expect_gas_quote()
        .withf(|q| {
            q.chain == 137
                && q.tx_type == 2
                && q.gas_payment_token == "0x0000000000000000000000000000000000000000"
                && q.needed_gas_permits == 0
        })
        .times(1)
        .returning(|_| {
            Ok(GasQuote {
                gas_in_native_token: Some("1000000000000000000".to_string()),
            })
        });

    let fetcher = GasQuoteFetcher::new(Arc::new(api), registry());
    assert_eq!(fetcher.fetch().await, "1000000000000000000");
}

#[tokio::test]
async fn test_gas_quote_logs_whole_token_amount() {
    let mut api = MockApi::new();
    api.expect_gas_quote().returning(|_| {
        Ok(GasQuote {
            gas_in_native_token: Some("1000000000000000000".to_string()),
        })
    });

    let (logs, _guard) = capture_logs();
    let fetcher = GasQuoteFetcher::new(Arc::new(api), registry());
    fetcher.fetch().await;

    assert!(logs.text().contains("Gas in native token: 1.0 POL"), "{}", logs.text());
}

#[tokio::test]
async fn test_gas_quote_missing_amount_defaults_to_zero() {
    let mut api = MockApi::new();
    api.expect_gas_quote().returning(|_| Ok(GasQuote::default()));

    let fetcher = GasQuoteFetcher::new(Arc::new(api), registry());
    assert_eq!(fetcher.fetch().await, "0");
}

#[tokio::test]
async fn test_gas_quote_garbage_amount_returns_zero() {
    let mut api = MockApi::new();
    api.expect_gas_quote().returning(|_| {
        Ok(GasQuote {
            gas_in_native_token: Some("lots".to_string()),
        })
    });

    let fetcher = GasQuoteFetcher::new(Arc::new(api), registry());
    assert_eq!(fetcher.fetch().await, "0");
}

// ---- Points ----

#[tokio::test]
async fn test_points_checker_logs_total() {
    let mut api = MockApi::new();
    api.expect_points()
        .withf(|addr| addr == WALLET)
        .times(1)
        .returning(|_| Ok(PointsBalance { points_amount: Some(42.0) }));

    let (logs, _guard) = capture_logs();
    let checker = PointsChecker::new(Arc::new(api), metrics());
    assert_eq!(checker.check(WALLET).await, Some(42.0));

    assert!(logs.text().contains("Total Points: 42"), "{}", logs.text());
}

#[tokio::test]
async fn test_points_checker_logs_zero_when_total_missing() {
    let mut api = MockApi::new();
    api.expect_points().returning(|_| Ok(PointsBalance::default()));

    let (logs, _guard) = capture_logs();
    let checker = PointsChecker::new(Arc::new(api), metrics());
    assert_eq!(checker.check(WALLET).await, Some(0.0));

    assert!(logs.text().contains("Total Points: 0"), "{}", logs.text());
}

// ---- Transaction reporter ----

#[tokio::test]
async fn test_swap_failure_returns_none_without_report() {
    let mut swap = MockSwap::new();
    swap.expect_execute()
        .times(1)
        .returning(|| Err(SwapError::Rpc("nonce too low".to_string())));

    let mut api = MockApi::new();
    api.expect_report_transaction().times(0);
    api.expect_points().times(0);

    let metrics = metrics();
    let reporter = reporter(api, swap, Arc::clone(&metrics));
    assert_eq!(reporter.send_transaction("0").await, None);
    assert_eq!(metrics.swaps.with_label_values(&["failed"]).get(), 1);
}

#[tokio::test]
async fn test_empty_hash_is_treated_as_swap_failure() {
    let mut swap = MockSwap::new();
    swap.expect_execute().times(1).returning(|| {
        Ok(TransactionRecord {
            tx_hash: String::new(),
            ..record()
        })
    });

    let mut api = MockApi::new();
    api.expect_report_transaction().times(0);

    let reporter = reporter(api, swap, metrics());
    assert_eq!(reporter.send_transaction("0").await, None);
}

#[tokio::test]
async fn test_report_success_checks_points_once() {
    let mut api = MockApi::new();
    api.expect_report_transaction()
        .withf(|p| {
            p.hash == TX_HASH
                && p.wallet_address == WALLET
                && p.gas_fee_amount == "21000"
                && p.from_token_symbol == "POL"
                && p.to_token_symbol == "WPOL"
        })
        .times(1)
        .returning(|_| Ok(serde_json::json!({ "status": "ok" })));
    api.expect_points()
        .withf(|addr| addr == WALLET)
        .times(1)
        .returning(|_| Ok(PointsBalance { points_amount: Some(42.0) }));

    let metrics = metrics();
    let reporter = reporter(api, swap_ok(), Arc::clone(&metrics));
    assert_eq!(reporter.send_transaction("21000").await.as_deref(), Some(WALLET));
    assert_eq!(metrics.reports.with_label_values(&["sent"]).get(), 1);
    assert_eq!(metrics.points.get(), 42.0);
}

#[tokio::test(start_paused = true)]
async fn test_report_failure_retries_six_times_then_returns_address() {
    let stamps: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&stamps);

    let mut api = MockApi::new();
    api.expect_report_transaction()
        .withf(|p| p.hash == TX_HASH)
        .times(6)
        .returning(move |_| {
            seen.lock().unwrap().push(Instant::now());
            Err(transport_error())
        });
    api.expect_points().times(0);

    let metrics = metrics();
    let reporter = reporter(api, swap_ok(), Arc::clone(&metrics));
    assert_eq!(reporter.send_transaction("0").await.as_deref(), Some(WALLET));

    let stamps = stamps.lock().unwrap();
    assert_eq!(stamps.len(), 6);
    for pair in stamps.windows(2) {
        assert!(pair[1] - pair[0] >= Duration::from_secs(3));
    }
    assert_eq!(metrics.reports.with_label_values(&["failed"]).get(), 6);
    assert_eq!(metrics.reports.with_label_values(&["gave_up"]).get(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_report_recovers_on_third_attempt() {
    let calls = Arc::new(Mutex::new(0u32));
    let counter = Arc::clone(&calls);

    let mut api = MockApi::new();
    api.expect_report_transaction().times(3).returning(move |_| {
        let mut n = counter.lock().unwrap();
        *n += 1;
        if *n < 3 {
            Err(ApiError::Status { status: 503, body: "busy".to_string() })
        } else {
            Ok(serde_json::Value::Null)
        }
    });
    api.expect_points().times(1).returning(|_| Ok(PointsBalance::default()));

    let reporter = reporter(api, MockSwap::new(), metrics());
    let outcome = reporter.report(&record(), "0").await;
    assert_eq!(outcome, ReportOutcome::Sent { attempts: 3 });
}

#[tokio::test(start_paused = true)]
async fn test_custom_retry_bound() {
    let mut api = MockApi::new();
    api.expect_report_transaction()
        .times(3)
        .returning(|_| Err(transport_error()));

    let reporter = TransactionReporter::new(
        Arc::new(api),
        Arc::new(MockSwap::new()),
        registry(),
        RetryPolicy { max_retries: 2, delay: Duration::from_millis(500) },
        metrics(),
    );

    let started = Instant::now();
    let outcome = reporter.report(&record(), "0").await;
    assert_eq!(outcome, ReportOutcome::GaveUp { attempts: 3 });
    assert!(started.elapsed() >= Duration::from_millis(1_000));
}

#[tokio::test]
async fn test_points_failure_does_not_affect_report() {
    let mut api = MockApi::new();
    api.expect_report_transaction()
        .times(1)
        .returning(|_| Ok(serde_json::Value::Null));
    api.expect_points().times(1).returning(|_| Err(transport_error()));

    let reporter = reporter(api, swap_ok(), metrics());
    assert_eq!(reporter.send_transaction("0").await.as_deref(), Some(WALLET));
}

// ---- Check-in ----

fn check_in_manager(api: MockApi, metrics: Arc<BotMetrics>) -> CheckInManager<MockApi> {
    CheckInManager::new(Arc::new(api), metrics)
}

#[tokio::test]
async fn test_check_in_issued_across_month_boundary() {
    let mut api = MockApi::new();
    api.expect_check_in_status().times(1).returning(|_| {
        Ok(CheckInStatus {
            last_check_in: Some("2025-01-31T23:10:00.000Z".to_string()),
        })
    });
    api.expect_check_in()
        .withf(|addr| addr == WALLET)
        .times(1)
        .returning(|_| Ok(serde_json::json!({ "ok": true })));

    let metrics = metrics();
    let manager = check_in_manager(api, Arc::clone(&metrics));
    let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 30, 0).unwrap();
    assert_eq!(manager.check_in_user_at(WALLET, now).await, CheckInOutcome::CheckedIn);
    assert_eq!(metrics.check_ins.with_label_values(&["issued"]).get(), 1);
}

#[tokio::test]
async fn test_check_in_skipped_on_same_day() {
    let mut api = MockApi::new();
    api.expect_check_in_status().times(1).returning(|_| {
        Ok(CheckInStatus {
            last_check_in: Some("2025-02-01T00:05:00.000Z".to_string()),
        })
    });
    api.expect_check_in().times(0);

    let manager = check_in_manager(api, metrics());
    let now = Utc.with_ymd_and_hms(2025, 2, 1, 22, 0, 0).unwrap();
    assert_eq!(
        manager.check_in_user_at(WALLET, now).await,
        CheckInOutcome::AlreadyCheckedIn
    );
}

#[tokio::test]
async fn test_check_in_skipped_for_same_day_of_other_month() {
    let mut api = MockApi::new();
    api.expect_check_in_status().times(1).returning(|_| {
        Ok(CheckInStatus {
            last_check_in: Some("2025-01-05T09:00:00.000Z".to_string()),
        })
    });
    api.expect_check_in().times(0);

    let manager = check_in_manager(api, metrics());
    let now = Utc.with_ymd_and_hms(2025, 2, 5, 9, 0, 0).unwrap();
    assert_eq!(
        manager.check_in_user_at(WALLET, now).await,
        CheckInOutcome::AlreadyCheckedIn
    );
}

#[tokio::test]
async fn test_check_in_issued_when_status_unavailable() {
    let mut api = MockApi::new();
    api.expect_check_in_status()
        .times(1)
        .returning(|_| Err(transport_error()));
    api.expect_check_in()
        .times(1)
        .returning(|_| Err(ApiError::Status { status: 409, body: "already".to_string() }));

    let metrics = metrics();
    let manager = check_in_manager(api, Arc::clone(&metrics));
    let now = Utc.with_ymd_and_hms(2025, 2, 5, 9, 0, 0).unwrap();
    assert_eq!(manager.check_in_user_at(WALLET, now).await, CheckInOutcome::Failed);
    assert_eq!(metrics.check_ins.with_label_values(&["failed"]).get(), 1);
}

// ---- Main loop ----

fn convert_loop(api: MockApi, swap: MockSwap, metrics: Arc<BotMetrics>) -> ConvertLoop<MockApi, MockSwap> {
    let api = Arc::new(api);
    ConvertLoop::new(
        GasQuoteFetcher::new(Arc::clone(&api), registry()),
        TransactionReporter::new(
            Arc::clone(&api),
            Arc::new(swap),
            registry(),
            RetryPolicy::default(),
            Arc::clone(&metrics),
        ),
        CheckInManager::new(Arc::clone(&api), Arc::clone(&metrics)),
        LoopTiming::default(),
        metrics,
    )
}

fn happy_api() -> MockApi {
    let mut api = MockApi::new();
    api.expect_gas_quote().returning(|_| {
        Ok(GasQuote {
            gas_in_native_token: Some("5000000000000000".to_string()),
        })
    });
    api.expect_report_transaction()
        .returning(|_| Ok(serde_json::json!({ "status": "ok" })));
    api.expect_points()
        .returning(|_| Ok(PointsBalance { points_amount: Some(7.0) }));
    api.expect_check_in_status()
        .returning(|_| Ok(CheckInStatus::default()));
    api.expect_check_in().returning(|_| Ok(serde_json::Value::Null));
    api
}

#[tokio::test]
async fn test_iteration_runs_all_steps_in_order() {
    let mut swap = MockSwap::new();
    swap.expect_execute().times(1).returning(|| Ok(record()));

    let mut lp = convert_loop(happy_api(), swap, metrics());
    assert_eq!(lp.iterations(), 0);
    let summary = lp.run_iteration().await;

    assert_eq!(summary.iteration, 1);
    assert_eq!(lp.iterations(), 1);
    assert_eq!(summary.gas_fee, "5000000000000000");
    assert_eq!(summary.address.as_deref(), Some(WALLET));
    assert_eq!(summary.check_in, Some(CheckInOutcome::CheckedIn));
}

#[tokio::test]
async fn test_iteration_without_swap_skips_check_in() {
    let mut api = MockApi::new();
    api.expect_gas_quote().returning(|_| Err(transport_error()));
    api.expect_report_transaction().times(0);
    api.expect_check_in_status().times(0);
    api.expect_check_in().times(0);

    let mut swap = MockSwap::new();
    swap.expect_execute()
        .times(1)
        .returning(|| Err(SwapError::InsufficientBalance {
            balance: "1".to_string(),
            required: "2".to_string(),
        }));

    let mut lp = convert_loop(api, swap, metrics());
    let summary = lp.run_iteration().await;

    assert_eq!(summary.gas_fee, "0");
    assert_eq!(summary.address, None);
    assert_eq!(summary.check_in, None);
}

#[tokio::test(start_paused = true)]
async fn test_loop_paces_iterations_and_stops_on_shutdown() {
    let mut swap = MockSwap::new();
    swap.expect_execute().returning(|| Ok(record()));

    let metrics = metrics();
    let lp = convert_loop(happy_api(), swap, Arc::clone(&metrics));

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let handle = tokio::spawn(lp.run(shutdown_rx));

    // 5s initial delay, iteration 1 at t=5, iteration 2 at t=15.
    tokio::time::sleep(Duration::from_secs(16)).await;
    shutdown_tx.send(()).unwrap();

    let iterations = handle.await.unwrap();
    assert_eq!(iterations, 2);
    assert_eq!(metrics.iterations.get(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_before_first_iteration() {
    let lp = convert_loop(MockApi::new(), MockSwap::new(), metrics());

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let handle = tokio::spawn(lp.run(shutdown_rx));

    tokio::time::sleep(Duration::from_secs(1)).await;
    shutdown_tx.send(()).unwrap();

    assert_eq!(handle.await.unwrap(), 0);
}
