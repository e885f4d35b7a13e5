use serde_json::json;
use tributary::standard_models::EquityQuote;
use tributary::{FetchError, Tributary, TributaryError};
use tributary_mock::dynamic::MockBehavior;

use crate::helpers::{fast_retry, quote, raw, scripted};

fn failing(err: FetchError) -> MockBehavior<tributary::standard_models::EquityQuoteData> {
    MockBehavior::Fail(err)
}

#[tokio::test]
async fn transient_failure_is_retried_until_success() {
    let (p, ctl) = scripted::<EquityQuote>("a", MockBehavior::Return(vec![quote("X", 3.0)]));
    ctl.push(failing(FetchError::upstream_status(503, "busy"))).await;
    ctl.push(failing(FetchError::upstream("connection reset"))).await;

    let tributary = Tributary::builder()
        .with_provider(p)
        .retry(fast_retry(2))
        .build()
        .unwrap();
    let report = tributary
        .dispatch_report("a", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap();

    assert_eq!(report.attempts, 3);
    assert_eq!(report.results[0]["last_price"], json!(3.0));
    assert_eq!(ctl.calls().await, 3);
}

#[tokio::test]
async fn retries_stop_after_max_retries() {
    let (p, ctl) = scripted::<EquityQuote>("a", failing(FetchError::upstream_status(502, "bad gateway")));
    let tributary = Tributary::builder()
        .with_provider(p)
        .retry(fast_retry(3))
        .build()
        .unwrap();

    let err = tributary
        .dispatch("a", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TributaryError::Upstream {
            provider: "a".into(),
            message: "bad gateway".into(),
            status: Some(502),
        }
    );
    assert_eq!(ctl.calls().await, 4);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let (p, ctl) = scripted::<EquityQuote>("a", failing(FetchError::upstream_status(404, "no such symbol")));
    let tributary = Tributary::builder()
        .with_provider(p)
        .retry(fast_retry(3))
        .build()
        .unwrap();

    let err = tributary
        .dispatch("a", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap_err();
    assert!(matches!(err, TributaryError::Upstream { status: Some(404), .. }));
    assert_eq!(ctl.calls().await, 1);
}

#[tokio::test]
async fn transform_errors_are_not_retried() {
    let (p, ctl) = scripted::<EquityQuote>("a", failing(FetchError::transform("unexpected payload")));
    let tributary = Tributary::builder()
        .with_provider(p)
        .retry(fast_retry(3))
        .build()
        .unwrap();

    let err = tributary
        .dispatch("a", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TributaryError::Transform {
            provider: "a".into(),
            message: "unexpected payload".into(),
        }
    );
    assert_eq!(ctl.calls().await, 1);
}

#[tokio::test]
async fn disabled_retry_makes_one_attempt() {
    let (p, ctl) = scripted::<EquityQuote>("a", failing(FetchError::upstream("down")));
    let tributary = Tributary::builder()
        .with_provider(p)
        .retry(tributary::RetryConfig::disabled())
        .build()
        .unwrap();

    assert!(tributary
        .dispatch("a", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .is_err());
    assert_eq!(ctl.calls().await, 1);
}

#[tokio::test(start_paused = true)]
async fn default_backoff_waits_between_attempts() {
    let (p, ctl) = scripted::<EquityQuote>("a", MockBehavior::Return(vec![quote("X", 1.0)]));
    ctl.push(failing(FetchError::upstream("reset"))).await;
    ctl.push(failing(FetchError::upstream("reset"))).await;
    let tributary = Tributary::builder().with_provider(p).build().unwrap();

    let start = tokio::time::Instant::now();
    let report = tributary
        .dispatch_report("a", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap();
    // 200ms then 400ms, each with at most 20% jitter.
    let waited = start.elapsed();
    assert_eq!(report.attempts, 3);
    assert!(waited >= std::time::Duration::from_millis(600), "{waited:?}");
    assert!(waited < std::time::Duration::from_millis(730), "{waited:?}");
}
