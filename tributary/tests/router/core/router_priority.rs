use std::time::Duration;

use serde_json::json;
use tributary::standard_models::EquityQuote;
use tributary::{FetchError, RetryConfig, Tributary, TributaryError};
use tributary_mock::dynamic::MockBehavior;

use crate::helpers::{quoting, raw, scripted};

#[tokio::test]
async fn registration_order_is_the_default_route() {
    let (a, a_ctl) = quoting("a", "X", 1.0);
    let (b, b_ctl) = quoting("b", "X", 2.0);
    let tributary = Tributary::builder()
        .with_provider(a)
        .with_provider(b)
        .build()
        .unwrap();

    let report = tributary
        .dispatch_default("EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap();
    assert_eq!(report.provider, "a");
    assert_eq!(a_ctl.calls().await, 1);
    assert_eq!(b_ctl.calls().await, 0);
}

#[tokio::test]
async fn preferred_provider_goes_first() {
    let (a, a_ctl) = quoting("a", "X", 1.0);
    let (b, _) = quoting("b", "X", 2.0);
    let tributary = Tributary::builder()
        .with_provider(a)
        .with_provider(b)
        .prefer_providers("EquityQuote", &["b", "ghost", "b"])
        .build()
        .unwrap();

    assert_eq!(
        tributary.config().category_priority["EquityQuote"],
        vec!["b".to_string()]
    );
    let report = tributary
        .dispatch_default("EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap();
    assert_eq!(report.provider, "b");
    assert_eq!(report.results[0]["last_price"], json!(2.0));
    assert_eq!(a_ctl.calls().await, 0);
}

#[tokio::test]
async fn failure_falls_back_to_next_provider() {
    let (a, a_ctl) = scripted::<EquityQuote>("a", MockBehavior::Fail(FetchError::upstream_status(503, "down")));
    let (b, _) = quoting("b", "X", 2.0);
    let tributary = Tributary::builder()
        .with_provider(a)
        .with_provider(b)
        .retry(RetryConfig::disabled())
        .build()
        .unwrap();

    let report = tributary
        .dispatch_default("EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap();
    assert_eq!(report.provider, "b");
    assert_eq!(a_ctl.calls().await, 1);
}

#[tokio::test]
async fn providers_without_the_category_are_skipped() {
    let tributary = Tributary::builder()
        .with_provider(tributary_fred::provider_with_base_url("http://127.0.0.1:9").unwrap())
        .with_provider(tributary_mock::provider().unwrap())
        .build()
        .unwrap();

    let report = tributary
        .dispatch_default("CurrencyPairs", &raw(json!({})))
        .await
        .unwrap();
    assert_eq!(report.provider, "mock");
}

#[tokio::test]
async fn all_failures_are_collected_in_order() {
    let (a, _) = scripted::<EquityQuote>("a", MockBehavior::Fail(FetchError::upstream_status(500, "boom")));
    let (b, _) = scripted::<EquityQuote>("b", MockBehavior::Fail(FetchError::transform("bad")));
    let tributary = Tributary::builder()
        .with_provider(a)
        .with_provider(b)
        .retry(RetryConfig::disabled())
        .build()
        .unwrap();

    let err = tributary
        .dispatch_default("EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap_err();
    let TributaryError::AllProvidersFailed(errors) = err else {
        panic!("expected aggregate failure");
    };
    assert_eq!(errors.len(), 2);
    assert!(matches!(&errors[0], TributaryError::Upstream { provider, .. } if provider == "a"));
    assert!(matches!(&errors[1], TributaryError::Transform { provider, .. } if provider == "b"));
}

#[tokio::test(start_paused = true)]
async fn all_timeouts_collapse() {
    let (a, _) = scripted::<EquityQuote>("a", MockBehavior::Hang);
    let (b, _) = scripted::<EquityQuote>("b", MockBehavior::Hang);
    let tributary = Tributary::builder()
        .with_provider(a)
        .with_provider(b)
        .provider_timeout(Duration::from_millis(20))
        .retry(RetryConfig::disabled())
        .build()
        .unwrap();

    let err = tributary
        .dispatch_default("EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TributaryError::AllProvidersTimedOut {
            category: "EquityQuote".into()
        }
    );
}

#[tokio::test]
async fn nobody_offers_the_category() {
    let (a, _) = quoting("a", "X", 1.0);
    let tributary = Tributary::builder().with_provider(a).build().unwrap();

    let err = tributary
        .dispatch_default("TreasuryRates", &raw(json!({})))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TributaryError::UnknownCategory {
            provider: None,
            category: "TreasuryRates".into()
        }
    );
}

#[tokio::test]
async fn invalid_params_stop_the_walk() {
    let (a, a_ctl) = quoting("a", "X", 1.0);
    let (b, b_ctl) = quoting("b", "X", 1.0);
    let tributary = Tributary::builder()
        .with_provider(a)
        .with_provider(b)
        .build()
        .unwrap();

    let err = tributary
        .dispatch_default("EquityQuote", &raw(json!({"symbol": ""})))
        .await
        .unwrap_err();
    assert!(matches!(err, TributaryError::Validation { .. }));
    assert_eq!(a_ctl.calls().await + b_ctl.calls().await, 0);
}
