use serde_json::json;
use tributary::{FieldIssue, Tributary, TributaryError};
use tributary_mock::dynamic::MockBehavior;

use crate::helpers::{quoting, raw, scripted};

#[tokio::test]
async fn unknown_provider_is_reported() {
    let (p, ctl) = quoting("a", "X", 1.0);
    let tributary = Tributary::builder().with_provider(p).build().unwrap();

    let err = tributary
        .dispatch("nope", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap_err();
    assert_eq!(err, TributaryError::unknown_provider("nope"));
    assert_eq!(ctl.calls().await, 0);
}

#[tokio::test]
async fn unknown_category_names_the_provider() {
    let (p, _ctl) = quoting("a", "X", 1.0);
    let tributary = Tributary::builder().with_provider(p).build().unwrap();

    let err = tributary
        .dispatch("a", "TreasuryRates", &raw(json!({})))
        .await
        .unwrap_err();
    assert_eq!(err, TributaryError::unknown_category("a", "TreasuryRates"));
}

#[tokio::test]
async fn missing_required_param_never_reaches_fetcher() {
    let (p, ctl) = quoting("a", "X", 1.0);
    let tributary = Tributary::builder().with_provider(p).build().unwrap();

    let err = tributary
        .dispatch("a", "EquityQuote", &raw(json!({})))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TributaryError::validation("EquityQuote", vec![FieldIssue::new("symbol", "field required")])
    );
    assert_eq!(ctl.calls().await, 0);
}

#[tokio::test]
async fn constraint_violations_are_all_reported() {
    let (p, ctl) =
        scripted::<tributary::standard_models::MarketMovers>("a", MockBehavior::Return(vec![]));
    let tributary = Tributary::builder().with_provider(p).build().unwrap();

    let err = tributary
        .dispatch("a", "MarketMovers", &raw(json!({"sort": "sideways", "limit": 0})))
        .await
        .unwrap_err();
    let TributaryError::Validation { category, issues } = err else {
        panic!("expected validation error");
    };
    assert_eq!(category, "MarketMovers");
    let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
    assert_eq!(fields, ["sort", "limit"]);
    assert_eq!(ctl.calls().await, 0);
}

#[tokio::test]
async fn unknown_keys_rejected_when_strict_dropped_when_lax() {
    let (strict_p, _) = quoting("a", "X", 1.0);
    let strict = Tributary::builder().with_provider(strict_p).build().unwrap();
    let params = raw(json!({"symbol": "X", "interval": "1d"}));

    let err = strict.dispatch("a", "EquityQuote", &params).await.unwrap_err();
    assert_eq!(
        err,
        TributaryError::validation("EquityQuote", vec![FieldIssue::new("interval", "unexpected field")])
    );

    let (lax_p, ctl) = quoting("a", "X", 1.0);
    let lax = Tributary::builder()
        .with_provider(lax_p)
        .strict_params(false)
        .build()
        .unwrap();
    let report = lax.dispatch_report("a", "EquityQuote", &params).await.unwrap();
    assert_eq!(report.params, raw(json!({"symbol": "X"})));
    assert_eq!(ctl.calls().await, 1);
}

#[tokio::test]
async fn defaults_are_filled_before_fetch() {
    let (p, ctl) =
        scripted::<tributary::standard_models::MarketMovers>("a", MockBehavior::Return(vec![]));
    let tributary = Tributary::builder().with_provider(p).build().unwrap();

    let report = tributary
        .dispatch_report("a", "MarketMovers", &raw(json!({"limit": "5"})))
        .await
        .unwrap();
    assert_eq!(report.params, raw(json!({"sort": "desc", "limit": 5})));
    assert_eq!(report.attempts, 1);
    assert!(report.results.is_empty());

    let seen = ctl.params().await;
    assert_eq!(seen[0].sort, "desc");
    assert_eq!(seen[0].limit, 5);
}

#[tokio::test]
async fn dispatch_is_idempotent_for_deterministic_fetchers() {
    let tributary = Tributary::builder()
        .with_provider(tributary_mock::provider().unwrap())
        .build()
        .unwrap();
    let params = raw(json!({"symbol": "EURUSD", "start_date": "2024-01-03"}));

    let first = tributary
        .dispatch("mock", "CurrencyHistorical", &params)
        .await
        .unwrap();
    let second = tributary
        .dispatch("mock", "CurrencyHistorical", &params)
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[tokio::test]
async fn mock_records_carry_only_schema_fields() {
    let tributary = Tributary::builder()
        .with_provider(tributary_mock::provider().unwrap())
        .build()
        .unwrap();

    let rows = tributary
        .dispatch("mock", "CurrencyPairs", &raw(json!({"query": "usd"})))
        .await
        .unwrap();
    let schema = tributary.registry().get("mock").unwrap().fetcher("CurrencyPairs").unwrap().data_schema();
    for row in &rows {
        for key in row.keys() {
            assert!(schema.field(key).is_some(), "{key}");
        }
    }
    assert_eq!(rows.len(), 4);
}
