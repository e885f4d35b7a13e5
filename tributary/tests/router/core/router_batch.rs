use std::time::Duration;

use serde_json::json;
use tributary::standard_models::EquityQuote;
use tributary::{DispatchRequest, Tributary, TributaryError};
use tributary_mock::dynamic::MockBehavior;

use crate::helpers::{raw, scripted};

#[tokio::test]
async fn results_keep_request_order() {
    let tributary = Tributary::builder()
        .with_provider(tributary_mock::provider().unwrap())
        .build()
        .unwrap();

    let requests = vec![
        DispatchRequest::new("mock", "EquityQuote", raw(json!({"symbol": "MSFT"}))),
        DispatchRequest::new("mock", "EquityQuote", raw(json!({}))),
        DispatchRequest::new("nope", "EquityQuote", raw(json!({"symbol": "KO"}))),
        DispatchRequest::new("mock", "EquityQuote", raw(json!({"symbol": "KO"}))),
    ];
    let results = tributary.dispatch_many(&requests).await.unwrap();

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_ref().unwrap()[0]["symbol"], json!("MSFT"));
    assert!(matches!(results[1], Err(TributaryError::Validation { .. })));
    assert!(matches!(results[2], Err(TributaryError::UnknownProvider { .. })));
    assert_eq!(results[3].as_ref().unwrap()[0]["symbol"], json!("KO"));
}

#[tokio::test(start_paused = true)]
async fn batch_deadline_applies_to_the_whole_batch() {
    let (p, _ctl) = scripted::<EquityQuote>("slow", MockBehavior::Hang);
    let tributary = Tributary::builder()
        .with_provider(p)
        .request_timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let err = tributary
        .dispatch_many(&[DispatchRequest::new(
            "slow",
            "EquityQuote",
            raw(json!({"symbol": "X"})),
        )])
        .await
        .unwrap_err();
    assert_eq!(err, TributaryError::request_timeout("batch"));
}
