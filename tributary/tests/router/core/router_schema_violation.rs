use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tributary::standard_models::EquityQuote;
use tributary::{
    Credentials, DynFetcher, FetchError, Provider, RawParams, Record, Schema, Tributary,
    TributaryError,
};
use tributary_core::ValidatedParams;
use tributary_mock::dynamic::MockBehavior;

use crate::helpers::{fast_retry, raw, scripted};

/// Delegates everything to a real fetcher but returns fixed records.
struct Corrupting {
    inner: Arc<dyn DynFetcher>,
    records: Vec<Record>,
}

#[async_trait]
impl DynFetcher for Corrupting {
    fn category(&self) -> &'static str {
        self.inner.category()
    }
    fn query_schema(&self) -> &'static Schema {
        self.inner.query_schema()
    }
    fn data_schema(&self) -> &'static Schema {
        self.inner.data_schema()
    }
    fn require_credentials(&self) -> bool {
        false
    }
    fn parse_params(
        &self,
        raw: &RawParams,
        strict: bool,
    ) -> Result<ValidatedParams, TributaryError> {
        self.inner.parse_params(raw, strict)
    }
    async fn fetch_records(
        &self,
        _params: &ValidatedParams,
        _credentials: &Credentials,
    ) -> Result<Vec<Record>, FetchError> {
        Ok(self.records.clone())
    }
}

fn corrupting(records: Vec<Record>) -> Provider {
    let (template, _) = scripted::<EquityQuote>("template", MockBehavior::Hang);
    let inner = Arc::clone(template.fetcher("EquityQuote").unwrap());
    Provider::builder("broken")
        .dyn_fetcher(Arc::new(Corrupting { inner, records }))
        .build()
        .unwrap()
}

#[tokio::test]
async fn null_in_required_field_is_a_schema_violation() {
    let tributary = Tributary::builder()
        .with_provider(tributary_mock::provider().unwrap())
        .build()
        .unwrap();

    let err = tributary
        .dispatch("mock", "EquityQuote", &raw(json!({"symbol": "NAN"})))
        .await
        .unwrap_err();
    let TributaryError::SchemaViolation { provider, category, issues } = err else {
        panic!("expected schema violation, got {err:?}");
    };
    assert_eq!(provider, "mock");
    assert_eq!(category, "EquityQuote");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "[0].last_price");
    assert_eq!(issues[0].message, "must not be null");
}

#[tokio::test]
async fn every_broken_record_is_reported() {
    let records = vec![
        raw(json!({"symbol": "OK", "last_price": 1.0})),
        raw(json!({"symbol": 7})),
    ];
    let tributary = Tributary::builder()
        .with_provider(corrupting(records))
        .retry(fast_retry(3))
        .build()
        .unwrap();

    let report = tributary
        .dispatch_report("broken", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await;
    let Err(TributaryError::SchemaViolation { issues, .. }) = report else {
        panic!("expected schema violation");
    };
    let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
    assert_eq!(fields, ["[1].symbol", "[1].last_price"]);
}

#[tokio::test]
async fn extra_fields_in_records_are_tolerated() {
    let records = vec![raw(json!({"symbol": "X", "last_price": 2.5, "exchange": "XNAS"}))];
    let tributary = Tributary::builder()
        .with_provider(corrupting(records.clone()))
        .build()
        .unwrap();

    let rows = tributary
        .dispatch("broken", "EquityQuote", &raw(json!({"symbol": "X"})))
        .await
        .unwrap();
    assert_eq!(rows, records);
}
