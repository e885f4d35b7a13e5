use httpmock::prelude::*;
use serde_json::json;
use tributary::standard_models::TreasuryRatesQueryParams;
use tributary::{StaticCredentials, Tributary, TributaryError};
use tributary_fred::adapter::{FredObservations, Observation};

use crate::helpers::{rate, raw, treasury};

#[tokio::test]
async fn registered_fetcher_records_come_back_verbatim() {
    let (fred, ctl) = treasury(
        "fred",
        vec![rate("2024-01-01", 5.33), rate("2024-01-02", 5.32)],
    );
    let tributary = Tributary::builder().with_provider(fred).build().unwrap();

    let rows = tributary
        .dispatch(
            "fred",
            "TreasuryRates",
            &raw(json!({"start_date": "2024-01-01", "end_date": "2024-01-02"})),
        )
        .await
        .unwrap();

    assert_eq!(
        rows,
        vec![
            raw(json!({"date": "2024-01-01", "rate": 5.33})),
            raw(json!({"date": "2024-01-02", "rate": 5.32})),
        ]
    );
    let seen = ctl.params().await;
    assert_eq!(seen[0].start_date, "2024-01-01".parse().ok());
    assert_eq!(seen[0].maturity, "10y");
}

#[tokio::test]
async fn fred_provider_over_http() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/series/observations")
                .query_param("series_id", "DGS10")
                .query_param("api_key", "secret")
                .query_param("observation_start", "2024-01-01")
                .query_param("observation_end", "2024-01-02");
            then.status(200).json_body(json!({
                "observations": [
                    {"date": "2024-01-01", "value": "5.33"},
                    {"date": "2024-01-02", "value": "5.32"}
                ]
            }));
        })
        .await;

    let tributary = Tributary::builder()
        .with_provider(tributary_fred::provider_with_base_url(&server.base_url()).unwrap())
        .credentials(StaticCredentials::new().with("fred", "api_key", "secret"))
        .build()
        .unwrap();

    let rows = tributary
        .dispatch(
            "fred",
            "TreasuryRates",
            &raw(json!({"start_date": "2024-01-01", "end_date": "2024-01-02"})),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        rows,
        vec![
            raw(json!({"date": "2024-01-01", "rate": 5.33})),
            raw(json!({"date": "2024-01-02", "rate": 5.32})),
        ]
    );
}

#[tokio::test]
async fn fred_requires_api_key_before_any_request() {
    let adapter = <dyn FredObservations>::from_fn(|_| panic!("adapter must not be called"));
    let tributary = Tributary::builder()
        .with_provider(tributary_fred::provider_with_adapter(adapter).unwrap())
        .build()
        .unwrap();

    let err = tributary
        .dispatch("fred", "TreasuryRates", &raw(json!({})))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TributaryError::CredentialMissing {
            provider: "fred".into(),
            credential: "api_key".into(),
        }
    );
}

#[tokio::test]
async fn typed_treasury_rates_through_fred() {
    let adapter = <dyn FredObservations>::from_fn(|req| {
        assert_eq!(req.series_id, "DGS2");
        Ok(vec![Observation {
            date: "2024-01-02".into(),
            value: "4.33".into(),
        }])
    });
    let tributary = Tributary::builder()
        .with_provider(tributary_fred::provider_with_adapter(adapter).unwrap())
        .credentials(StaticCredentials::new().with("fred", "api_key", "k"))
        .build()
        .unwrap();

    let params = TreasuryRatesQueryParams {
        maturity: "2y".into(),
        ..TreasuryRatesQueryParams::default()
    };
    let rows = tributary.treasury_rates(Some("fred"), params).await.unwrap();
    assert_eq!(rows, vec![rate("2024-01-02", 4.33)]);
}
