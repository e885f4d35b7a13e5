use tributary::standard_models::{
    CurrencyHistorical, CurrencyHistoricalQueryParams, CurrencyPairsQueryParams, EquityQuote,
    EquityQuoteQueryParams, FredSeriesQueryParams, MarketMoversQueryParams,
};
use tributary::{FetchError, RetryConfig, Tributary, TributaryError};
use tributary_mock::dynamic::MockBehavior;

use crate::helpers::{quote, scripted};

fn mock_only() -> Tributary {
    Tributary::builder()
        .with_provider(tributary_mock::provider().unwrap())
        .build()
        .unwrap()
}

#[tokio::test]
async fn equity_quote_from_named_provider() {
    let rows = mock_only()
        .equity_quote(
            Some("mock"),
            EquityQuoteQueryParams {
                symbol: "AAPL".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name.as_deref(), Some("Apple Inc."));
    assert_eq!(rows[0].prev_close, Some(188.0));
}

#[tokio::test]
async fn market_movers_through_default_routing() {
    let rows = mock_only()
        .market_movers(
            None,
            MarketMoversQueryParams {
                sort: "asc".into(),
                limit: 3,
            },
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].percent_change <= rows[1].percent_change);
}

#[tokio::test]
async fn typed_params_are_still_validated() {
    let err = mock_only()
        .market_movers(
            Some("mock"),
            MarketMoversQueryParams {
                sort: "desc".into(),
                limit: 500,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TributaryError::Validation { ref issues, .. } if issues[0].field == "limit"));
}

#[tokio::test]
async fn fred_series_and_currency_methods() {
    let tributary = mock_only();

    let series = tributary
        .fred_series(
            None,
            FredSeriesQueryParams {
                symbol: "DGS10".into(),
                start_date: None,
                end_date: None,
                limit: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].value, None);
    assert_eq!(series[1].value, Some(3.95));

    let pairs = tributary
        .currency_pairs(
            Some("mock"),
            CurrencyPairsQueryParams {
                query: Some("gbp".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(pairs[0].base.as_deref(), Some("GBP"));

    let bars = tributary
        .currency_historical(
            Some("mock"),
            CurrencyHistoricalQueryParams {
                symbol: "EURUSD".into(),
                start_date: None,
                end_date: "2024-01-02".parse().ok(),
            },
        )
        .await
        .unwrap();
    assert_eq!(bars.len(), 1);
    assert!((bars[0].close - 1.0940).abs() < 1e-9);
}

#[tokio::test]
async fn fetch_default_falls_back_from_forced_failure() {
    let (backup, ctl) = scripted::<EquityQuote>("backup", MockBehavior::Return(vec![quote("FAIL", 1.5)]));
    let tributary = Tributary::builder()
        .with_provider(tributary_mock::provider().unwrap())
        .with_provider(backup)
        .retry(RetryConfig::disabled())
        .build()
        .unwrap();

    let rows = tributary
        .fetch_default::<EquityQuote>(EquityQuoteQueryParams {
            symbol: "FAIL".into(),
        })
        .await
        .unwrap();
    assert_eq!(rows[0].last_price, 1.5);
    assert_eq!(ctl.calls().await, 1);
}

#[tokio::test]
async fn generic_fetch_reports_upstream_errors() {
    let (p, _) = scripted::<CurrencyHistorical>(
        "fx",
        MockBehavior::Fail(FetchError::upstream_status(401, "bad key")),
    );
    let tributary = Tributary::builder().with_provider(p).build().unwrap();

    let err = tributary
        .fetch::<CurrencyHistorical>(
            "fx",
            CurrencyHistoricalQueryParams {
                symbol: "EURUSD".into(),
                start_date: None,
                end_date: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        TributaryError::Upstream {
            provider: "fx".into(),
            message: "bad key".into(),
            status: Some(401),
        }
    );
}
