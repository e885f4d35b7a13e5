mod common;

use std::time::Duration;

use tributary::standard_models::{EquityQuoteQueryParams, MarketMoversQueryParams};
use tributary::{RetryConfig, Tributary};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    let tributary = Tributary::builder()
        .with_provider(tributary_mock::provider()?)
        .provider_timeout(Duration::from_millis(100))
        .request_timeout(Duration::from_secs(2))
        .retry(RetryConfig {
            max_retries: 1,
            ..RetryConfig::default()
        })
        .build()?;

    // Typed methods route to the given provider, or through default routing.
    let movers = tributary
        .market_movers(None, MarketMoversQueryParams::default())
        .await?;
    for m in &movers {
        println!("{:<6} {:>8.2} {:>+7.2}%", m.symbol, m.price, m.percent_change * 100.0);
    }

    // The mock stalls on `TIMEOUT`; the attempt and its retry both time out.
    let stalled = tributary
        .equity_quote(
            Some("mock"),
            EquityQuoteQueryParams {
                symbol: "TIMEOUT".into(),
            },
        )
        .await;
    println!("TIMEOUT -> {stalled:?}");

    Ok(())
}
