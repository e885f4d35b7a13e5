mod common;

use serde_json::json;
use tributary::Tributary;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();

    // 1. Pick a provider (FRED with an API key, mock otherwise).
    let (provider, credentials) = common::get_provider()?;
    let name = provider.name().to_string();

    // 2. Build the dispatcher.
    let tributary = Tributary::builder()
        .with_provider(provider)
        .credentials(credentials)
        .build()?;

    // 3. Raw params are validated against the TreasuryRates query schema;
    //    `maturity` falls back to its default of "10y".
    let params = json!({"start_date": "2024-01-01", "end_date": "2024-01-05"});
    let report = tributary
        .dispatch_report(&name, "TreasuryRates", params.as_object().ok_or("not an object")?)
        .await?;

    println!("normalized params: {}", serde_json::to_string(&report.params)?);
    println!("attempts: {}", report.attempts);
    for record in &report.results {
        println!("{}", serde_json::to_string(record)?);
    }

    Ok(())
}
